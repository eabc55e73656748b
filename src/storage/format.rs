//! Record file formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Current binary record version
pub const RECORD_VERSION: u32 = 1;

/// Magic bytes following the version in binary records
pub const RECORD_MAGIC: &[u8; 4] = b"EMNA";

/// Format for record serialization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// JSON format (human-readable, larger)
    Json,
    /// Binary format (compact, fast)
    #[default]
    Binary,
}

impl RecordFormat {
    /// File extension used for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for RecordFormat {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "binary" | "bin" => Ok(Self::Binary),
            _ => Err(RecordError::UnknownFormat(s.to_string())),
        }
    }
}
