//! Saving and loading run records

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::format::{RecordFormat, RECORD_MAGIC, RECORD_VERSION};
use crate::error::RecordError;
use crate::recorder::RunRecord;

/// Conventional record file name, e.g. `Algo-EMNA_Func-sphere_Dim-2000_Exp-3.bin`
pub fn record_file_name(
    algorithm: &str,
    function: &str,
    dimension: usize,
    experiment: usize,
    format: RecordFormat,
) -> String {
    format!(
        "Algo-{}_Func-{}_Dim-{}_Exp-{}.{}",
        algorithm,
        function,
        dimension,
        experiment,
        format.extension()
    )
}

/// Save a record to a file
pub fn save_record(
    record: &RunRecord,
    path: impl AsRef<Path>,
    format: RecordFormat,
) -> Result<(), RecordError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    match format {
        RecordFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, record)
                .map_err(|e| RecordError::Serialization(e.to_string()))?;
        }
        RecordFormat::Binary => {
            writer.write_all(&RECORD_VERSION.to_le_bytes())?;
            writer.write_all(RECORD_MAGIC)?;
            bincode::serialize_into(&mut writer, record)
                .map_err(|e| RecordError::Serialization(e.to_string()))?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Load a record, detecting the format from its header
pub fn load_record(path: impl AsRef<Path>) -> Result<RunRecord, RecordError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RecordError::NotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    match bytes.get(4..8) {
        Some(magic) if magic == RECORD_MAGIC => {
            let version = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            if version > RECORD_VERSION {
                return Err(RecordError::VersionMismatch {
                    expected: RECORD_VERSION,
                    found: version,
                });
            }
            bincode::deserialize(&bytes[8..])
                .map_err(|e| RecordError::Deserialization(e.to_string()))
        }
        _ => serde_json::from_slice(&bytes)
            .map_err(|e| RecordError::Deserialization(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::FitnessDirection;
    use crate::recorder::BestSoFarRecorder;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_record() -> RunRecord {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        for value in [9.0, 4.0, 6.0, 0.25] {
            recorder.record(value);
        }
        recorder
            .into_record("sphere", 2, Duration::from_millis(250))
            .unwrap()
            .with_experiment(1, 65537)
            .with_generations(1)
            .with_termination_reason("Maximum generations reached")
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            record_file_name("EMNA", "sphere", 2000, 3, RecordFormat::Binary),
            "Algo-EMNA_Func-sphere_Dim-2000_Exp-3.bin"
        );
        assert_eq!(
            record_file_name("EMNA", "cigar_discus", 10, 0, RecordFormat::Json),
            "Algo-EMNA_Func-cigar_discus_Dim-10_Exp-0.json"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");
        let record = sample_record();

        save_record(&record, &path, RecordFormat::Json).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"best_so_far_y\": 0.25"));

        assert_eq!(load_record(&path).unwrap(), record);
    }

    #[test]
    fn test_binary_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.bin");
        let record = sample_record();

        save_record(&record, &path, RecordFormat::Binary).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], &RECORD_VERSION.to_le_bytes());
        assert_eq!(&bytes[4..8], RECORD_MAGIC);

        assert_eq!(load_record(&path).unwrap(), record);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_record(dir.path().join("absent.bin")),
            Err(RecordError::NotFound(_))
        ));
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.bin");
        let mut bytes = (RECORD_VERSION + 1).to_le_bytes().to_vec();
        bytes.extend_from_slice(RECORD_MAGIC);
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            load_record(&path),
            Err(RecordError::VersionMismatch { found, .. }) if found == RECORD_VERSION + 1
        ));
    }

    #[test]
    fn test_garbage_is_deserialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage");
        fs::write(&path, b"not a record").unwrap();
        assert!(matches!(
            load_record(&path),
            Err(RecordError::Deserialization(_))
        ));
    }
}
