//! EMNA on the Sphere Function
//!
//! Runs isotropic EMNA on a small sphere problem twice: once with the
//! default selection, which keeps the lowest objective values, and once
//! ranking the raw objective value descending. The comparison shows how much
//! the selection direction matters on a minimization problem.

use emna_bench::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DIM: usize = 10;

fn run(direction: FitnessDirection) -> Result<RunRecord, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut emna = Emna::builder()
        .dimension(DIM)
        .population_size(40)
        .selection_size(20)
        .selection_direction(direction)
        .objective(Sphere)
        .build(&mut rng)?;

    let record = SearchLoop::with_termination(MaxGenerations::new(200)).run(&mut emna, &mut rng)?;

    println!("Selection direction: {}", direction);
    println!("  Final spread: {:.6e}", emna.model().spread());
    println!("{}\n", record.summary());
    Ok(record)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== EMNA Sphere Example ===\n");
    println!("Problem: {}-D Sphere function", DIM);
    println!("Global optimum: 0.0 at the origin\n");

    let lowest = run(FitnessDirection::Minimize)?;
    let highest = run(FitnessDirection::Maximize)?;

    println!(
        "Best-so-far: {:.6e} (keep lowest, default) vs {:.6e} (keep highest)",
        lowest.best_so_far_y, highest.best_so_far_y
    );

    Ok(())
}
