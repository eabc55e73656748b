//! Property-based tests for emna-bench
//!
//! Uses proptest to verify invariants of the model, recorder, and grid.

use emna_bench::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(dimension: usize, population_size: usize, selection_size: usize) -> EmnaConfig {
    EmnaConfig {
        dimension,
        population_size,
        selection_size,
        ..Default::default()
    }
}

proptest! {
    // ==================== Model Properties ====================

    #[test]
    fn generate_has_requested_shape(
        dim in 1usize..30,
        size in 1usize..50,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let model = EmnaModel::new(config(dim, 4, 2), &mut rng).unwrap();
        let population = model.generate(size, &mut rng);

        prop_assert_eq!(population.len(), size);
        for individual in population.iter() {
            prop_assert_eq!(individual.dimension(), dim);
            prop_assert!(!individual.is_evaluated());
        }
    }

    #[test]
    fn initial_mean_within_range(
        dim in 1usize..50,
        low in -100.0f64..0.0,
        width in 0.1f64..50.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let cfg = EmnaConfig {
            init_range: (low, low + width),
            ..config(dim, 4, 2)
        };
        let model = EmnaModel::new(cfg, &mut rng).unwrap();
        for &m in model.mean() {
            prop_assert!(m >= low && m < low + width);
        }
    }

    #[test]
    fn update_at_mean_collapses_spread(
        mean in prop::collection::vec(-10.0f64..10.0, 1..10),
        fitness in prop::collection::vec(-100.0f64..100.0, 4..12)
    ) {
        let n = fitness.len();
        let distribution = SearchDistribution::new(mean.clone(), 3.0).unwrap();
        let mut model =
            EmnaModel::with_distribution(config(mean.len(), n, n / 2), distribution).unwrap();
        let population = Population::from_evaluated(vec![mean.clone(); n], fitness);

        model.update(&population).unwrap();

        prop_assert_eq!(model.spread(), 0.0);
        for (m, expected) in model.mean().iter().zip(&mean) {
            prop_assert!((m - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn update_matches_selected_statistics(
        positions in prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 3), 4..15),
        seed in any::<u64>()
    ) {
        let n = positions.len();
        let mu = n / 2;
        let old_mean = vec![0.5, -0.5, 1.0];

        // distinct fitness values so the selected set is unambiguous
        let fitness: Vec<f64> = (0..n).map(|i| ((i as u64 ^ seed) % 1000) as f64 + i as f64 * 1e-3).collect();

        let distribution = SearchDistribution::new(old_mean.clone(), 1.0).unwrap();
        let mut model = EmnaModel::with_distribution(config(3, n, mu), distribution).unwrap();
        let population = Population::from_evaluated(positions.clone(), fitness.clone());
        model.update(&population).unwrap();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap());
        let selected = &order[..mu];

        let mut squared = 0.0;
        for d in 0..3 {
            let shift: f64 = selected.iter().map(|&i| positions[i][d] - old_mean[d]).sum::<f64>() / mu as f64;
            prop_assert!((model.mean()[d] - (old_mean[d] + shift)).abs() < 1e-9);
            squared += selected.iter().map(|&i| (positions[i][d] - old_mean[d]).powi(2)).sum::<f64>();
        }
        let expected_spread = (squared / (3 * mu) as f64).sqrt();
        prop_assert!((model.spread() - expected_spread).abs() < 1e-9);
        prop_assert!(model.spread() >= 0.0);
    }

    // ==================== Recorder Properties ====================

    #[test]
    fn best_so_far_is_monotone(values in prop::collection::vec(-1e6f64..1e6, 1..200)) {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        for &v in &values {
            recorder.record(v);
        }

        let series = recorder.series();
        prop_assert_eq!(series.len(), values.len());
        for (i, &(count, _)) in series.iter().enumerate() {
            prop_assert_eq!(count, i + 1);
        }
        for pair in series.windows(2) {
            prop_assert!(pair[1].1 <= pair[0].1);
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(recorder.best(), Some(min));
    }

    // ==================== Search Properties ====================

    #[test]
    fn evaluations_equal_generations_times_population(
        generations in 1usize..5,
        population_size in 2usize..12,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut emna = Emna::builder()
            .dimension(3)
            .population_size(population_size)
            .selection_size(population_size / 2)
            .objective(Sphere)
            .build(&mut rng)
            .unwrap();

        let record = SearchLoop::with_termination(MaxGenerations::new(generations))
            .run(&mut emna, &mut rng)
            .unwrap();

        prop_assert_eq!(record.generations, generations);
        prop_assert_eq!(record.n_function_evaluations, generations * population_size);
        prop_assert_eq!(record.fitness.len(), record.n_function_evaluations);
    }

    // ==================== Landscape Properties ====================

    #[test]
    fn landscape_has_num_squared_values(num in 2usize..20) {
        let grid = LandscapeGrid::sample(&Rosenbrock, (-2.0, 2.0), (-1.0, 3.0), num).unwrap();
        prop_assert_eq!(grid.z.len(), num);
        prop_assert!(grid.z.iter().all(|row| row.len() == num));
        prop_assert_eq!(grid.x[0], -2.0);
        prop_assert_eq!(grid.x[num - 1], 2.0);
        prop_assert_eq!(grid.y[num - 1], 3.0);
    }
}
