//! Integration tests: the generator driving real models.
//!
//! Covers the retry bound on engineered contradictions, determinism of
//! the seed schedule, and local consistency of successful unit grids.

use weft_core::RunError;
use weft_grid::{EdgeBehavior, Grid};
use weft_model::{
    NeighborRule, OverlappingModel, OverlappingOptions, Symmetry, Tile, TiledModel, TiledOptions,
};
use weft_solver::{Generator, GeneratorOptions, SampleOutcome};

fn checkerboard_model() -> OverlappingModel<u8> {
    let sample = Grid::from_vec(2, 2, vec![0u8, 1, 1, 0]).unwrap();
    let options = OverlappingOptions {
        pattern_size: 2,
        periodic_input: true,
        symmetry: 1,
        ground: false,
    };
    OverlappingModel::new(&sample, &options).unwrap()
}

/// Two tiles with no neighbor rules at all: nothing can ever sit next
/// to anything, so every attempt contradicts during initialization.
fn unsatisfiable_model() -> TiledModel<u8> {
    let tiles = vec![
        Tile::new("a", Grid::new(1, 1, 0u8), Symmetry::X, 1.0),
        Tile::new("b", Grid::new(1, 1, 1u8), Symmetry::X, 1.0),
    ];
    TiledModel::new(tiles, &[], &TiledOptions::default()).unwrap()
}

#[test]
fn retry_budget_is_exact_on_unsatisfiable_rules() {
    let model = unsatisfiable_model();
    let mut options = GeneratorOptions::new(3, 3);
    options.retry_budget = 7;
    options.record_attempts = true;
    let generator =
        Generator::new(model.propagator(), model.weights(), None, options).unwrap();

    let (report, grid) = generator.generate_sample(0);
    assert!(grid.is_none());
    assert_eq!(report.outcome, SampleOutcome::Exhausted);
    assert_eq!(report.attempts, 7);
    assert_eq!(report.attempt_log.len(), 7);
    assert!(report.attempt_log.iter().all(|a| !a.succeeded));
    // Retries walk the sample's seed block one step at a time.
    let seeds: Vec<u64> = report.attempt_log.iter().map(|a| a.seed).collect();
    assert_eq!(seeds, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn all_failed_samples_fail_the_run() {
    let model = unsatisfiable_model();
    let mut options = GeneratorOptions::new(3, 3);
    options.sample_count = 2;
    options.retry_budget = 3;
    let generator =
        Generator::new(model.propagator(), model.weights(), None, options).unwrap();

    assert_eq!(
        generator.generate().unwrap_err(),
        RunError::AllSamplesFailed {
            samples: 2,
            retry_budget: 3
        }
    );
}

#[test]
fn multiple_samples_generate_independently() {
    let model = checkerboard_model();
    let mut options = GeneratorOptions::new(4, 4);
    options.periodic_output = true;
    options.sample_count = 3;
    let generator =
        Generator::new(model.propagator(), model.weights(), None, options).unwrap();

    let (grids, report) = generator.generate().unwrap();
    assert_eq!(grids.len(), 3);
    assert_eq!(report.generated_count(), 3);
    assert_eq!(report.samples.len(), 3);
    assert!(report
        .samples
        .iter()
        .all(|s| s.outcome == SampleOutcome::Generated));
}

#[test]
fn identical_configurations_reproduce_identical_grids() {
    let model = checkerboard_model();
    let mut options = GeneratorOptions::new(6, 6);
    options.periodic_output = true;
    options.seed = 99;
    options.sample_count = 2;

    let run = |options: GeneratorOptions| {
        Generator::new(model.propagator(), model.weights(), None, options)
            .unwrap()
            .generate()
            .unwrap()
            .0
    };
    assert_eq!(run(options.clone()), run(options));
}

#[test]
fn successful_grids_are_locally_consistent() {
    let model = checkerboard_model();
    let mut options = GeneratorOptions::new(8, 6);
    options.periodic_output = true;
    options.seed = 4;
    let generator =
        Generator::new(model.propagator(), model.weights(), None, options).unwrap();

    let (grids, _) = generator.generate().unwrap();
    let grid = &grids[0];
    for (x, y, &unit) in grid.cells() {
        for (direction, nx, ny) in grid.neighbours(x, y, EdgeBehavior::Wrap) {
            assert!(
                model
                    .propagator()
                    .allowed(unit, direction)
                    .contains(grid.get(nx, ny)),
                "units {unit} and {} clash across {direction}",
                grid.get(nx, ny)
            );
        }
    }
}

#[test]
fn tiled_model_drives_the_generator_end_to_end() {
    let tiles = vec![
        Tile::new("black", Grid::new(1, 1, 0u8), Symmetry::X, 1.0),
        Tile::new("white", Grid::new(1, 1, 1u8), Symmetry::X, 1.0),
    ];
    let rules = [NeighborRule::new("black", 0, "white", 0)];
    let model = TiledModel::new(tiles, &rules, &TiledOptions::default()).unwrap();
    let generator = Generator::new(
        model.propagator(),
        model.weights(),
        None,
        GeneratorOptions::new(4, 1),
    )
    .unwrap();

    let (grids, report) = generator.generate().unwrap();
    assert_eq!(report.samples[0].attempts, 1);
    let grid = &grids[0];
    for x in 0..3 {
        assert_ne!(
            grid.get(x, 0),
            grid.get(x + 1, 0),
            "adjacent cells must alternate"
        );
    }
    assert!(grid.as_slice().iter().all(|u| u.index() < 2));
    assert_eq!(model.unit_count(), 2);
}
