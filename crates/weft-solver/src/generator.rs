//! The bounded-retry orchestration across attempts and samples.

use crate::attempt::{Attempt, AttemptOutcome};
use crate::report::{AttemptRecord, RunReport, SampleOutcome, SampleReport};
use std::time::Instant;
use weft_core::{ConfigError, RunError, UnitId};
use weft_grid::Grid;
use weft_model::Propagator;

/// The seed an attempt's successor uses: one higher, wrapping to zero
/// at the maximum representable value.
pub fn next_seed(seed: u64) -> u64 {
    if seed == u64::MAX {
        0
    } else {
        seed + 1
    }
}

/// Run-level configuration shared by both models.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// Output grid width in cells.
    pub width: u32,
    /// Output grid height in cells.
    pub height: u32,
    /// Generate with a periodic (toroidal) output boundary.
    pub periodic_output: bool,
    /// Base seed of the run's deterministic seed schedule.
    pub seed: u64,
    /// Number of independent output grids to generate.
    pub sample_count: u32,
    /// Attempts allowed per sample before the sample is given up.
    /// One budget covers both models.
    pub retry_budget: u32,
    /// Record per-attempt seeds and outcomes in the run report. Off by
    /// default; the report then carries only per-sample totals.
    pub record_attempts: bool,
}

impl GeneratorOptions {
    /// Default attempts per sample.
    pub const DEFAULT_RETRY_BUDGET: u32 = 10;

    /// Options for a `width x height` output with the defaults:
    /// non-periodic output, seed 0, one sample, a retry budget of
    /// [`DEFAULT_RETRY_BUDGET`](Self::DEFAULT_RETRY_BUDGET), and no
    /// attempt recording.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            periodic_output: false,
            seed: 0,
            sample_count: 1,
            retry_budget: Self::DEFAULT_RETRY_BUDGET,
            record_attempts: false,
        }
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyOutput`], [`ConfigError::ZeroSamples`], or
    /// [`ConfigError::ZeroRetryBudget`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyOutput {
                width: self.width,
                height: self.height,
            });
        }
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.retry_budget == 0 {
            return Err(ConfigError::ZeroRetryBudget);
        }
        Ok(())
    }
}

/// Drives attempts until each requested sample collapses or exhausts
/// its retry budget.
///
/// The generator borrows the model's read-only products — propagator
/// and weights — and owns no mutable solving state itself; every
/// attempt is a fresh [`Attempt`] discarded at attempt end. Sample `i`
/// starts at seed `base + i * retry_budget` and retries step by
/// [`next_seed`], so samples own disjoint seed blocks and can be
/// generated in any order (or concurrently) with identical results.
#[derive(Clone, Debug)]
pub struct Generator<'a> {
    propagator: &'a Propagator,
    weights: &'a [f64],
    ground: Option<UnitId>,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Validate `options` and build a generator over a model's
    /// propagator and weights. `ground`, when set, is the unit the
    /// bottom output row is pinned to.
    pub fn new(
        propagator: &'a Propagator,
        weights: &'a [f64],
        ground: Option<UnitId>,
        options: GeneratorOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        debug_assert_eq!(weights.len(), propagator.unit_count() as usize);
        Ok(Self {
            propagator,
            weights,
            ground,
            options,
        })
    }

    /// The validated run options.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// First seed of a sample's block.
    pub fn sample_seed(&self, sample: u32) -> u64 {
        self.options
            .seed
            .wrapping_add(u64::from(sample) * u64::from(self.options.retry_budget))
    }

    /// Generate one sample: up to `retry_budget` attempts, each on the
    /// block's next seed. Returns the sample's report and, on success,
    /// its unit grid.
    pub fn generate_sample(&self, sample: u32) -> (SampleReport, Option<Grid<UnitId>>) {
        let start = Instant::now();
        let mut seed = self.sample_seed(sample);
        let mut attempt_log = Vec::new();

        for attempt in 0..self.options.retry_budget {
            if attempt > 0 {
                seed = next_seed(seed);
            }
            let outcome = Attempt::new(
                self.propagator,
                self.weights,
                self.options.width,
                self.options.height,
                self.options.periodic_output,
                self.ground,
                seed,
            )
            .run();
            if self.options.record_attempts {
                attempt_log.push(AttemptRecord {
                    seed,
                    succeeded: outcome.is_collapsed(),
                });
            }
            if let AttemptOutcome::Collapsed(grid) = outcome {
                let report = SampleReport {
                    sample,
                    attempts: attempt + 1,
                    outcome: SampleOutcome::Generated,
                    elapsed_us: start.elapsed().as_micros() as u64,
                    attempt_log,
                };
                return (report, Some(grid));
            }
        }

        let report = SampleReport {
            sample,
            attempts: self.options.retry_budget,
            outcome: SampleOutcome::Exhausted,
            elapsed_us: start.elapsed().as_micros() as u64,
            attempt_log,
        };
        (report, None)
    }

    /// Generate every requested sample in order.
    ///
    /// Exhausted samples are skipped (their grids are simply absent,
    /// with the report recording the exhaustion); the run fails only
    /// when no sample at all produced a grid.
    ///
    /// # Errors
    ///
    /// [`RunError::AllSamplesFailed`] when zero samples succeeded.
    pub fn generate(&self) -> Result<(Vec<Grid<UnitId>>, RunReport), RunError> {
        let start = Instant::now();
        let mut grids = Vec::with_capacity(self.options.sample_count as usize);
        let mut samples = Vec::with_capacity(self.options.sample_count as usize);
        for sample in 0..self.options.sample_count {
            let (report, grid) = self.generate_sample(sample);
            samples.push(report);
            grids.extend(grid);
        }
        if grids.is_empty() {
            return Err(RunError::AllSamplesFailed {
                samples: self.options.sample_count,
                retry_budget: self.options.retry_budget,
            });
        }
        Ok((
            grids,
            RunReport {
                total_us: start.elapsed().as_micros() as u64,
                samples,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_seed_increments_and_wraps() {
        assert_eq!(next_seed(0), 1);
        assert_eq!(next_seed(41), 42);
        assert_eq!(next_seed(u64::MAX), 0);
    }

    #[test]
    fn options_validate_rejects_degenerate_runs() {
        let mut options = GeneratorOptions::new(0, 4);
        assert!(matches!(
            options.validate().unwrap_err(),
            ConfigError::EmptyOutput { .. }
        ));

        options = GeneratorOptions::new(4, 4);
        options.sample_count = 0;
        assert_eq!(options.validate().unwrap_err(), ConfigError::ZeroSamples);

        options = GeneratorOptions::new(4, 4);
        options.retry_budget = 0;
        assert_eq!(
            options.validate().unwrap_err(),
            ConfigError::ZeroRetryBudget
        );
    }

    #[test]
    fn sample_seed_blocks_are_disjoint() {
        use weft_grid::Direction;

        let arcs = Direction::ALL.map(|d| (UnitId(0), d, UnitId(0)));
        let p = Propagator::from_arcs(1, arcs);
        let weights = [1.0];
        let mut options = GeneratorOptions::new(2, 2);
        options.seed = 5;
        options.retry_budget = 7;
        options.sample_count = 3;
        let generator = Generator::new(&p, &weights, None, options).unwrap();
        assert_eq!(generator.sample_seed(0), 5);
        assert_eq!(generator.sample_seed(1), 12);
        assert_eq!(generator.sample_seed(2), 19);
    }
}
