//! Run observability: wall-time and per-sample outcome metrics.
//!
//! The engine reports through returned metrics structs rather than a
//! logging facility: every run hands back a [`RunReport`], and callers
//! that want per-attempt detail opt in via
//! [`GeneratorOptions::record_attempts`](crate::GeneratorOptions).

/// Metrics for one whole run.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    /// Wall-clock time for the whole run, in microseconds.
    pub total_us: u64,
    /// One entry per requested sample, in sample order.
    pub samples: Vec<SampleReport>,
}

impl RunReport {
    /// Number of samples that produced a grid.
    pub fn generated_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.outcome == SampleOutcome::Generated)
            .count()
    }
}

/// Metrics for one requested sample.
#[derive(Clone, Debug)]
pub struct SampleReport {
    /// Zero-based sample index.
    pub sample: u32,
    /// Attempts consumed, including the successful one if any.
    pub attempts: u32,
    /// Whether the sample produced a grid.
    pub outcome: SampleOutcome,
    /// Wall-clock time spent on this sample, in microseconds.
    pub elapsed_us: u64,
    /// Per-attempt records; populated only when attempt recording is
    /// enabled, empty otherwise.
    pub attempt_log: Vec<AttemptRecord>,
}

/// How a sample ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// An attempt collapsed fully; the sample's grid was produced.
    Generated,
    /// Every attempt in the retry budget contradicted. The sample is
    /// skipped and the run continues — a warning-grade outcome, fatal
    /// only if every sample ends this way.
    Exhausted,
}

/// One attempt's seed and result, recorded when attempt recording is
/// enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Seed the attempt's RNG was constructed from.
    pub seed: u64,
    /// Whether the attempt collapsed fully.
    pub succeeded: bool,
}
