//! Entropy-driven constraint solver for the Weft generation engine.
//!
//! The solver consumes what a model produced — unit weights and the
//! [`Propagator`](weft_model::Propagator) table — and runs the
//! observe/collapse/propagate loop:
//!
//! - [`Wave`]: per-cell possibility sets with O(1) entropy bookkeeping
//! - [`Attempt`]: one disposable run from a fully-open wave to a
//!   decided grid or a contradiction
//! - [`Generator`]: the bounded-retry loop over attempts and samples,
//!   with a deterministic seed schedule
//! - [`RunReport`]: wall-time and per-sample outcome metrics
//!
//! A contradiction is not an error here: it is the normal "this random
//! walk failed" outcome, answered by a fresh attempt on the next seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attempt;
pub mod generator;
pub mod report;
pub mod wave;

pub use attempt::{Attempt, AttemptOutcome};
pub use generator::{next_seed, Generator, GeneratorOptions};
pub use report::{AttemptRecord, RunReport, SampleOutcome, SampleReport};
pub use wave::Wave;
