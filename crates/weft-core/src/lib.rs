//! Core types for the Weft generation engine.
//!
//! This is the leaf crate with zero external dependencies. It defines the
//! unit identifier newtype, the RGB output value type, and the error
//! taxonomy shared by the model and solver crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod id;

pub use color::Rgb;
pub use error::{ConfigError, RunError};
pub use id::UnitId;
