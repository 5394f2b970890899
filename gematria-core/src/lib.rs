//! # Core models for gematria
//!
//! Shared building blocks for the gematria workspace: the [`Chromosome`] and [`Genome`]
//! models (including the fixed descending-length order every other crate honors),
//! FASTA header scanning and the tab separated chromosome-sizes side file consumed by
//! downstream track converters.
//!
pub mod errors;
pub mod fasta;
pub mod models;
pub mod utils;

// re-expose core types
pub use errors::*;
pub use models::{Chromosome, Genome};
