pub mod chromosome;
pub mod genome;

// re-export for cleaner imports
pub use self::chromosome::Chromosome;
pub use self::genome::Genome;
