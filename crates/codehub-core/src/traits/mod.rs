//! Trait definitions shared across CodeHub crates.

pub mod generation;

pub use generation::GenerationBackend;
