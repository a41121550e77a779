//! # codehub-client
//!
//! HTTP clients for CodeHub's external collaborators. Currently one:
//! the Ollama generation backend, behind the [`GenerationBackend`] trait
//! from `codehub-core`.
//!
//! [`GenerationBackend`]: codehub_core::traits::GenerationBackend

pub mod ollama;

pub use ollama::OllamaBackend;
