//! The generation orchestrator and its saga machinery.

pub mod saga;
pub mod service;

pub use saga::{SagaError, SagaStage};
pub use service::{GenerateOutcome, GenerateRequest, GenerationService};
