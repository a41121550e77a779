//! Generation backend trait for pluggable code generation providers.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for external code generation backends.
///
/// The trait is defined here in `codehub-core` and implemented in
/// `codehub-client` (Ollama over HTTP) and by test fakes. The contract
/// is a single synchronous call: one prompt in, one generated text out.
/// Implementations must bound the call with a timeout; a timed-out call
/// fails like any other backend failure.
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "ollama").
    fn backend_type(&self) -> &str;

    /// Return the model name used for generation, for provenance records.
    fn model(&self) -> &str;

    /// Generate text from a prompt.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
