//! External API integrations

pub mod gemini;

use std::future::Future;

use serde_json::Value;
use shared::DataUri;
use thiserror::Error;

pub use gemini::GeminiClient;

/// One structured-output call to a generative model
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// Rendered instruction
    pub prompt: String,
    /// Inline image sent next to the instruction
    pub media: Option<DataUri>,
    /// JSON schema the response must follow
    pub response_schema: Value,
}

/// Failure of a model call. None of these are retried.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model API key is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(String),

    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned no output")]
    EmptyResponse,

    #[error("model output is not JSON: {0}")]
    InvalidJson(String),

    #[error("model output violates the schema: {0}")]
    SchemaViolation(String),
}

/// Port to a hosted generative model with structured JSON output
pub trait GenerativeModel: Send + Sync {
    /// Returns the parsed JSON document the model produced
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<Value, GenerationError>> + Send;
}
