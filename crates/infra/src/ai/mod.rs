//! Adapters for the structured-generation service.
//!
//! Failures are surfaced as `GenerationError`; nothing here retries.

pub mod gemini;
pub mod timeout;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use timeout::TimeoutGenerator;
