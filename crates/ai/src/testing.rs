//! Call-counting generator stub shared by the flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::GenerationError;
use crate::generation::{OutputSchema, StructuredGenerator};

pub(crate) struct StubGenerator {
    response: Result<JsonValue, GenerationError>,
    calls: AtomicUsize,
    last_instruction: Mutex<Option<String>>,
}

impl StubGenerator {
    pub(crate) fn returning(value: JsonValue) -> Self {
        Self::with(Ok(value))
    }

    pub(crate) fn failing(error: GenerationError) -> Self {
        Self::with(Err(error))
    }

    fn with(response: Result<JsonValue, GenerationError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_instruction: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_instruction(&self) -> String {
        self.last_instruction.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl StructuredGenerator for StubGenerator {
    async fn generate(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<JsonValue, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
        let value = self.response.clone()?;
        schema.validate(&value)?;
        Ok(value)
    }
}
