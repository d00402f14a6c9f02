use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::warn;

use shopdesk_ai::{GenerationError, OutputSchema, StructuredGenerator};

/// Bounds every generation call; expiry becomes `GenerationError::Timeout`.
///
/// The forecast engine itself enforces no deadline, so the deadline is applied
/// here at wiring time.
pub struct TimeoutGenerator {
    inner: Arc<dyn StructuredGenerator>,
    limit: Duration,
}

impl TimeoutGenerator {
    pub fn new(inner: Arc<dyn StructuredGenerator>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl StructuredGenerator for TimeoutGenerator {
    async fn generate(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<JsonValue, GenerationError> {
        match tokio::time::timeout(self.limit, self.inner.generate(instruction, schema)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(limit_ms = self.limit.as_millis() as u64, "generation call timed out");
                Err(GenerationError::Timeout(self.limit))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Slow(Duration);

    #[async_trait]
    impl StructuredGenerator for Slow {
        async fn generate(
            &self,
            _instruction: &str,
            _schema: &OutputSchema,
        ) -> Result<JsonValue, GenerationError> {
            tokio::time::sleep(self.0).await;
            Ok(json!({ "analysis": "late" }))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_calls_time_out() {
        let generator = TimeoutGenerator::new(
            Arc::new(Slow(Duration::from_secs(60))),
            Duration::from_secs(5),
        );

        let err = generator
            .generate("forecast", &OutputSchema::new())
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Timeout(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn fast_calls_pass_through() {
        let generator = TimeoutGenerator::new(
            Arc::new(Slow(Duration::from_millis(10))),
            Duration::from_secs(5),
        );

        let value = generator.generate("forecast", &OutputSchema::new()).await.unwrap();
        assert_eq!(value["analysis"], "late");
    }
}
