use std::sync::Arc;

use shopdesk_ai::{ForecastEngine, StructuredGenerator};
use shopdesk_infra::{
    ai::{GeminiGenerator, TimeoutGenerator},
    inventory_store::InMemoryInventoryStore,
};
use shopdesk_inventory::InventoryStore;

use crate::config::AppConfig;

/// Explicitly constructed collaborator handles shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn InventoryStore>,
    generator: Arc<dyn StructuredGenerator>,
    forecast: ForecastEngine,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>, generator: Arc<dyn StructuredGenerator>) -> Self {
        Self {
            store,
            forecast: ForecastEngine::new(generator.clone()),
            generator,
        }
    }

    pub fn store(&self) -> &dyn InventoryStore {
        self.store.as_ref()
    }

    pub fn generator(&self) -> &dyn StructuredGenerator {
        self.generator.as_ref()
    }

    pub fn forecast(&self) -> &ForecastEngine {
        &self.forecast
    }
}

/// Production wiring: in-memory inventory store + Gemini behind a deadline.
pub fn build_services(config: &AppConfig) -> AppServices {
    let gemini = Arc::new(GeminiGenerator::new(config.generation.clone()));
    let generator = Arc::new(TimeoutGenerator::new(gemini, config.generation_timeout));

    tracing::info!(
        model = %config.generation.model,
        timeout_secs = config.generation_timeout.as_secs(),
        "services initialized"
    );

    AppServices::new(Arc::new(InMemoryInventoryStore::new()), generator)
}
