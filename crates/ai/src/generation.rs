//! Structured-generation contract.
//!
//! A flow describes the output it needs as an [`OutputSchema`]; the generator
//! returns a JSON object conforming to it or fails with a [`GenerationError`].

use async_trait::async_trait;
use serde_json::{json, Map, Value as JsonValue};

use crate::error::GenerationError;

/// A text-generation service constrained to a declared output schema.
///
/// Implementations must validate their output with [`OutputSchema::validate`]
/// before returning it.
#[async_trait]
pub trait StructuredGenerator: Send + Sync + 'static {
    async fn generate(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<JsonValue, GenerationError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Flat object schema: every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSchema {
    fields: Vec<SchemaField>,
}

impl OutputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, description: &'static str) -> Self {
        self.fields.push(SchemaField {
            name,
            kind: FieldKind::Text,
            description,
        });
        self
    }

    pub fn text_list(mut self, name: &'static str, description: &'static str) -> Self {
        self.fields.push(SchemaField {
            name,
            kind: FieldKind::TextList,
            description,
        });
        self
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// JSON Schema rendering of the contract.
    pub fn to_json_schema(&self) -> JsonValue {
        let mut properties = Map::new();
        for field in &self.fields {
            let property = match field.kind {
                FieldKind::Text => json!({ "type": "string", "description": field.description }),
                FieldKind::TextList => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": field.description,
                }),
            };
            properties.insert(field.name.to_string(), property);
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.fields.iter().map(|f| f.name).collect::<Vec<_>>(),
        })
    }

    /// Check that `value` is an object carrying every field with the right type.
    pub fn validate(&self, value: &JsonValue) -> Result<(), GenerationError> {
        let object = value
            .as_object()
            .ok_or_else(|| GenerationError::SchemaViolation("output is not a JSON object".to_string()))?;

        for field in &self.fields {
            let present = object
                .get(field.name)
                .ok_or_else(|| GenerationError::SchemaViolation(format!("missing field '{}'", field.name)))?;

            let ok = match field.kind {
                FieldKind::Text => present.is_string(),
                FieldKind::TextList => present
                    .as_array()
                    .is_some_and(|items| items.iter().all(JsonValue::is_string)),
            };
            if !ok {
                return Err(GenerationError::SchemaViolation(format!(
                    "field '{}' has the wrong type",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn text_field(value: &JsonValue, name: &str) -> Result<String, GenerationError> {
    value
        .get(name)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| GenerationError::SchemaViolation(format!("missing text field '{name}'")))
}

pub(crate) fn text_list_field(value: &JsonValue, name: &str) -> Result<Vec<String>, GenerationError> {
    let items = value
        .get(name)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| GenerationError::SchemaViolation(format!("missing list field '{name}'")))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| GenerationError::SchemaViolation(format!("non-text entry in '{name}'")))
        })
        .collect()
}
