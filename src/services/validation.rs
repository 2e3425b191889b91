use crate::errors::AdsError;
use serde_json::{Map, Value};

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_object(&self, value: &Value, label: &str) -> Result<Map<String, Value>, AdsError> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| AdsError::invalid_params(format!("{} must be a JSON object", label)))
    }

    /// Mandatory keys for a create definition; the first absent one fails.
    pub fn require_fields(
        &self,
        definition: &Map<String, Value>,
        fields: &[&str],
        element: &str,
    ) -> Result<(), AdsError> {
        for field in fields {
            if !definition.contains_key(*field) {
                return Err(AdsError::missing_field(field, element));
            }
        }
        Ok(())
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}
