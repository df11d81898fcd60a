//! Shape check for page-info records before they leave the process.
//!
//! Every collector field is compiled into its own JSON Schema validator so a
//! rejected record reports all offending fields at once, in schema order.

use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::PageInfo;

/// Collector field names and the JSON Schema each value must satisfy.
fn page_info_schema() -> Vec<(&'static str, Value)> {
    let string = || json!({"type": "string"});
    let number = || json!({"type": "number"});
    let integer = || json!({"type": "integer"});

    vec![
        ("url", string()),
        ("path", string()),
        ("questionId", integer()),
        ("title", string()),
        ("question", string()),
        ("creationDate", number()),
        ("tags", json!({"type": "array", "items": {"type": "string"}})),
        ("bestAnswerId", integer()),
        ("bestAnswer", string()),
        ("bestAnswerCreationDate", number()),
        ("bestAnswerScore", integer()),
    ]
}

/// Validates page-info records against the collector schema.
pub struct PageInfoValidator {
    fields: Vec<(&'static str, jsonschema::Validator)>,
}

impl PageInfoValidator {
    pub fn new() -> Result<Self, AppError> {
        let fields = page_info_schema()
            .into_iter()
            .map(|(name, schema)| {
                jsonschema::validator_for(&schema)
                    .map(|validator| (name, validator))
                    .map_err(|e| AppError::ConfigError(format!("Invalid schema for {name}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }

    /// Names of every field the collector expects, in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Validate a typed record.
    pub fn validate(&self, page_info: &PageInfo) -> Result<(), AppError> {
        self.validate_value(&serde_json::to_value(page_info)?)
    }

    /// Validate an arbitrary JSON record, e.g. one read back from disk.
    ///
    /// Fails with [`AppError::SchemaError`] listing every field that is absent
    /// or of the wrong type. A non-object record violates every field.
    pub fn validate_value(&self, record: &Value) -> Result<(), AppError> {
        let violations: Vec<String> = self
            .fields
            .iter()
            .filter(|(name, validator)| {
                record
                    .get(*name)
                    .is_none_or(|value| !validator.is_valid(value))
            })
            .map(|(name, _)| name.to_string())
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::SchemaError { violations })
        }
    }
}
