use std::collections::BTreeMap;

use serde_json::Value;

use super::error::SchemaError;
use super::kind::Schema;
use super::validation::validate_value;

/// Schema 注册表，按名称排序以保证导出顺序稳定
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        if self.schemas.insert(name.clone(), schema).is_some() {
            tracing::debug!(schema = %name, "schema replaced");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn snapshot(&self) -> Vec<(String, Schema)> {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<&Schema, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotRegistered(name.to_string()))
    }

    pub fn validate(&self, name: &str, value: &Value) -> Result<(), SchemaError> {
        let schema = self.get(name)?;
        validate_value(schema, value, &mut Vec::new())
    }
}
