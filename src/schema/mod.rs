//! 结构化 schema 与全局注册表
//!
//! 编译器在序列化之后会用 [`AGENT_PAYLOAD`] 校验一遍 payload 的结构，
//! CLI 的 `schema export` 也从这里读取。

mod error;
mod kind;
mod payload;
mod registry;
mod validation;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

pub use error::SchemaError;
pub use kind::{Schema, SchemaKind};
pub use payload::{agent_payload_schema, draft_limits_schema, AGENT_PAYLOAD, DRAFT_LIMITS};
pub use registry::SchemaRegistry;
pub use validation::validate_value;

static REGISTRY: Lazy<RwLock<SchemaRegistry>> = Lazy::new(|| {
    let mut registry = SchemaRegistry::new();
    registry.register(AGENT_PAYLOAD, agent_payload_schema());
    registry.register(DRAFT_LIMITS, draft_limits_schema());
    RwLock::new(registry)
});

pub fn register_schema(name: impl Into<String>, schema: Schema) {
    REGISTRY.write().register(name, schema);
}

pub fn validate_schema(name: &str, value: &Value) -> Result<(), SchemaError> {
    REGISTRY.read().validate(name, value)
}

pub fn schemas_snapshot() -> Vec<(String, Schema)> {
    REGISTRY.read().snapshot()
}
