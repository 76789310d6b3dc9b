use serde_json::Value;

use super::error::SchemaError;
use super::kind::{Schema, SchemaKind};

/// 递归校验，`path` 记录当前位置，出错时写入错误中
pub fn validate_value(
    schema: &Schema,
    value: &Value,
    path: &mut Vec<String>,
) -> Result<(), SchemaError> {
    if value.is_null() && schema.nullable {
        return Ok(());
    }

    match &schema.kind {
        SchemaKind::Null => expect(value.is_null(), "expected null", path),
        SchemaKind::Boolean => expect(value.is_boolean(), "expected boolean", path),
        SchemaKind::Integer => expect(
            value.is_i64() || value.is_u64(),
            "expected integer",
            path,
        ),
        SchemaKind::Number => expect(value.is_number(), "expected number", path),
        SchemaKind::String => expect(value.is_string(), "expected string", path),
        SchemaKind::Enum { values } => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaError::validation("expected string", path))?;
            if values.iter().any(|allowed| allowed == text) {
                Ok(())
            } else {
                Err(SchemaError::validation(
                    format!("`{text}` is not one of [{}]", values.join(", ")),
                    path,
                ))
            }
        }
        SchemaKind::Array { items, min_items } => {
            let array = value
                .as_array()
                .ok_or_else(|| SchemaError::validation("expected array", path))?;
            if array.len() < *min_items {
                return Err(SchemaError::validation(
                    format!("expected at least {min_items} item(s)"),
                    path,
                ));
            }
            for (idx, element) in array.iter().enumerate() {
                path.push(idx.to_string());
                validate_value(items, element, path)?;
                path.pop();
            }
            Ok(())
        }
        SchemaKind::Object {
            properties,
            required,
            additional,
        } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaError::validation("expected object", path))?;

            for key in required {
                if !object.contains_key(key) {
                    path.push(key.clone());
                    return Err(SchemaError::validation(
                        format!("missing required property `{key}`"),
                        path,
                    ));
                }
            }

            for (key, val) in object {
                path.push(key.clone());
                if let Some(sub_schema) = properties.get(key) {
                    validate_value(sub_schema, val, path)?;
                } else if !additional {
                    return Err(SchemaError::validation(
                        format!("unexpected property `{key}`"),
                        path,
                    ));
                }
                path.pop();
            }
            Ok(())
        }
        SchemaKind::Map { values } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaError::validation("expected object", path))?;
            for (key, val) in object {
                path.push(key.clone());
                validate_value(values, val, path)?;
                path.pop();
            }
            Ok(())
        }
        SchemaKind::Any => Ok(()),
    }
}

fn expect(ok: bool, message: &str, path: &[String]) -> Result<(), SchemaError> {
    if ok {
        Ok(())
    } else {
        Err(SchemaError::validation(message, path))
    }
}
