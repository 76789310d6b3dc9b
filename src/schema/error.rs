use thiserror::Error;

/// Schema 错误类型
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema `{0}` not registered")]
    NotRegistered(String),
    #[error("schema validation failed at `{}`: {message}", display_path(.path))]
    Validation { message: String, path: Vec<String> },
}

impl SchemaError {
    pub(crate) fn validation(message: impl Into<String>, path: &[String]) -> Self {
        SchemaError::Validation {
            message: message.into(),
            path: path.to_vec(),
        }
    }

    /// 出错位置，例如 `agent_config.tasks.0.task_type`
    pub fn path(&self) -> Option<String> {
        match self {
            SchemaError::Validation { path, .. } => Some(display_path(path)),
            SchemaError::NotRegistered(_) => None,
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.join(".")
    }
}
