use std::collections::BTreeMap;

use thiserror::Error;

use crate::client::SubmissionError;
use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, BuilderError>;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("draft failed validation: {}", summarize(.field_errors))]
    Validation {
        field_errors: BTreeMap<String, String>,
    },
    #[error("a submission for this draft is already in flight")]
    SubmissionInFlight,
    #[error("builder session is closed")]
    SessionClosed,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuilderError {
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            BuilderError::Validation { field_errors } => Some(field_errors),
            _ => None,
        }
    }
}

fn summarize(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
