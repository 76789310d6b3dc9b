//! Submission client
//!
//! 编译器唯一的异步边界：把 payload 发给 agent 运行时，拿回创建结果。

#[cfg(feature = "http-client")]
mod http;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::payload::Payload;

#[cfg(feature = "http-client")]
pub use http::HttpSubmissionClient;

/// 运行时返回的新建 agent 描述
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedAgent {
    #[serde(alias = "agent_id")]
    pub id: String,
    #[serde(default = "CreatedAgent::default_status")]
    pub status: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
}

impl CreatedAgent {
    fn default_status() -> String {
        "created".to_string()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("agent service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from agent service: {0}")]
    Decode(String),
}

impl SubmissionError {
    /// 面向用户的单条横幅文案
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Network(_) => {
                "Could not reach the agent service. Check your connection and try again."
                    .to_string()
            }
            SubmissionError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            SubmissionError::Rejected { status: 401 | 403, .. } => {
                "The agent service rejected your API key.".to_string()
            }
            SubmissionError::Rejected { status, .. } => {
                format!("The agent service rejected the request (status {status}).")
            }
            SubmissionError::Decode(_) => {
                "The agent was submitted but the response could not be read.".to_string()
            }
        }
    }
}

#[async_trait]
pub trait AgentSubmitter: Send + Sync {
    async fn create_agent(&self, payload: &Payload) -> Result<CreatedAgent, SubmissionError>;
}

pub type DynSubmitter = Arc<dyn AgentSubmitter>;

/// 从错误响应体中取出可读的信息，依次查找 `message` / `error` / `detail`
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            let text = body.trim();
            return (!text.is_empty()).then(|| text.to_string());
        }
    };
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(readable))
}

fn readable(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Object(object) => object
            .get("message")
            .or_else(|| object.get("msg"))
            .and_then(readable),
        // 校验错误列表，例如 [{"loc": [...], "msg": "..."}]
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(readable).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

enum DryRunOutcome {
    Accept,
    Reject(SubmissionError),
}

/// 离线提交：记录收到的 payload，返回合成的创建结果
pub struct DryRunSubmitter {
    outcome: DryRunOutcome,
    delay: Option<Duration>,
    counter: AtomicUsize,
    received: Mutex<Vec<Value>>,
}

impl Default for DryRunSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self {
            outcome: DryRunOutcome::Accept,
            delay: None,
            counter: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// 每次提交都以给定错误失败
    pub fn rejecting(error: SubmissionError) -> Self {
        Self {
            outcome: DryRunOutcome::Reject(error),
            ..Self::new()
        }
    }

    /// 模拟网络延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().clone()
    }

    pub fn submissions(&self) -> usize {
        self.received.lock().len()
    }
}

#[async_trait]
impl AgentSubmitter for DryRunSubmitter {
    async fn create_agent(&self, payload: &Payload) -> Result<CreatedAgent, SubmissionError> {
        let value =
            serde_json::to_value(payload).map_err(|err| SubmissionError::Decode(err.to_string()))?;
        self.received.lock().push(value);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            DryRunOutcome::Reject(error) => Err(error.clone()),
            DryRunOutcome::Accept => {
                let sequence = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
                let config = &payload.agent_config;
                Ok(CreatedAgent {
                    id: format!("dry-run-{sequence}"),
                    status: CreatedAgent::default_status(),
                    agent_name: Some(config.agent_name.clone()),
                    agent_type: Some(config.agent_type.clone()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_field() {
        let body = r#"{"message": "agent name taken", "error": "conflict"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("agent name taken"));
    }

    #[test]
    fn error_message_reads_nested_and_list_details() {
        let nested = r#"{"error": {"message": "quota exceeded"}}"#;
        assert_eq!(extract_error_message(nested).as_deref(), Some("quota exceeded"));

        let list = r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#;
        assert_eq!(extract_error_message(list).as_deref(), Some("field required"));
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        assert_eq!(
            extract_error_message(" Bad Gateway ").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn server_message_wins_over_status_text() {
        let err = SubmissionError::Rejected {
            status: 401,
            message: "invalid token".into(),
        };
        assert_eq!(err.user_message(), "invalid token");

        let err = SubmissionError::Rejected {
            status: 403,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "The agent service rejected your API key.");
    }

    #[test]
    fn created_agent_accepts_agent_id_alias() {
        let agent: CreatedAgent =
            serde_json::from_str(r#"{"agent_id": "abc", "status": "created"}"#).unwrap();
        assert_eq!(agent.id, "abc");
        assert!(agent.agent_name.is_none());
    }
}
