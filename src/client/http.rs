use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use super::{extract_error_message, AgentSubmitter, CreatedAgent, SubmissionError};
use crate::config::ApiConfig;
use crate::error::{BuilderError, Result};
use crate::payload::Payload;

/// 通过运行时的 REST 接口创建 agent
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|err| BuilderError::Config(format!("无法创建 HTTP 客户端: {err}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// 从配置创建，API Key 在这里解析
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.agent_endpoint(),
            config.resolved_api_key()?,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentSubmitter for HttpSubmissionClient {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint, agent = %payload.agent_config.agent_name))]
    async fn create_agent(&self, payload: &Payload) -> std::result::Result<CreatedAgent, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|err| SubmissionError::Network(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SubmissionError::Network(err.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_default();
            tracing::warn!(status = status.as_u16(), message = %message, "agent submission rejected");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedAgent =
            serde_json::from_str(&body).map_err(|err| SubmissionError::Decode(err.to_string()))?;
        tracing::info!(agent_id = %created.id, status = %created.status, "agent created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_builds_agent_endpoint() {
        let config = ApiConfig {
            base_url: "https://agents.example.test".into(),
            api_key: Some("bn-0123456789abcdef0123".into()),
            timeout_secs: 5,
        };
        let client = HttpSubmissionClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://agents.example.test/v2/agent");
    }

    #[test]
    fn placeholder_key_is_rejected() {
        std::env::remove_var("AGENTBUILDER_API_KEY");
        let config = ApiConfig {
            api_key: Some("your_api_key".into()),
            ..ApiConfig::default()
        };
        assert!(HttpSubmissionClient::from_config(&config).is_err());
    }
}
