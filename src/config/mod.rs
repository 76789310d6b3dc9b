//! 构建器配置：运行时 API、draft 约束与可选的目录覆盖文件

mod env;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ProviderCatalog;
use crate::draft::DraftLimits;
use crate::error::{BuilderError, Result};
use crate::schema::{validate_schema, DRAFT_LIMITS};
use crate::utils::validation::ConfigValidator;

pub use env::{EnvConfig, DEBUG_VAR, DEFAULT_API_KEY_VAR};

pub const DEFAULT_BASE_URL: &str = "https://api.bolna.ai";
pub const AGENT_ENDPOINT: &str = "/v2/agent";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// 直接给出，或写成 `${ENV_VAR}`；留空时读取 [`DEFAULT_API_KEY_VAR`]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn resolved_api_key(&self) -> Result<String> {
        let key = EnvConfig::resolve_api_key(
            self.api_key.as_deref().unwrap_or_default(),
            DEFAULT_API_KEY_VAR,
        )?;
        ConfigValidator::validate_api_key(&key)?;
        Ok(key)
    }

    pub fn agent_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), AGENT_ENDPOINT)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuilderConfig {
    pub api: ApiConfig,
    pub limits: DraftLimits,
    pub catalog_path: Option<PathBuf>,
}

impl BuilderConfig {
    pub fn from_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|err| BuilderError::Config(format!("配置文件不是合法的 JSON: {err}")))?;
        if let Some(limits) = value.get("limits") {
            validate_schema(DRAFT_LIMITS, limits)?;
        }
        let config: BuilderConfig = serde_json::from_value(value)
            .map_err(|err| BuilderError::Config(format!("配置解析失败: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件；相对的 `catalog_path` 以配置文件所在目录为基准
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            BuilderError::Config(format!("无法读取配置文件 {}: {err}", path.display()))
        })?;
        let mut config = Self::from_str(&content)?;
        if let (Some(catalog), Some(parent)) = (config.catalog_path.as_ref(), path.parent()) {
            if catalog.is_relative() {
                config.catalog_path = Some(parent.join(catalog));
            }
        }
        tracing::debug!(path = %path.display(), "builder config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.api.base_url)?;
        if self.api.timeout_secs == 0 {
            return Err(BuilderError::Config("timeout_secs 必须大于 0".to_string()));
        }
        let limits = &self.limits;
        if !(0.0..=1.0).contains(&limits.min_faq_threshold) {
            return Err(BuilderError::Config(format!(
                "min_faq_threshold 必须在 0.0 到 1.0 之间，当前值: {}",
                limits.min_faq_threshold
            )));
        }
        if limits.max_utterances == 0 || limits.max_faqs == 0 {
            return Err(BuilderError::Config(
                "max_utterances 与 max_faqs 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 有覆盖文件时加载它，否则使用内置目录
    pub fn load_catalog(&self) -> Result<ProviderCatalog> {
        match &self.catalog_path {
            Some(path) => Ok(ProviderCatalog::from_path(path)?),
            None => Ok(ProviderCatalog::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BuilderConfig::from_str("{}").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.limits, DraftLimits::default());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiConfig {
            base_url: "https://example.test/".into(),
            ..ApiConfig::default()
        };
        assert_eq!(api.agent_endpoint(), "https://example.test/v2/agent");
    }

    #[test]
    fn limits_are_type_checked() {
        let err = BuilderConfig::from_str(r#"{"limits": {"max_faqs": "ten"}}"#).unwrap_err();
        assert!(matches!(err, BuilderError::Schema(_)));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err =
            BuilderConfig::from_str(r#"{"limits": {"min_faq_threshold": 1.5}}"#).unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = BuilderConfig::from_str(r#"{"api": {"base_url": "ftp://x"}}"#).unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }
}
