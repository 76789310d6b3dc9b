use std::env;

use crate::error::{BuilderError, Result};

pub const DEFAULT_API_KEY_VAR: &str = "AGENTBUILDER_API_KEY";
pub const DEBUG_VAR: &str = "AGENTBUILDER_DEBUG";

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 解析 API Key
    ///
    /// 优先级：
    /// 1. `${VAR_NAME}` 形式时读取对应环境变量
    /// 2. 为空或仍是 `your_...` 占位值时读取 `default_env_var`
    /// 3. 其他情况原样返回
    pub fn resolve_api_key(api_key: &str, default_env_var: &str) -> Result<String> {
        let api_key = api_key.trim();
        if let Some(name) = api_key
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Self::get_env(name)
        } else if api_key.is_empty() || api_key.starts_with("your_") {
            Self::get_env(default_env_var)
        } else {
            Ok(api_key.to_string())
        }
    }

    pub fn get_env(key: &str) -> Result<String> {
        Self::get_env_optional(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                BuilderError::Config(format!(
                    "环境变量 '{key}' 未设置。请在环境中设置或在配置文件中提供 api_key。"
                ))
            })
    }

    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok()
    }

    pub fn is_debug_mode() -> bool {
        Self::get_env_optional(DEBUG_VAR).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_key_is_returned() {
        let key = EnvConfig::resolve_api_key("bn-1234567890abcdef", "AGENTBUILDER_TEST_UNSET");
        assert_eq!(key.unwrap(), "bn-1234567890abcdef");
    }

    #[test]
    fn braced_key_reads_env() {
        env::set_var("AGENTBUILDER_TEST_BRACED", "from-env");
        let key = EnvConfig::resolve_api_key("${AGENTBUILDER_TEST_BRACED}", "UNUSED");
        assert_eq!(key.unwrap(), "from-env");
        env::remove_var("AGENTBUILDER_TEST_BRACED");
    }

    #[test]
    fn placeholder_falls_back_to_default_var() {
        env::set_var("AGENTBUILDER_TEST_DEFAULT", "default-value");
        let key = EnvConfig::resolve_api_key("your_api_key_here", "AGENTBUILDER_TEST_DEFAULT");
        assert_eq!(key.unwrap(), "default-value");
        env::remove_var("AGENTBUILDER_TEST_DEFAULT");
    }

    #[test]
    fn missing_env_is_config_error() {
        let err = EnvConfig::resolve_api_key("", "AGENTBUILDER_TEST_MISSING").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }
}
