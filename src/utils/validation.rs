use crate::error::{BuilderError, Result};

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证 API Key 格式
    pub fn validate_api_key(api_key: &str) -> Result<()> {
        if api_key.trim().is_empty() {
            return Err(BuilderError::Config("API Key 不能为空".to_string()));
        }

        if api_key.starts_with("your_") || api_key.starts_with("bn-") && api_key.len() < 20 {
            return Err(BuilderError::Config(
                "API Key 看起来是占位符，请提供真实的 API Key".to_string(),
            ));
        }

        Ok(())
    }

    /// 验证 URL 格式
    pub fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(BuilderError::Config("URL 不能为空".to_string()));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BuilderError::Config(
                "URL 必须以 http:// 或 https:// 开头".to_string(),
            ));
        }

        if url.chars().any(char::is_whitespace) {
            return Err(BuilderError::Config("URL 不能包含空白字符".to_string()));
        }

        Ok(())
    }

    /// 验证 agent 名称
    pub fn validate_agent_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(BuilderError::Config("agent 名称不能为空".to_string()));
        }

        if name.chars().count() > 100 {
            return Err(BuilderError::Config(
                "agent 名称过长（最多 100 字符）".to_string(),
            ));
        }

        Ok(())
    }

    /// 验证温度参数
    pub fn validate_temperature(temperature: f32) -> Result<()> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(BuilderError::Config(format!(
                "温度参数必须在 0.0 到 2.0 之间，当前值: {}",
                temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key() {
        assert!(ConfigValidator::validate_api_key("").is_err());
        assert!(ConfigValidator::validate_api_key("your_api_key_here").is_err());
        assert!(ConfigValidator::validate_api_key("bn-short").is_err());
        assert!(ConfigValidator::validate_api_key("bn-1234567890abcdef1234567890").is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("").is_err());
        assert!(ConfigValidator::validate_url("example.com").is_err());
        assert!(ConfigValidator::validate_url("https://exa mple.com").is_err());
        assert!(ConfigValidator::validate_url("http://example.com").is_ok());
        assert!(ConfigValidator::validate_url("https://example.com").is_ok());
    }

    #[test]
    fn test_validate_agent_name() {
        assert!(ConfigValidator::validate_agent_name("  ").is_err());
        assert!(ConfigValidator::validate_agent_name(&"x".repeat(101)).is_err());
        assert!(ConfigValidator::validate_agent_name("Roadside Helper").is_ok());
    }

    #[test]
    fn test_validate_temperature() {
        assert!(ConfigValidator::validate_temperature(-0.1).is_err());
        assert!(ConfigValidator::validate_temperature(0.0).is_ok());
        assert!(ConfigValidator::validate_temperature(1.0).is_ok());
        assert!(ConfigValidator::validate_temperature(2.0).is_ok());
        assert!(ConfigValidator::validate_temperature(2.1).is_err());
    }
}
