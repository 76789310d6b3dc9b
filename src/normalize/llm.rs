use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderCategory};
use crate::draft::LlmSettings;
use crate::pipeline::constants::{llm, post_call};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    pub agent_flow_type: String,
    pub provider: String,
    pub family: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub min_p: f32,
    pub top_k: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub request_json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_details: Option<String>,
}

impl LlmConfig {
    fn base(provider: String, family: String, model: String, max_tokens: u32, temperature: f32) -> Self {
        Self {
            agent_flow_type: llm::AGENT_FLOW_TYPE.to_string(),
            provider,
            family,
            model,
            max_tokens,
            temperature,
            top_p: llm::TOP_P,
            min_p: llm::MIN_P,
            top_k: llm::TOP_K,
            presence_penalty: llm::PRESENCE_PENALTY,
            frequency_penalty: llm::FREQUENCY_PENALTY,
            request_json: false,
            extraction_details: None,
        }
    }

    /// 通话后任务使用的轻量配置，与对话任务的用户选择无关
    pub fn lightweight() -> Self {
        Self::base(
            post_call::LLM_PROVIDER.to_string(),
            post_call::LLM_FAMILY.to_string(),
            post_call::LLM_MODEL.to_string(),
            post_call::LLM_MAX_TOKENS,
            post_call::LLM_TEMPERATURE,
        )
    }

    pub fn with_extraction(mut self, details: impl Into<String>) -> Self {
        self.extraction_details = Some(details.into());
        self.request_json = true;
        self
    }
}

pub fn normalize_llm(settings: &LlmSettings, catalog: &ProviderCatalog) -> LlmConfig {
    let provider = match settings.choice.provider().trim() {
        "" => llm::DEFAULT_PROVIDER.to_string(),
        other => other.to_lowercase(),
    };
    let model = match settings.choice.model().trim() {
        "" => catalog
            .default_variant(ProviderCategory::Llm, &provider)
            .unwrap_or_default()
            .to_string(),
        model => model.to_string(),
    };
    let family = catalog
        .find_variant(ProviderCategory::Llm, &provider, &model)
        .and_then(|variant| variant.family.clone())
        .unwrap_or_else(|| provider.clone());
    let max_tokens = if settings.max_tokens == 0 {
        llm::DEFAULT_MAX_TOKENS
    } else {
        settings.max_tokens
    };
    LlmConfig::base(provider, family, model, max_tokens, settings.temperature)
}
