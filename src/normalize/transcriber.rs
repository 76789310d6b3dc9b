use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderCategory};
use crate::draft::TranscriptionSettings;
use crate::pipeline::constants::transcriber;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriberConfig {
    pub provider: String,
    pub model: String,
    pub language: String,
    pub stream: bool,
    pub sampling_rate: u32,
    pub encoding: String,
    pub endpointing: u32,
    /// 逗号分隔的关键词增强
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

pub fn normalize_transcriber(
    settings: &TranscriptionSettings,
    catalog: &ProviderCatalog,
) -> TranscriberConfig {
    let provider = match settings.choice.provider().trim() {
        "" => transcriber::DEFAULT_PROVIDER.to_string(),
        other => other.to_lowercase(),
    };
    if catalog
        .provider(ProviderCategory::Transcription, &provider)
        .is_none()
    {
        tracing::debug!(provider = %provider, "transcription provider not in catalog");
    }

    let model = match settings.choice.model().trim() {
        "" => catalog
            .default_variant(ProviderCategory::Transcription, &provider)
            .unwrap_or_default()
            .to_string(),
        model => model.to_string(),
    };
    let language = match settings.language.trim() {
        "" => catalog
            .default_language(&provider)
            .unwrap_or(transcriber::FALLBACK_LANGUAGE)
            .to_string(),
        language => language.to_string(),
    };
    let keywords = if settings.keywords.is_empty() {
        None
    } else {
        Some(settings.keywords.join(","))
    };

    TranscriberConfig {
        provider,
        model,
        language,
        stream: true,
        sampling_rate: transcriber::SAMPLING_RATE,
        encoding: transcriber::ENCODING.to_string(),
        endpointing: transcriber::ENDPOINTING_MS,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_joined() {
        let settings = TranscriptionSettings {
            keywords: vec!["tow".into(), "jumpstart".into()],
            ..TranscriptionSettings::default()
        };
        let config = normalize_transcriber(&settings, ProviderCatalog::builtin());
        assert_eq!(config.keywords.as_deref(), Some("tow,jumpstart"));
        assert_eq!(config.provider, "deepgram");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn empty_keywords_are_omitted() {
        let config =
            normalize_transcriber(&TranscriptionSettings::default(), ProviderCatalog::builtin());
        assert!(config.keywords.is_none());
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("keywords").is_none());
    }
}
