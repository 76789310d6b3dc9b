use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderCategory};
use crate::draft::VoiceSettings;
use crate::pipeline::constants::voice;

/// 运行时对所有供应商统一的六字段 provider_config
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SynthesizerProviderConfig {
    pub voice: String,
    pub voice_id: String,
    pub model: String,
    pub speed: f32,
    pub temperature: f32,
    pub similarity_boost: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SynthesizerConfig {
    pub provider: String,
    pub provider_config: SynthesizerProviderConfig,
    pub stream: bool,
    pub buffer_size: u32,
    pub audio_format: String,
    pub caching: bool,
    /// draft 中没有选定语音，`voice_id` 是占位值
    #[serde(skip)]
    pub placeholder_voice: bool,
}

impl SynthesizerConfig {
    /// 归一化失败时使用的占位配置
    pub fn placeholder() -> Self {
        let settings = VoiceSettings::default();
        Self {
            provider: voice::DEFAULT_PROVIDER.to_string(),
            provider_config: fallback(&settings),
            stream: true,
            buffer_size: voice::DEFAULT_BUFFER_SIZE,
            audio_format: voice::AUDIO_FORMAT.to_string(),
            caching: true,
            placeholder_voice: true,
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.placeholder_voice
            && !self.provider.trim().is_empty()
            && !self.provider_config.voice_id.trim().is_empty()
    }
}

/// 语音供应商标签；未知 id 落到 [`VoiceProviderKind::Other`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoiceProviderKind {
    ElevenLabs,
    Cartesia,
    Polly,
    AzureTts,
    Deepgram,
    Other(String),
}

impl VoiceProviderKind {
    /// 运行时区分大小写，只接受小写 id
    pub fn from_identifier(identifier: &str) -> Self {
        let lowered = identifier.trim().to_lowercase();
        match lowered.as_str() {
            "elevenlabs" => VoiceProviderKind::ElevenLabs,
            "cartesia" => VoiceProviderKind::Cartesia,
            "polly" => VoiceProviderKind::Polly,
            "azuretts" => VoiceProviderKind::AzureTts,
            "deepgram" => VoiceProviderKind::Deepgram,
            _ => VoiceProviderKind::Other(lowered),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            VoiceProviderKind::ElevenLabs => "elevenlabs",
            VoiceProviderKind::Cartesia => "cartesia",
            VoiceProviderKind::Polly => "polly",
            VoiceProviderKind::AzureTts => "azuretts",
            VoiceProviderKind::Deepgram => "deepgram",
            VoiceProviderKind::Other(identifier) => identifier,
        }
    }

    pub fn provider_config(
        &self,
        settings: &VoiceSettings,
        catalog: &ProviderCatalog,
    ) -> SynthesizerProviderConfig {
        match self {
            VoiceProviderKind::ElevenLabs => elevenlabs(settings, catalog),
            VoiceProviderKind::Cartesia => cartesia(settings, catalog),
            VoiceProviderKind::Polly => polly(settings, catalog),
            VoiceProviderKind::AzureTts => azuretts(settings, catalog),
            VoiceProviderKind::Deepgram => deepgram(settings, catalog),
            VoiceProviderKind::Other(identifier) => {
                tracing::debug!(provider = %identifier, "no voice normalizer for provider, using default shape");
                fallback(settings)
            }
        }
    }
}

pub fn normalize_voice(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerConfig {
    let kind = VoiceProviderKind::from_identifier(settings.choice.provider());
    let provider = if kind.identifier().is_empty() {
        voice::DEFAULT_PROVIDER.to_string()
    } else {
        kind.identifier().to_string()
    };
    SynthesizerConfig {
        provider_config: kind.provider_config(settings, catalog),
        provider,
        stream: true,
        buffer_size: if settings.buffer_size == 0 {
            voice::DEFAULT_BUFFER_SIZE
        } else {
            settings.buffer_size
        },
        audio_format: voice::AUDIO_FORMAT.to_string(),
        caching: true,
        placeholder_voice: !settings.has_voice(),
    }
}

fn elevenlabs(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerProviderConfig {
    uniform(settings, catalog_model(settings, "elevenlabs", catalog), "Rachel")
}

fn cartesia(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerProviderConfig {
    uniform(settings, catalog_model(settings, "cartesia", catalog), "Cartesia Voice")
}

fn polly(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerProviderConfig {
    uniform(settings, catalog_model(settings, "polly", catalog), "Joanna")
}

fn azuretts(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerProviderConfig {
    uniform(settings, catalog_model(settings, "azuretts", catalog), "en-US-JennyNeural")
}

fn deepgram(settings: &VoiceSettings, catalog: &ProviderCatalog) -> SynthesizerProviderConfig {
    uniform(settings, catalog_model(settings, "deepgram", catalog), "Asteria")
}

/// 默认分支：唯一会填入占位模型 id 的地方
fn fallback(settings: &VoiceSettings) -> SynthesizerProviderConfig {
    let model = non_blank(settings.choice.model())
        .unwrap_or(voice::PLACEHOLDER_MODEL)
        .to_string();
    uniform(settings, model, voice::PLACEHOLDER_VOICE_NAME)
}

fn catalog_model(settings: &VoiceSettings, provider: &str, catalog: &ProviderCatalog) -> String {
    non_blank(settings.choice.model())
        .or_else(|| catalog.default_variant(ProviderCategory::Voice, provider))
        .unwrap_or_default()
        .to_string()
}

fn uniform(settings: &VoiceSettings, model: String, default_name: &str) -> SynthesizerProviderConfig {
    let voice_id = settings.voice_id.as_deref().and_then(non_blank);
    let voice_name = settings
        .voice_name
        .as_deref()
        .and_then(non_blank)
        .or(voice_id)
        .unwrap_or(default_name);
    SynthesizerProviderConfig {
        voice: voice_name.to_string(),
        voice_id: voice_id.unwrap_or(voice::PLACEHOLDER_VOICE_ID).to_string(),
        model,
        speed: if settings.speed > 0.0 {
            settings.speed
        } else {
            voice::DEFAULT_SPEED
        },
        temperature: voice::FIXED_TEMPERATURE,
        similarity_boost: voice::FIXED_SIMILARITY_BOOST,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ProviderChoice;

    #[test]
    fn identifier_is_lowercased() {
        assert_eq!(
            VoiceProviderKind::from_identifier("ElevenLabs"),
            VoiceProviderKind::ElevenLabs
        );
        assert_eq!(
            VoiceProviderKind::from_identifier(" AcmeVoice "),
            VoiceProviderKind::Other("acmevoice".to_string())
        );
    }

    #[test]
    fn placeholder_model_only_on_default_branch() {
        let catalog = ProviderCatalog::builtin();
        let settings = VoiceSettings {
            choice: ProviderChoice::new(ProviderCategory::Voice, "acme", catalog),
            ..VoiceSettings::default()
        };
        assert_eq!(settings.choice.model(), "");

        let known = VoiceProviderKind::Cartesia.provider_config(&settings, catalog);
        assert_eq!(known.model, "sonic-2");

        let unknown = VoiceProviderKind::Other("acme".into()).provider_config(&settings, catalog);
        assert_eq!(unknown.model, voice::PLACEHOLDER_MODEL);
    }

    #[test]
    fn placeholder_is_not_usable_without_voice() {
        assert!(!SynthesizerConfig::placeholder().is_usable());
        let config = normalize_voice(&VoiceSettings::default(), ProviderCatalog::builtin());
        assert!(config.placeholder_voice);
        assert!(!config.is_usable());
    }

    #[test]
    fn voice_named_like_the_placeholder_is_still_usable() {
        let catalog = ProviderCatalog::builtin();
        let settings = VoiceSettings {
            choice: ProviderChoice::new(ProviderCategory::Voice, "polly", catalog),
            voice_id: Some(voice::PLACEHOLDER_VOICE_ID.to_string()),
            ..VoiceSettings::default()
        };
        let config = normalize_voice(&settings, catalog);
        assert_eq!(config.provider, "polly");
        assert!(config.is_usable());
    }
}
