//! Draft state
//!
//! 构建器会话中正在编辑的 agent 描述。每个逻辑字段组对应一个更新操作，
//! 所有更新操作都接收 `&self` 并返回新的 [`Draft`]，调用方看不到原地修改。

mod analytics;
mod faq;
mod selection;
mod update;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderCategory};
use crate::pipeline::constants::{call_policy, llm, telephony, transcriber, voice};

pub use analytics::{AnalyticKind, AnalyticKindTag, AnalyticUpdate, CustomAnalytic, EnumValue};
pub use faq::{FaqBlock, FaqUpdate};
pub use selection::{reconcile, ProviderChoice};
pub use update::{
    CallPolicyUpdate, IdentityUpdate, LlmUpdate, PostCallUpdate, TranscriptionUpdate,
    VoiceUpdate,
};

/// FAQ / 分析项的数量与取值约束
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DraftLimits {
    pub min_faq_threshold: f32,
    pub max_utterances: usize,
    pub max_faqs: usize,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            min_faq_threshold: 0.5,
            max_utterances: 20,
            max_faqs: 20,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub welcome_message: String,
    /// 行为提示词，作为对话任务的 system prompt
    pub prompt: String,
    /// 用例标签，对应 payload 中的 `agent_type`
    pub use_case: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    #[serde(flatten)]
    pub choice: ProviderChoice,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmSettings {
    fn with_catalog(catalog: &ProviderCatalog) -> Self {
        Self {
            choice: ProviderChoice::new(ProviderCategory::Llm, llm::DEFAULT_PROVIDER, catalog),
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self::with_catalog(ProviderCatalog::builtin())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceSettings {
    #[serde(flatten)]
    pub choice: ProviderChoice,
    pub voice_id: Option<String>,
    /// 展示名称，例如 "Rachel"
    pub voice_name: Option<String>,
    pub speed: f32,
    pub buffer_size: u32,
}

impl VoiceSettings {
    fn with_catalog(catalog: &ProviderCatalog) -> Self {
        Self {
            choice: ProviderChoice::new(ProviderCategory::Voice, voice::DEFAULT_PROVIDER, catalog),
            voice_id: None,
            voice_name: None,
            speed: voice::DEFAULT_SPEED,
            buffer_size: voice::DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn has_voice(&self) -> bool {
        self.voice_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::with_catalog(ProviderCatalog::builtin())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionSettings {
    #[serde(flatten)]
    pub choice: ProviderChoice,
    pub language: String,
    /// 关键词增强
    pub keywords: Vec<String>,
}

impl TranscriptionSettings {
    fn with_catalog(catalog: &ProviderCatalog) -> Self {
        Self {
            choice: ProviderChoice::new(
                ProviderCategory::Transcription,
                transcriber::DEFAULT_PROVIDER,
                catalog,
            ),
            language: catalog
                .default_language(transcriber::DEFAULT_PROVIDER)
                .unwrap_or(transcriber::FALLBACK_LANGUAGE)
                .to_string(),
            keywords: Vec::new(),
        }
    }
}

impl TranscriptionSettings {
    /// 语言不在当前供应商列表中时回退到该供应商的默认语言
    pub(crate) fn reconcile_language(&mut self, catalog: &ProviderCatalog) {
        let provider = self.choice.provider();
        let language = reconcile(
            &self.language,
            catalog
                .languages(provider)
                .iter()
                .map(|language| language.code.as_str()),
            catalog.default_language(provider),
        );
        if language != self.language {
            tracing::debug!(
                provider = %provider,
                previous = %self.language,
                language = %language,
                "transcription language reset"
            );
            self.language = language;
        }
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self::with_catalog(ProviderCatalog::builtin())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CallPolicy {
    /// 通话总时长上限（秒）
    pub call_terminate: u32,
    pub hangup_after_silence_enabled: bool,
    pub hangup_after_silence: u32,
    pub voicemail_detection: bool,
    pub voicemail_detection_time: f32,
    pub hangup_prompt_enabled: bool,
    pub hangup_prompt: Option<String>,
    pub hangup_message: Option<String>,
    pub number_of_words_for_interruption: u32,
    pub check_user_online: bool,
    pub check_if_user_online_message: Option<String>,
    pub trigger_user_online_message_after: u32,
    pub backchanneling: bool,
    pub ambient_noise: bool,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            call_terminate: call_policy::CALL_TERMINATE_SECS,
            hangup_after_silence_enabled: true,
            hangup_after_silence: call_policy::HANGUP_AFTER_SILENCE_SECS,
            voicemail_detection: false,
            voicemail_detection_time: call_policy::VOICEMAIL_DETECTION_SECS,
            hangup_prompt_enabled: false,
            hangup_prompt: None,
            hangup_message: None,
            number_of_words_for_interruption: call_policy::NUMBER_OF_WORDS_FOR_INTERRUPTION,
            check_user_online: true,
            check_if_user_online_message: None,
            trigger_user_online_message_after: call_policy::TRIGGER_USER_ONLINE_MESSAGE_AFTER_SECS,
            backchanneling: false,
            ambient_noise: false,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskToggle {
    pub enabled: bool,
    pub prompt: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostCallSettings {
    pub summarization: TaskToggle,
    pub extraction: TaskToggle,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Draft {
    pub(crate) identity: Identity,
    pub(crate) llm: LlmSettings,
    pub(crate) voice: VoiceSettings,
    pub(crate) transcription: TranscriptionSettings,
    pub(crate) call_policy: CallPolicy,
    pub(crate) telephony_provider: String,
    pub(crate) faqs: Vec<FaqBlock>,
    pub(crate) analytics: Vec<CustomAnalytic>,
    pub(crate) webhook_url: Option<String>,
    pub(crate) post_call: PostCallSettings,
    #[serde(skip)]
    pub(crate) limits: DraftLimits,
}

impl Default for Draft {
    fn default() -> Self {
        Self::with_catalog(ProviderCatalog::builtin())
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用给定目录中的默认值创建一个空 draft
    pub fn with_catalog(catalog: &ProviderCatalog) -> Self {
        Self {
            identity: Identity::default(),
            llm: LlmSettings::with_catalog(catalog),
            voice: VoiceSettings::with_catalog(catalog),
            transcription: TranscriptionSettings::with_catalog(catalog),
            call_policy: CallPolicy::default(),
            telephony_provider: telephony::DEFAULT_PROVIDER.to_string(),
            faqs: Vec::new(),
            analytics: Vec::new(),
            webhook_url: None,
            post_call: PostCallSettings::default(),
            limits: DraftLimits::default(),
        }
    }

    /// 替换约束，并把已有 FAQ 调整到新约束之内
    pub fn with_limits(&self, limits: DraftLimits) -> Draft {
        let mut next = self.clone();
        next.faqs = next
            .faqs
            .into_iter()
            .map(|faq| faq.fitted(&limits))
            .collect();
        next.limits = limits;
        next
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn llm(&self) -> &LlmSettings {
        &self.llm
    }

    pub fn voice(&self) -> &VoiceSettings {
        &self.voice
    }

    pub fn transcription(&self) -> &TranscriptionSettings {
        &self.transcription
    }

    pub fn call_policy(&self) -> &CallPolicy {
        &self.call_policy
    }

    pub fn telephony_provider(&self) -> &str {
        &self.telephony_provider
    }

    pub fn faqs(&self) -> &[FaqBlock] {
        &self.faqs
    }

    pub fn analytics(&self) -> &[CustomAnalytic] {
        &self.analytics
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    pub fn post_call(&self) -> &PostCallSettings {
        &self.post_call
    }

    pub fn limits(&self) -> &DraftLimits {
        &self.limits
    }

    /// 从 JSON 读取；FAQ 会被调整到当前约束之内
    pub fn from_json(content: &str) -> serde_json::Result<Draft> {
        let draft: Draft = serde_json::from_str(content)?;
        let limits = draft.limits.clone();
        Ok(draft.with_limits(limits))
    }

    /// 按目录重新校正三个供应商选择与识别语言。
    ///
    /// 从文件载入的 draft 没有经过更新操作，这里对每个领域重放一次
    /// 同供应商切换：目录中有效的模型保留，否则回退到默认值。
    pub fn reconciled(&self, catalog: &ProviderCatalog) -> Draft {
        let mut next = self.clone();
        next.llm.choice = next.llm.choice.switch_provider(
            ProviderCategory::Llm,
            self.llm.choice.provider(),
            catalog,
        );
        next.voice.choice = next.voice.choice.switch_provider(
            ProviderCategory::Voice,
            self.voice.choice.provider(),
            catalog,
        );
        next.transcription.choice = next.transcription.choice.switch_provider(
            ProviderCategory::Transcription,
            self.transcription.choice.provider(),
            catalog,
        );
        next.transcription.reconcile_language(catalog);
        next
    }
}
