use crate::catalog::{ProviderCatalog, ProviderCategory};

use super::Draft;

#[derive(Clone, Debug, Default)]
pub struct IdentityUpdate {
    pub name: Option<String>,
    pub welcome_message: Option<String>,
    pub prompt: Option<String>,
    pub use_case: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LlmUpdate {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// 语音选择的局部更新；`voice_id` / `voice_name` 传入空白字符串表示清除
#[derive(Clone, Debug, Default)]
pub struct VoiceUpdate {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub voice_id: Option<String>,
    pub voice_name: Option<String>,
    pub speed: Option<f32>,
    pub buffer_size: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct TranscriptionUpdate {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct CallPolicyUpdate {
    pub call_terminate: Option<u32>,
    pub hangup_after_silence_enabled: Option<bool>,
    pub hangup_after_silence: Option<u32>,
    pub voicemail_detection: Option<bool>,
    pub voicemail_detection_time: Option<f32>,
    pub hangup_prompt_enabled: Option<bool>,
    pub hangup_prompt: Option<String>,
    pub hangup_message: Option<String>,
    pub number_of_words_for_interruption: Option<u32>,
    pub check_user_online: Option<bool>,
    pub check_if_user_online_message: Option<String>,
    pub trigger_user_online_message_after: Option<u32>,
    pub backchanneling: Option<bool>,
    pub ambient_noise: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct PostCallUpdate {
    pub summarization_enabled: Option<bool>,
    pub summarization_prompt: Option<String>,
    pub extraction_enabled: Option<bool>,
    pub extraction_prompt: Option<String>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Draft {
    pub fn update_identity(&self, update: IdentityUpdate) -> Draft {
        let mut next = self.clone();
        let identity = &mut next.identity;
        if let Some(name) = update.name {
            identity.name = name;
        }
        if let Some(welcome_message) = update.welcome_message {
            identity.welcome_message = welcome_message;
        }
        if let Some(prompt) = update.prompt {
            identity.prompt = prompt;
        }
        if let Some(use_case) = update.use_case {
            identity.use_case = use_case.trim().to_string();
        }
        next
    }

    pub fn update_llm(&self, update: LlmUpdate, catalog: &ProviderCatalog) -> Draft {
        let mut next = self.clone();
        let llm = &mut next.llm;
        if let Some(provider) = update.provider {
            llm.choice = llm
                .choice
                .switch_provider(ProviderCategory::Llm, &provider, catalog);
        }
        if let Some(model) = update.model {
            llm.choice = llm.choice.select_model(ProviderCategory::Llm, &model, catalog);
        }
        if let Some(temperature) = update.temperature {
            llm.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            llm.max_tokens = max_tokens;
        }
        next
    }

    pub fn update_voice(&self, update: VoiceUpdate, catalog: &ProviderCatalog) -> Draft {
        let mut next = self.clone();
        let voice = &mut next.voice;
        if let Some(provider) = update.provider {
            voice.choice = voice
                .choice
                .switch_provider(ProviderCategory::Voice, &provider, catalog);
        }
        if let Some(model) = update.model {
            voice.choice = voice
                .choice
                .select_model(ProviderCategory::Voice, &model, catalog);
        }
        if let Some(voice_id) = update.voice_id {
            voice.voice_id = non_blank(voice_id);
        }
        if let Some(voice_name) = update.voice_name {
            voice.voice_name = non_blank(voice_name);
        }
        if let Some(speed) = update.speed {
            voice.speed = speed.clamp(0.5, 2.0);
        }
        if let Some(buffer_size) = update.buffer_size {
            voice.buffer_size = buffer_size;
        }
        next
    }

    pub fn update_transcription(
        &self,
        update: TranscriptionUpdate,
        catalog: &ProviderCatalog,
    ) -> Draft {
        let mut next = self.clone();
        let transcription = &mut next.transcription;
        if let Some(provider) = update.provider {
            transcription.choice = transcription.choice.switch_provider(
                ProviderCategory::Transcription,
                &provider,
                catalog,
            );
            transcription.reconcile_language(catalog);
        }
        if let Some(model) = update.model {
            transcription.choice = transcription.choice.select_model(
                ProviderCategory::Transcription,
                &model,
                catalog,
            );
        }
        if let Some(language) = update.language {
            let language = language.trim();
            if catalog.is_valid_language(transcription.choice.provider(), language) {
                transcription.language = language.to_string();
            } else {
                tracing::debug!(
                    provider = %transcription.choice.provider(),
                    language = %language,
                    "ignoring language not offered by provider"
                );
            }
        }
        if let Some(keywords) = update.keywords {
            let mut cleaned: Vec<String> = Vec::new();
            for keyword in keywords {
                let keyword = keyword.trim();
                if !keyword.is_empty() && !cleaned.iter().any(|existing| existing == keyword) {
                    cleaned.push(keyword.to_string());
                }
            }
            transcription.keywords = cleaned;
        }
        next
    }

    pub fn update_call_policy(&self, update: CallPolicyUpdate) -> Draft {
        let mut next = self.clone();
        let policy = &mut next.call_policy;
        if let Some(value) = update.call_terminate {
            policy.call_terminate = value;
        }
        if let Some(value) = update.hangup_after_silence_enabled {
            policy.hangup_after_silence_enabled = value;
        }
        if let Some(value) = update.hangup_after_silence {
            policy.hangup_after_silence = value;
        }
        if let Some(value) = update.voicemail_detection {
            policy.voicemail_detection = value;
        }
        if let Some(value) = update.voicemail_detection_time {
            policy.voicemail_detection_time = value.max(0.0);
        }
        if let Some(value) = update.hangup_prompt_enabled {
            policy.hangup_prompt_enabled = value;
        }
        if let Some(value) = update.hangup_prompt {
            policy.hangup_prompt = non_blank(value);
        }
        if let Some(value) = update.hangup_message {
            policy.hangup_message = non_blank(value);
        }
        if let Some(value) = update.number_of_words_for_interruption {
            policy.number_of_words_for_interruption = value;
        }
        if let Some(value) = update.check_user_online {
            policy.check_user_online = value;
        }
        if let Some(value) = update.check_if_user_online_message {
            policy.check_if_user_online_message = non_blank(value);
        }
        if let Some(value) = update.trigger_user_online_message_after {
            policy.trigger_user_online_message_after = value;
        }
        if let Some(value) = update.backchanneling {
            policy.backchanneling = value;
        }
        if let Some(value) = update.ambient_noise {
            policy.ambient_noise = value;
        }
        next
    }

    pub fn update_telephony(&self, provider: &str) -> Draft {
        let mut next = self.clone();
        next.telephony_provider = provider.trim().to_string();
        next
    }

    pub fn update_webhook(&self, url: Option<&str>) -> Draft {
        let mut next = self.clone();
        next.webhook_url = url.map(str::to_string).and_then(non_blank);
        next
    }

    pub fn update_post_call(&self, update: PostCallUpdate) -> Draft {
        let mut next = self.clone();
        let post_call = &mut next.post_call;
        if let Some(enabled) = update.summarization_enabled {
            post_call.summarization.enabled = enabled;
        }
        if let Some(prompt) = update.summarization_prompt {
            post_call.summarization.prompt = non_blank(prompt);
        }
        if let Some(enabled) = update.extraction_enabled {
            post_call.extraction.enabled = enabled;
        }
        if let Some(prompt) = update.extraction_prompt {
            post_call.extraction.prompt = non_blank(prompt);
        }
        next
    }
}
