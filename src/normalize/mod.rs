//! Provider config normalizer
//!
//! 把 draft 中与供应商无关的选择转换成运行时要求的供应商配置。
//! 相同的 draft 输入总是得到相同的输出，不依赖任何可变的全局状态。

mod llm;
mod transcriber;
mod voice;

use serde::Serialize;

use crate::catalog::ProviderCatalog;
use crate::draft::Draft;

pub use llm::{normalize_llm, LlmConfig};
pub use transcriber::{normalize_transcriber, TranscriberConfig};
pub use voice::{normalize_voice, SynthesizerConfig, SynthesizerProviderConfig, VoiceProviderKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Llm,
    Voice,
    Transcription,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ProviderConfig {
    Llm(LlmConfig),
    Voice(SynthesizerConfig),
    Transcription(TranscriberConfig),
}

/// 使用内置目录归一化
pub fn normalize(domain: Domain, draft: &Draft) -> ProviderConfig {
    normalize_with(domain, draft, ProviderCatalog::builtin())
}

pub fn normalize_with(domain: Domain, draft: &Draft, catalog: &ProviderCatalog) -> ProviderConfig {
    match domain {
        Domain::Llm => ProviderConfig::Llm(normalize_llm(&draft.llm, catalog)),
        Domain::Voice => ProviderConfig::Voice(normalize_voice(&draft.voice, catalog)),
        Domain::Transcription => {
            ProviderConfig::Transcription(normalize_transcriber(&draft.transcription, catalog))
        }
    }
}
