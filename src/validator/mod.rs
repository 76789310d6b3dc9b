//! Tab validator
//!
//! 每个向导标签页的必填项检查（阻断导航与提交）以及跨字段的提示性检查
//! （不阻断，只作为 `warnings` 返回）。纯函数，不会 panic。

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::draft::{AnalyticKind, Draft};
use crate::utils::validation::ConfigValidator;

/// 构建器的标签页，顺序即导航顺序
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderTab {
    Identity,
    Llm,
    Voice,
    Transcription,
    CallPolicy,
    Faqs,
    Analytics,
    Telephony,
    PostCall,
}

impl BuilderTab {
    pub const ALL: [BuilderTab; 9] = [
        BuilderTab::Identity,
        BuilderTab::Llm,
        BuilderTab::Voice,
        BuilderTab::Transcription,
        BuilderTab::CallPolicy,
        BuilderTab::Faqs,
        BuilderTab::Analytics,
        BuilderTab::Telephony,
        BuilderTab::PostCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderTab::Identity => "identity",
            BuilderTab::Llm => "llm",
            BuilderTab::Voice => "voice",
            BuilderTab::Transcription => "transcription",
            BuilderTab::CallPolicy => "call_policy",
            BuilderTab::Faqs => "faqs",
            BuilderTab::Analytics => "analytics",
            BuilderTab::Telephony => "telephony",
            BuilderTab::PostCall => "post_call",
        }
    }

    pub fn next(&self) -> Option<BuilderTab> {
        let position = Self::ALL.iter().position(|tab| tab == self)?;
        Self::ALL.get(position + 1).copied()
    }

    /// 提交前必须重新检查的标签页
    fn is_required(&self) -> bool {
        matches!(self, BuilderTab::Identity | BuilderTab::Voice)
    }
}

impl fmt::Display for BuilderTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuilderTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        BuilderTab::ALL
            .iter()
            .copied()
            .find(|tab| tab.as_str() == normalized)
            .ok_or_else(|| format!("unknown tab `{value}`"))
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct TabValidation {
    pub valid: bool,
    pub field_errors: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<String, String>,
}

impl TabValidation {
    fn from_findings(
        field_errors: BTreeMap<String, String>,
        warnings: BTreeMap<String, String>,
    ) -> Self {
        Self {
            valid: field_errors.is_empty(),
            field_errors,
            warnings,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct SubmitValidation {
    pub valid: bool,
    pub field_errors: BTreeMap<String, String>,
    /// 第一个存在错误的标签页，用于把焦点切过去
    pub first_invalid_tab: Option<BuilderTab>,
}

pub fn validate(tab: BuilderTab, draft: &Draft) -> TabValidation {
    let errors = required_errors(tab, draft);
    let warnings = advisory_warnings(tab, draft);
    TabValidation::from_findings(errors, warnings)
}

/// 提交前校验：无论当前在哪个标签页，都重新检查身份与语音
pub fn validate_for_submit(draft: &Draft) -> SubmitValidation {
    let mut field_errors = BTreeMap::new();
    let mut first_invalid_tab = None;
    for tab in BuilderTab::ALL.iter().copied().filter(BuilderTab::is_required) {
        let errors = required_errors(tab, draft);
        if !errors.is_empty() && first_invalid_tab.is_none() {
            first_invalid_tab = Some(tab);
        }
        field_errors.extend(errors);
    }
    SubmitValidation {
        valid: field_errors.is_empty(),
        field_errors,
        first_invalid_tab,
    }
}

fn required_errors(tab: BuilderTab, draft: &Draft) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    match tab {
        BuilderTab::Identity => {
            if draft.identity.name.trim().is_empty() {
                errors.insert("name".to_string(), "Agent name is required".to_string());
            }
            if draft.identity.prompt.trim().is_empty() {
                errors.insert("prompt".to_string(), "Agent prompt is required".to_string());
            }
        }
        BuilderTab::Voice => {
            if !draft.voice.has_voice() {
                errors.insert("voice_id".to_string(), "Please select a voice".to_string());
            }
        }
        _ => {}
    }
    errors
}

fn advisory_warnings(tab: BuilderTab, draft: &Draft) -> BTreeMap<String, String> {
    let mut warnings = BTreeMap::new();
    match tab {
        BuilderTab::Identity => {
            if let Err(err) = ConfigValidator::validate_agent_name(&draft.identity.name) {
                if !draft.identity.name.trim().is_empty() {
                    warnings.insert("name".to_string(), err.to_string());
                }
            }
            if draft.identity.welcome_message.trim().is_empty() {
                warnings.insert(
                    "welcome_message".to_string(),
                    "No welcome message; the agent will wait for the caller to speak".to_string(),
                );
            }
        }
        BuilderTab::Llm => {
            if let Err(err) = ConfigValidator::validate_temperature(draft.llm.temperature) {
                warnings.insert("temperature".to_string(), err.to_string());
            }
            if draft.llm.max_tokens == 0 {
                warnings.insert(
                    "max_tokens".to_string(),
                    "Token budget of 0 falls back to the default".to_string(),
                );
            }
        }
        BuilderTab::CallPolicy => {
            let policy = &draft.call_policy;
            if policy.call_terminate == 0 {
                warnings.insert(
                    "call_terminate".to_string(),
                    "Termination timeout of 0 falls back to the default".to_string(),
                );
            }
            if policy.hangup_prompt_enabled && policy.hangup_prompt.is_none() {
                warnings.insert(
                    "hangup_prompt".to_string(),
                    "Hangup prompt enabled without text; the default prompt is used".to_string(),
                );
            }
        }
        BuilderTab::Faqs => {
            for (index, faq) in draft.faqs.iter().enumerate() {
                if faq.name.trim().is_empty() {
                    warnings.insert(format!("faqs[{index}].name"), "FAQ name is empty".to_string());
                }
                if faq.response.trim().is_empty() {
                    warnings.insert(
                        format!("faqs[{index}].response"),
                        "FAQ response is empty".to_string(),
                    );
                }
                if faq.filled_utterances().next().is_none() {
                    warnings.insert(
                        format!("faqs[{index}].utterances"),
                        "FAQ has no example utterances".to_string(),
                    );
                }
            }
        }
        BuilderTab::Analytics => {
            let mut seen = HashSet::new();
            for (index, analytic) in draft.analytics.iter().enumerate() {
                let key = analytic.key.trim();
                if key.is_empty() {
                    warnings.insert(
                        format!("analytics[{index}].key"),
                        "Analytic key is empty".to_string(),
                    );
                } else if !seen.insert(key) {
                    warnings.insert(
                        format!("analytics[{index}].key"),
                        format!("Duplicate analytic key `{key}`"),
                    );
                }
                if let AnalyticKind::NumericRange { min, max } = analytic.kind {
                    if min > max {
                        warnings.insert(
                            format!("analytics[{index}].range"),
                            format!("Minimum {min} is greater than maximum {max}"),
                        );
                    }
                }
            }
        }
        BuilderTab::PostCall => {
            if let Some(url) = &draft.webhook_url {
                if let Err(err) = ConfigValidator::validate_url(url) {
                    warnings.insert("webhook_url".to_string(), err.to_string());
                }
            }
            if draft.post_call.extraction.enabled && draft.post_call.extraction.prompt.is_none() {
                warnings.insert(
                    "extraction_prompt".to_string(),
                    "Extraction enabled without a prompt; the default prompt is used".to_string(),
                );
            }
        }
        BuilderTab::Voice | BuilderTab::Transcription | BuilderTab::Telephony => {}
    }
    warnings
}
