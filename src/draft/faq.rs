use serde::{Deserialize, Serialize};

use super::{Draft, DraftLimits};

pub const DEFAULT_FAQ_THRESHOLD: f32 = 0.9;

/// FAQ / 护栏条目：命中示例话术时直接返回固定回复
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaqBlock {
    pub name: String,
    pub response: String,
    pub threshold: f32,
    pub utterances: Vec<String>,
}

impl Default for FaqBlock {
    fn default() -> Self {
        Self {
            name: String::new(),
            response: String::new(),
            threshold: DEFAULT_FAQ_THRESHOLD,
            utterances: vec![String::new()],
        }
    }
}

impl FaqBlock {
    /// 阈值夹到 `[min, 1]`，话术列表至少保留一个可编辑位置且不超过上限
    pub(crate) fn fitted(mut self, limits: &DraftLimits) -> Self {
        self.threshold = clamp_threshold(self.threshold, limits);
        if self.utterances.is_empty() {
            self.utterances.push(String::new());
        }
        self.utterances.truncate(limits.max_utterances.max(1));
        self
    }

    /// 去掉空白后的示例话术
    pub fn filled_utterances(&self) -> impl Iterator<Item = &str> {
        self.utterances
            .iter()
            .map(|utterance| utterance.trim())
            .filter(|utterance| !utterance.is_empty())
    }
}

fn clamp_threshold(threshold: f32, limits: &DraftLimits) -> f32 {
    let min = if limits.min_faq_threshold.is_nan() {
        0.0
    } else {
        limits.min_faq_threshold.clamp(0.0, 1.0)
    };
    if threshold.is_nan() {
        return min;
    }
    threshold.clamp(min, 1.0)
}

#[derive(Clone, Debug, Default)]
pub struct FaqUpdate {
    pub name: Option<String>,
    pub response: Option<String>,
    pub threshold: Option<f32>,
}

impl Draft {
    pub fn add_faq(&self) -> Draft {
        let mut next = self.clone();
        if next.faqs.len() >= next.limits.max_faqs {
            tracing::debug!(max = next.limits.max_faqs, "faq limit reached");
            return next;
        }
        next.faqs.push(FaqBlock::default().fitted(&next.limits));
        next
    }

    pub fn update_faq(&self, index: usize, update: FaqUpdate) -> Draft {
        let mut next = self.clone();
        let limits = next.limits.clone();
        let Some(faq) = next.faqs.get_mut(index) else {
            tracing::debug!(index, "faq index out of range");
            return next;
        };
        if let Some(name) = update.name {
            faq.name = name;
        }
        if let Some(response) = update.response {
            faq.response = response;
        }
        if let Some(threshold) = update.threshold {
            faq.threshold = clamp_threshold(threshold, &limits);
        }
        next
    }

    pub fn remove_faq(&self, index: usize) -> Draft {
        let mut next = self.clone();
        if index < next.faqs.len() {
            next.faqs.remove(index);
        }
        next
    }

    pub fn add_utterance(&self, faq_index: usize) -> Draft {
        let mut next = self.clone();
        let max = next.limits.max_utterances;
        if let Some(faq) = next.faqs.get_mut(faq_index) {
            if faq.utterances.len() < max {
                faq.utterances.push(String::new());
            } else {
                tracing::debug!(faq_index, max, "utterance limit reached");
            }
        }
        next
    }

    pub fn set_utterance(&self, faq_index: usize, utterance_index: usize, text: &str) -> Draft {
        let mut next = self.clone();
        if let Some(slot) = next
            .faqs
            .get_mut(faq_index)
            .and_then(|faq| faq.utterances.get_mut(utterance_index))
        {
            *slot = text.to_string();
        }
        next
    }

    /// 删除话术；删到最后一个时保留一个空位
    pub fn remove_utterance(&self, faq_index: usize, utterance_index: usize) -> Draft {
        let mut next = self.clone();
        if let Some(faq) = next.faqs.get_mut(faq_index) {
            if utterance_index < faq.utterances.len() {
                faq.utterances.remove(utterance_index);
            }
            if faq.utterances.is_empty() {
                faq.utterances.push(String::new());
            }
        }
        next
    }
}
