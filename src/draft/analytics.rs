use serde::{Deserialize, Serialize};

use super::Draft;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumValue {
    pub value: String,
    #[serde(default)]
    pub criteria: String,
}

/// 分析项类型；类型专属参数随变体一起存放，切换类型即清空另一种参数
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticKind {
    #[default]
    FreeText,
    EnumList {
        #[serde(default)]
        values: Vec<EnumValue>,
    },
    NumericRange {
        #[serde(default)]
        min: f64,
        #[serde(default)]
        max: f64,
    },
}

impl AnalyticKind {
    pub fn tag(&self) -> AnalyticKindTag {
        match self {
            AnalyticKind::FreeText => AnalyticKindTag::FreeText,
            AnalyticKind::EnumList { .. } => AnalyticKindTag::EnumList,
            AnalyticKind::NumericRange { .. } => AnalyticKindTag::NumericRange,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticKindTag {
    FreeText,
    EnumList,
    NumericRange,
}

impl AnalyticKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticKindTag::FreeText => "free_text",
            AnalyticKindTag::EnumList => "enum_list",
            AnalyticKindTag::NumericRange => "numeric_range",
        }
    }

    fn empty_kind(self) -> AnalyticKind {
        match self {
            AnalyticKindTag::FreeText => AnalyticKind::FreeText,
            AnalyticKindTag::EnumList => AnalyticKind::EnumList { values: Vec::new() },
            AnalyticKindTag::NumericRange => AnalyticKind::NumericRange { min: 0.0, max: 0.0 },
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomAnalytic {
    pub key: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub kind: AnalyticKind,
}

impl CustomAnalytic {
    /// 把类型专属参数并入抽取提示词，运行时只接受 `{key, type, prompt}`
    pub fn compiled_prompt(&self) -> String {
        let mut prompt = self.prompt.trim().to_string();
        match &self.kind {
            AnalyticKind::FreeText => {}
            AnalyticKind::EnumList { values } => {
                let options: Vec<String> = values
                    .iter()
                    .filter(|option| !option.value.trim().is_empty())
                    .map(|option| {
                        if option.criteria.trim().is_empty() {
                            format!("- {}", option.value.trim())
                        } else {
                            format!("- {}: {}", option.value.trim(), option.criteria.trim())
                        }
                    })
                    .collect();
                if !options.is_empty() {
                    if !prompt.is_empty() {
                        prompt.push('\n');
                    }
                    prompt.push_str("Answer with exactly one of:\n");
                    prompt.push_str(&options.join("\n"));
                }
            }
            AnalyticKind::NumericRange { min, max } => {
                if !prompt.is_empty() {
                    prompt.push('\n');
                }
                prompt.push_str(&format!("Answer with a number between {min} and {max}."));
            }
        }
        prompt
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnalyticUpdate {
    pub key: Option<String>,
    pub prompt: Option<String>,
}

impl Draft {
    pub fn add_analytic(&self, key: &str) -> Draft {
        let mut next = self.clone();
        next.analytics.push(CustomAnalytic {
            key: key.trim().to_string(),
            ..Default::default()
        });
        next
    }

    pub fn update_analytic(&self, index: usize, update: AnalyticUpdate) -> Draft {
        let mut next = self.clone();
        if let Some(analytic) = next.analytics.get_mut(index) {
            if let Some(key) = update.key {
                analytic.key = key.trim().to_string();
            }
            if let Some(prompt) = update.prompt {
                analytic.prompt = prompt;
            }
        }
        next
    }

    /// 切换类型；同类型时保留已有参数
    pub fn set_analytic_kind(&self, index: usize, tag: AnalyticKindTag) -> Draft {
        let mut next = self.clone();
        if let Some(analytic) = next.analytics.get_mut(index) {
            if analytic.kind.tag() != tag {
                analytic.kind = tag.empty_kind();
            }
        }
        next
    }

    pub fn add_enum_value(&self, index: usize, value: &str, criteria: &str) -> Draft {
        let mut next = self.clone();
        if let Some(CustomAnalytic {
            kind: AnalyticKind::EnumList { values },
            ..
        }) = next.analytics.get_mut(index)
        {
            values.push(EnumValue {
                value: value.trim().to_string(),
                criteria: criteria.trim().to_string(),
            });
        }
        next
    }

    pub fn remove_enum_value(&self, index: usize, value_index: usize) -> Draft {
        let mut next = self.clone();
        if let Some(CustomAnalytic {
            kind: AnalyticKind::EnumList { values },
            ..
        }) = next.analytics.get_mut(index)
        {
            if value_index < values.len() {
                values.remove(value_index);
            }
        }
        next
    }

    pub fn set_numeric_range(&self, index: usize, min: f64, max: f64) -> Draft {
        let mut next = self.clone();
        if let Some(CustomAnalytic {
            kind: AnalyticKind::NumericRange {
                min: current_min,
                max: current_max,
            },
            ..
        }) = next.analytics.get_mut(index)
        {
            *current_min = min;
            *current_max = max;
        }
        next
    }

    pub fn remove_analytic(&self, index: usize) -> Draft {
        let mut next = self.clone();
        if index < next.analytics.len() {
            next.analytics.remove(index);
        }
        next
    }
}
