use serde::{Deserialize, Serialize};

use crate::catalog::{ProviderCatalog, ProviderCategory};

/// 供应商与其模型变体的组合
///
/// 字段不对外可写：切换供应商只能经过 [`ProviderChoice::switch_provider`]，
/// 保证 LLM、语音合成、语音识别三个领域使用同一条“有效则保留，否则重置为默认”规则。
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderChoice {
    #[serde(default)]
    provider: String,
    #[serde(default)]
    model: String,
}

impl ProviderChoice {
    pub fn new(category: ProviderCategory, provider: &str, catalog: &ProviderCatalog) -> Self {
        let provider = provider.trim();
        Self {
            provider: provider.to_string(),
            model: catalog
                .default_variant(category, provider)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn switch_provider(
        &self,
        category: ProviderCategory,
        provider: &str,
        catalog: &ProviderCatalog,
    ) -> Self {
        let provider = provider.trim();
        let model = reconcile(
            &self.model,
            catalog
                .variants(category, provider)
                .iter()
                .map(|variant| variant.id.as_str()),
            catalog.default_variant(category, provider),
        );
        if model != self.model {
            tracing::debug!(
                category = category.as_str(),
                from = %self.provider,
                to = %provider,
                previous = %self.model,
                model = %model,
                "model reset on provider switch"
            );
        }
        Self {
            provider: provider.to_string(),
            model,
        }
    }

    /// 只接受目录中当前供应商列出的变体
    pub fn select_model(
        &self,
        category: ProviderCategory,
        model: &str,
        catalog: &ProviderCatalog,
    ) -> Self {
        let model = model.trim();
        if catalog.is_valid_variant(category, &self.provider, model) {
            Self {
                provider: self.provider.clone(),
                model: model.to_string(),
            }
        } else {
            tracing::debug!(
                category = category.as_str(),
                provider = %self.provider,
                model = %model,
                "ignoring model not offered by provider"
            );
            self.clone()
        }
    }
}

/// 有效则保留当前值，否则回退到默认值（没有默认值时为空串）
pub fn reconcile<'a>(
    current: &str,
    valid: impl IntoIterator<Item = &'a str>,
    default: Option<&str>,
) -> String {
    if !current.is_empty() && valid.into_iter().any(|candidate| candidate == current) {
        current.to_string()
    } else {
        default.unwrap_or_default().to_string()
    }
}
