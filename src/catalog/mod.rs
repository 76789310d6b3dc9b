//! Provider catalog
//!
//! 静态的、带版本号的供应商数据表：每个类别（LLM / 语音合成 / 语音识别）下，
//! 供应商 id 映射到可选的模型变体、语言以及默认选择。
//!
//! 查找未知供应商时返回空切片或 `None`，从不报错；调用方应把空结果视为
//! “当前无可选项”。

mod builtin;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BuilderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    Llm,
    Voice,
    Transcription,
}

impl ProviderCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderCategory::Llm => "llm",
            ProviderCategory::Voice => "voice",
            ProviderCategory::Transcription => "transcription",
        }
    }

    pub fn all() -> [ProviderCategory; 3] {
        [
            ProviderCategory::Llm,
            ProviderCategory::Voice,
            ProviderCategory::Transcription,
        ]
    }
}

impl FromStr for ProviderCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ProviderCategory::all()
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| format!("unknown provider category `{value}`"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// LLM 变体所属的模型家族（例如 `openai`、`llama`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl Variant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            family: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LanguageOption {
    pub label: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProviderEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
}

impl ProviderEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            variants: Vec::new(),
            default_variant: None,
            languages: Vec::new(),
            default_language: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_default_variant(mut self, id: impl Into<String>) -> Self {
        self.default_variant = Some(id.into());
        self
    }

    pub fn with_language(mut self, label: &str, code: &str) -> Self {
        self.languages.push(LanguageOption {
            label: label.to_string(),
            code: code.to_string(),
        });
        self
    }

    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    fn matches(&self, provider: &str) -> bool {
        self.id.eq_ignore_ascii_case(provider.trim())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse provider catalog: {0}")]
    Parse(String),
    #[error("provider `{provider}` in {category} is inconsistent: {reason}")]
    Inconsistent {
        category: &'static str,
        provider: String,
        reason: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CatalogError> for BuilderError {
    fn from(error: CatalogError) -> Self {
        BuilderError::Catalog(error.to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProviderCatalog {
    pub version: String,
    #[serde(default)]
    pub llm: Vec<ProviderEntry>,
    #[serde(default)]
    pub voice: Vec<ProviderEntry>,
    #[serde(default)]
    pub transcription: Vec<ProviderEntry>,
}

static BUILTIN: Lazy<ProviderCatalog> = Lazy::new(builtin::catalog);

impl ProviderCatalog {
    /// 内置的供应商数据表
    pub fn builtin() -> &'static ProviderCatalog {
        &BUILTIN
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: ProviderCatalog =
            serde_json::from_str(content).map_err(|err| CatalogError::Parse(err.to_string()))?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn providers(&self, category: ProviderCategory) -> &[ProviderEntry] {
        match category {
            ProviderCategory::Llm => &self.llm,
            ProviderCategory::Voice => &self.voice,
            ProviderCategory::Transcription => &self.transcription,
        }
    }

    pub fn provider(&self, category: ProviderCategory, provider: &str) -> Option<&ProviderEntry> {
        self.providers(category)
            .iter()
            .find(|entry| entry.matches(provider))
    }

    pub fn variants(&self, category: ProviderCategory, provider: &str) -> &[Variant] {
        self.provider(category, provider)
            .map(|entry| entry.variants.as_slice())
            .unwrap_or(&[])
    }

    /// 默认变体：优先使用显式声明的默认值，否则取列表中的第一个
    pub fn default_variant(&self, category: ProviderCategory, provider: &str) -> Option<&str> {
        let entry = self.provider(category, provider)?;
        entry
            .default_variant
            .as_deref()
            .or_else(|| entry.variants.first().map(|variant| variant.id.as_str()))
    }

    pub fn is_valid_variant(&self, category: ProviderCategory, provider: &str, variant: &str) -> bool {
        self.variants(category, provider)
            .iter()
            .any(|candidate| candidate.id == variant)
    }

    pub fn find_variant(
        &self,
        category: ProviderCategory,
        provider: &str,
        variant: &str,
    ) -> Option<&Variant> {
        self.variants(category, provider)
            .iter()
            .find(|candidate| candidate.id == variant)
    }

    pub fn languages(&self, provider: &str) -> &[LanguageOption] {
        self.provider(ProviderCategory::Transcription, provider)
            .map(|entry| entry.languages.as_slice())
            .unwrap_or(&[])
    }

    pub fn default_language(&self, provider: &str) -> Option<&str> {
        let entry = self.provider(ProviderCategory::Transcription, provider)?;
        entry
            .default_language
            .as_deref()
            .or_else(|| entry.languages.first().map(|language| language.code.as_str()))
    }

    pub fn is_valid_language(&self, provider: &str, code: &str) -> bool {
        self.languages(provider)
            .iter()
            .any(|language| language.code == code)
    }

    /// 检查默认值是否出现在对应列表中
    fn check(&self) -> Result<(), CatalogError> {
        for category in ProviderCategory::all() {
            for entry in self.providers(category) {
                if let Some(default) = &entry.default_variant {
                    if !entry.variants.iter().any(|variant| &variant.id == default) {
                        return Err(CatalogError::Inconsistent {
                            category: category.as_str(),
                            provider: entry.id.clone(),
                            reason: format!("default variant `{default}` is not listed"),
                        });
                    }
                }
                if let Some(default) = &entry.default_language {
                    if !entry.languages.iter().any(|language| &language.code == default) {
                        return Err(CatalogError::Inconsistent {
                            category: category.as_str(),
                            provider: entry.id.clone(),
                            reason: format!("default language `{default}` is not listed"),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_consistent() {
        assert!(ProviderCatalog::builtin().check().is_ok());
    }

    #[test]
    fn unknown_provider_yields_empty() {
        let catalog = ProviderCatalog::builtin();
        assert!(catalog.variants(ProviderCategory::Voice, "nope").is_empty());
        assert!(catalog.default_variant(ProviderCategory::Llm, "nope").is_none());
        assert!(catalog.languages("nope").is_empty());
        assert!(catalog.default_language("nope").is_none());
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = ProviderCatalog::builtin();
        assert_eq!(
            catalog.default_variant(ProviderCategory::Voice, "ElevenLabs"),
            catalog.default_variant(ProviderCategory::Voice, "elevenlabs"),
        );
        assert!(!catalog.variants(ProviderCategory::Voice, "ELEVENLABS").is_empty());
    }

    #[test]
    fn inconsistent_json_is_rejected() {
        let content = r#"{
            "version": "test",
            "voice": [
                { "id": "x", "variants": [{ "id": "a" }], "default_variant": "b" }
            ]
        }"#;
        let err = ProviderCatalog::from_json(content).unwrap_err();
        assert!(matches!(err, CatalogError::Inconsistent { .. }));
    }
}
