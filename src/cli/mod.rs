//! 命令行工具使用的辅助函数，二进制只负责参数解析与输出

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::catalog::{ProviderCatalog, ProviderCategory};
use crate::config::BuilderConfig;
use crate::draft::Draft;
use crate::error::{BuilderError, Result};
use crate::schema::{schemas_snapshot, Schema};
use crate::validator::{validate, validate_for_submit, BuilderTab, TabValidation};

#[derive(Clone, Debug, Serialize)]
pub struct SchemaExportEntry {
    pub name: String,
    pub schema: Schema,
}

pub fn schema_exports() -> Vec<SchemaExportEntry> {
    schemas_snapshot()
        .into_iter()
        .map(|(name, schema)| SchemaExportEntry { name, schema })
        .collect()
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CatalogRow {
    pub category: ProviderCategory,
    pub provider: String,
    pub default_variant: Option<String>,
    pub variants: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// 把目录展开成一行一个供应商
pub fn catalog_rows(catalog: &ProviderCatalog, category: Option<ProviderCategory>) -> Vec<CatalogRow> {
    let categories = match category {
        Some(category) => vec![category],
        None => ProviderCategory::all().to_vec(),
    };
    categories
        .into_iter()
        .flat_map(|category| {
            catalog.providers(category).iter().map(move |entry| CatalogRow {
                category,
                provider: entry.id.clone(),
                default_variant: catalog
                    .default_variant(category, &entry.id)
                    .map(str::to_string),
                variants: entry.variants.iter().map(|variant| variant.id.clone()).collect(),
                languages: entry
                    .languages
                    .iter()
                    .map(|language| language.code.clone())
                    .collect(),
            })
        })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct TabReport {
    pub tab: BuilderTab,
    #[serde(flatten)]
    pub validation: TabValidation,
}

#[derive(Clone, Debug, Serialize)]
pub struct DraftReport {
    pub submittable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_invalid_tab: Option<BuilderTab>,
    pub tabs: Vec<TabReport>,
}

/// 校验指定标签页，或在未指定时校验全部标签页
pub fn draft_report(draft: &Draft, tab: Option<BuilderTab>) -> DraftReport {
    let tabs = match tab {
        Some(tab) => vec![tab],
        None => BuilderTab::ALL.to_vec(),
    };
    let submit = validate_for_submit(draft);
    DraftReport {
        submittable: submit.valid,
        first_invalid_tab: submit.first_invalid_tab,
        tabs: tabs
            .into_iter()
            .map(|tab| TabReport {
                tab,
                validation: validate(tab, draft),
            })
            .collect(),
    }
}

/// 读取配置；未给出路径时使用默认值
pub fn load_config(path: Option<&Path>) -> Result<BuilderConfig> {
    match path {
        Some(path) => BuilderConfig::from_path(path),
        None => Ok(BuilderConfig::default()),
    }
}

/// 读取 draft 文件，应用配置中的约束并按目录校正供应商选择
pub fn load_draft(path: &Path, config: &BuilderConfig, catalog: &ProviderCatalog) -> Result<Draft> {
    let content = fs::read_to_string(path).map_err(|err| {
        BuilderError::Config(format!("无法读取 draft 文件 {}: {err}", path.display()))
    })?;
    let draft = Draft::from_json(&content)
        .map_err(|err| BuilderError::Config(format!("draft 解析失败: {err}")))?;
    Ok(draft.reconciled(catalog).with_limits(config.limits.clone()))
}
