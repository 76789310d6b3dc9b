//! Payload serializer
//!
//! 顶层元数据 + 任务列表 + prompt 映射。prompt 映射与任务列表由同一个
//! [`TaskPipeline`] 生成，`task_{i+1}` 永远对应 `tasks[i]`。

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::ProviderCatalog;
use crate::draft::{AnalyticKindTag, Draft};
use crate::error::{BuilderError, Result};
use crate::normalize::normalize_voice;
use crate::pipeline::constants::fields;
use crate::pipeline::{assemble_with, Task, TaskPipeline};
use crate::schema::{validate_schema, SchemaError, AGENT_PAYLOAD};
use crate::validator::validate_for_submit;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnalyticEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: AnalyticKindTag,
    /// 已把枚举取值或数值范围并入提示词
    pub prompt: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AgentConfig {
    pub agent_name: String,
    pub agent_welcome_message: String,
    pub agent_type: String,
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_analytics: Vec<AnalyticEntry>,
    pub tasks: Vec<Task>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AgentPrompt {
    pub system_prompt: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Payload {
    pub agent_config: AgentConfig,
    pub agent_prompts: BTreeMap<String, AgentPrompt>,
}

impl Payload {
    pub fn tasks(&self) -> &[Task] {
        &self.agent_config.tasks
    }

    pub fn prompt(&self, index: usize) -> Option<&str> {
        self.agent_prompts
            .get(&prompt_key(index))
            .map(|prompt| prompt.system_prompt.as_str())
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|err| BuilderError::Other(err.into()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| BuilderError::Other(err.into()))
    }

    /// 结构校验：注册的 payload schema 加上任务与 prompt 的一一对应
    pub fn check(&self) -> Result<()> {
        let value = self.to_value()?;
        validate_schema(AGENT_PAYLOAD, &value)?;

        let tasks = self.tasks().len();
        if self.agent_prompts.len() != tasks {
            return Err(SchemaError::Validation {
                message: format!(
                    "{} prompt(s) for {} task(s)",
                    self.agent_prompts.len(),
                    tasks
                ),
                path: vec!["agent_prompts".to_string()],
            }
            .into());
        }
        if let Some(index) = (0..tasks).find(|index| !self.agent_prompts.contains_key(&prompt_key(*index))) {
            return Err(SchemaError::Validation {
                message: format!("missing prompt for task {index}"),
                path: vec!["agent_prompts".to_string(), prompt_key(index)],
            }
            .into());
        }
        Ok(())
    }
}

/// `tasks[index]` 对应的 prompt 键
pub fn prompt_key(index: usize) -> String {
    format!("{}{}", fields::PROMPT_KEY_PREFIX, index + 1)
}

pub fn serialize(draft: &Draft, pipeline: TaskPipeline) -> Payload {
    let (tasks, prompts) = pipeline.into_parts();
    let agent_prompts = prompts
        .into_iter()
        .enumerate()
        .map(|(index, system_prompt)| (prompt_key(index), AgentPrompt { system_prompt }))
        .collect();

    let identity = &draft.identity;
    let agent_type = match identity.use_case.trim() {
        "" => fields::DEFAULT_AGENT_TYPE.to_string(),
        use_case => use_case.to_string(),
    };
    let webhook_url = draft
        .webhook_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);
    let custom_analytics = draft
        .analytics
        .iter()
        .map(|analytic| AnalyticEntry {
            key: analytic.key.trim().to_string(),
            kind: analytic.kind.tag(),
            prompt: analytic.compiled_prompt(),
        })
        .collect();

    Payload {
        agent_config: AgentConfig {
            agent_name: identity.name.trim().to_string(),
            agent_welcome_message: identity.welcome_message.clone(),
            agent_type,
            webhook_url,
            custom_analytics,
            tasks,
        },
        agent_prompts,
    }
}

/// 完整编译：提交前校验 -> 归一化 -> 组装 -> 序列化 -> 结构校验。
/// 校验失败时直接返回字段错误，后续阶段不会运行。
pub fn compile(draft: &Draft, catalog: &ProviderCatalog) -> Result<Payload> {
    let validation = validate_for_submit(draft);
    if !validation.valid {
        tracing::info!(
            errors = validation.field_errors.len(),
            tab = ?validation.first_invalid_tab,
            "draft rejected before compilation"
        );
        return Err(BuilderError::Validation {
            field_errors: validation.field_errors,
        });
    }

    let voice = normalize_voice(&draft.voice, catalog);
    let pipeline = assemble_with(draft, Some(&voice), catalog);
    let payload = serialize(draft, pipeline);
    payload.check()?;

    tracing::info!(
        agent = %payload.agent_config.agent_name,
        tasks = payload.tasks().len(),
        "agent payload compiled"
    );
    Ok(payload)
}
