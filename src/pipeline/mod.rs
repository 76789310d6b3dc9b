//! Task pipeline assembler
//!
//! 把归一化后的供应商配置与 draft 组装成有序的任务列表：
//! 对话任务永远在第 0 位，启用时依次跟随摘要、抽取任务。

pub mod constants;
mod task;

use crate::catalog::ProviderCatalog;
use crate::draft::Draft;
use crate::normalize::{normalize_llm, normalize_transcriber, SynthesizerConfig};

pub use task::{
    Execution, LlmAgentConfig, Route, RoutesConfig, Stage, StreamIo, Task, TaskConfig, TaskType,
    Toolchain, ToolsConfig,
};

use constants::post_call;

/// 任务及其 system prompt，两者在 payload 中按同一下标对齐
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineEntry {
    task: Task,
    system_prompt: String,
}

impl PipelineEntry {
    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskPipeline {
    entries: Vec<PipelineEntry>,
}

impl TaskPipeline {
    pub fn entries(&self) -> &[PipelineEntry] {
        &self.entries
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter().map(PipelineEntry::task)
    }

    pub fn task_types(&self) -> Vec<TaskType> {
        self.tasks().map(Task::task_type).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Task>, Vec<String>) {
        self.entries
            .into_iter()
            .map(|entry| (entry.task, entry.system_prompt))
            .unzip()
    }
}

/// 任务按类型放入固定槽位，调用顺序不影响输出顺序
pub struct TaskPipelineBuilder {
    slots: [Option<PipelineEntry>; 3],
}

impl TaskPipelineBuilder {
    /// 对话任务是必需的，因此只能从它开始构建
    pub fn new(conversation: Task, system_prompt: impl Into<String>) -> Self {
        let mut builder = Self {
            slots: [None, None, None],
        };
        builder.push(conversation, system_prompt);
        builder
    }

    pub fn push(&mut self, task: Task, system_prompt: impl Into<String>) -> &mut Self {
        let slot = task.task_type().slot();
        if self.slots[slot].is_some() {
            tracing::debug!(task_type = task.task_type().as_str(), "replacing task in pipeline");
        }
        self.slots[slot] = Some(PipelineEntry {
            task,
            system_prompt: system_prompt.into(),
        });
        self
    }

    pub fn build(self) -> TaskPipeline {
        TaskPipeline {
            entries: self.slots.into_iter().flatten().collect(),
        }
    }
}

/// 使用内置目录组装
pub fn assemble(draft: &Draft, synthesizer: Option<&SynthesizerConfig>) -> TaskPipeline {
    assemble_with(draft, synthesizer, ProviderCatalog::builtin())
}

/// 组装任务列表。语音配置缺失或不可用时使用占位配置，组装本身不会失败。
pub fn assemble_with(
    draft: &Draft,
    synthesizer: Option<&SynthesizerConfig>,
    catalog: &ProviderCatalog,
) -> TaskPipeline {
    let synthesizer = match synthesizer {
        Some(config) if config.is_usable() => config.clone(),
        _ => {
            tracing::debug!("voice configuration unusable, substituting placeholder synthesizer");
            SynthesizerConfig::placeholder()
        }
    };

    let llm_agent = LlmAgentConfig::new(normalize_llm(&draft.llm, catalog))
        .with_routes(RoutesConfig::from_faqs(&draft.faqs));
    let conversation = Task::conversation(
        &draft.call_policy,
        &draft.telephony_provider,
        normalize_transcriber(&draft.transcription, catalog),
        synthesizer,
        llm_agent,
    );

    let mut builder = TaskPipelineBuilder::new(conversation, draft.identity.prompt.clone());

    let summarization = &draft.post_call.summarization;
    if summarization.enabled {
        builder.push(
            Task::summarization(),
            prompt_or(summarization.prompt.as_deref(), post_call::SUMMARIZATION_PROMPT),
        );
    }

    let extraction = &draft.post_call.extraction;
    if extraction.enabled {
        let prompt = prompt_or(extraction.prompt.as_deref(), post_call::EXTRACTION_PROMPT);
        builder.push(Task::extraction(&prompt), prompt);
    }

    let pipeline = builder.build();
    tracing::debug!(tasks = pipeline.len(), "task pipeline assembled");
    pipeline
}

fn prompt_or(prompt: Option<&str>, default: &str) -> String {
    match prompt.map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => default.to_string(),
    }
}
