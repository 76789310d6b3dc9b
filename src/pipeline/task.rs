use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::draft::{CallPolicy, FaqBlock};
use crate::normalize::{LlmConfig, SynthesizerConfig, TranscriberConfig};

use super::constants::{call_policy, llm, post_call, task_type, telephony, toolchain};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Conversation,
    Summarization,
    Extraction,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Conversation => task_type::CONVERSATION,
            TaskType::Summarization => task_type::SUMMARIZATION,
            TaskType::Extraction => task_type::EXTRACTION,
        }
    }

    /// 在任务列表中的固定槽位
    pub(crate) fn slot(&self) -> usize {
        match self {
            TaskType::Conversation => 0,
            TaskType::Summarization => 1,
            TaskType::Extraction => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Transcriber,
    Llm,
    Synthesizer,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Transcriber => toolchain::STAGE_TRANSCRIBER,
            Stage::Llm => toolchain::STAGE_LLM,
            Stage::Synthesizer => toolchain::STAGE_SYNTHESIZER,
        }
    }
}

/// 运行时固定词汇：即使只有单阶段流水线也写作 `"parallel"`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Execution {
    #[default]
    #[serde(rename = "parallel")]
    Parallel,
}

impl Execution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Execution::Parallel => toolchain::EXECUTION_PARALLEL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Toolchain {
    pub execution: Execution,
    pub pipelines: Vec<Vec<Stage>>,
}

impl Toolchain {
    /// 转写 -> LLM -> 合成，单条线性流水线
    pub fn voice_pipeline() -> Self {
        Self {
            execution: Execution::Parallel,
            pipelines: vec![vec![Stage::Transcriber, Stage::Llm, Stage::Synthesizer]],
        }
    }

    pub fn llm_only() -> Self {
        Self {
            execution: Execution::Parallel,
            pipelines: vec![vec![Stage::Llm]],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// 关闭静音挂断时为 null
    pub hangup_after_silence: Option<u32>,
    pub incremental_delay: u32,
    pub number_of_words_for_interruption: u32,
    #[serde(rename = "hangup_after_LLMCall")]
    pub hangup_after_llm_call: bool,
    pub call_cancellation_prompt: Option<String>,
    pub hangup_message: String,
    pub backchanneling: bool,
    pub ambient_noise: bool,
    pub call_terminate: u32,
    pub voicemail: bool,
    pub voicemail_detection_time: f32,
    pub use_fillers: bool,
    pub check_if_user_online: bool,
    pub check_user_online_message: String,
    pub trigger_user_online_message_after: u32,
    pub optimize_latency: bool,
}

impl TaskConfig {
    pub fn conversation(policy: &CallPolicy) -> Self {
        let call_cancellation_prompt = policy.hangup_prompt_enabled.then(|| {
            policy
                .hangup_prompt
                .clone()
                .unwrap_or_else(|| call_policy::HANGUP_PROMPT.to_string())
        });
        Self {
            hangup_after_silence: policy
                .hangup_after_silence_enabled
                .then_some(policy.hangup_after_silence),
            incremental_delay: call_policy::INCREMENTAL_DELAY_MS,
            number_of_words_for_interruption: if policy.number_of_words_for_interruption == 0 {
                call_policy::NUMBER_OF_WORDS_FOR_INTERRUPTION
            } else {
                policy.number_of_words_for_interruption
            },
            hangup_after_llm_call: policy.hangup_prompt_enabled,
            call_cancellation_prompt,
            hangup_message: policy
                .hangup_message
                .clone()
                .unwrap_or_else(|| call_policy::HANGUP_MESSAGE.to_string()),
            backchanneling: policy.backchanneling,
            ambient_noise: policy.ambient_noise,
            call_terminate: if policy.call_terminate == 0 {
                call_policy::CALL_TERMINATE_SECS
            } else {
                policy.call_terminate
            },
            voicemail: policy.voicemail_detection,
            voicemail_detection_time: policy.voicemail_detection_time,
            use_fillers: false,
            check_if_user_online: policy.check_user_online,
            check_user_online_message: policy
                .check_if_user_online_message
                .clone()
                .unwrap_or_else(|| call_policy::CHECK_IF_USER_ONLINE_MESSAGE.to_string()),
            trigger_user_online_message_after: policy.trigger_user_online_message_after,
            optimize_latency: true,
        }
    }

    /// 通话后任务的固定保守设置
    pub fn post_call() -> Self {
        Self {
            hangup_after_silence: Some(post_call::HANGUP_AFTER_SILENCE_SECS),
            incremental_delay: post_call::INCREMENTAL_DELAY_MS,
            number_of_words_for_interruption: post_call::NUMBER_OF_WORDS_FOR_INTERRUPTION,
            hangup_after_llm_call: false,
            call_cancellation_prompt: None,
            hangup_message: String::new(),
            backchanneling: false,
            ambient_noise: false,
            call_terminate: post_call::CALL_TERMINATE_SECS,
            voicemail: false,
            voicemail_detection_time: 0.0,
            use_fillers: false,
            check_if_user_online: false,
            check_user_online_message: String::new(),
            trigger_user_online_message_after: 0,
            optimize_latency: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamIo {
    pub provider: String,
    pub format: String,
}

impl StreamIo {
    pub fn telephony(provider: &str) -> Self {
        let provider = match provider.trim() {
            "" => telephony::DEFAULT_PROVIDER.to_string(),
            other => other.to_lowercase(),
        };
        Self {
            provider,
            format: telephony::STREAM_FORMAT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_name: String,
    pub utterances: Vec<String>,
    pub response: String,
    pub score_threshold: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    pub embedding_model: String,
    pub routes: Vec<Route>,
}

impl RoutesConfig {
    /// 没有 FAQ 时返回 `None`，调用方据此完全省略 `routes` 键
    pub fn from_faqs(faqs: &[FaqBlock]) -> Option<Self> {
        if faqs.is_empty() {
            return None;
        }
        let routes = faqs
            .iter()
            .enumerate()
            .map(|(index, faq)| Route {
                route_name: match faq.name.trim() {
                    "" => format!("faq_{}", index + 1),
                    name => name.to_string(),
                },
                utterances: faq.filled_utterances().map(str::to_string).collect(),
                response: faq.response.trim().to_string(),
                score_threshold: faq.threshold,
            })
            .collect();
        Some(Self {
            embedding_model: llm::ROUTES_EMBEDDING_MODEL.to_string(),
            routes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmAgentConfig {
    pub agent_type: String,
    pub agent_flow_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<RoutesConfig>,
    pub llm_config: LlmConfig,
}

impl LlmAgentConfig {
    pub fn new(llm_config: LlmConfig) -> Self {
        Self {
            agent_type: llm::AGENT_TYPE.to_string(),
            agent_flow_type: llm::AGENT_FLOW_TYPE.to_string(),
            routes: None,
            llm_config,
        }
    }

    pub fn with_routes(mut self, routes: Option<RoutesConfig>) -> Self {
        self.routes = routes;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub input: Option<StreamIo>,
    pub output: Option<StreamIo>,
    pub api_tools: Option<Value>,
    pub llm_agent: LlmAgentConfig,
    pub synthesizer: Option<SynthesizerConfig>,
    pub transcriber: Option<TranscriberConfig>,
}

/// 编译产出的单个任务，组装后不可修改
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Task {
    task_type: TaskType,
    toolchain: Toolchain,
    task_config: TaskConfig,
    tools_config: ToolsConfig,
}

impl Task {
    pub fn conversation(
        policy: &CallPolicy,
        telephony_provider: &str,
        transcriber: TranscriberConfig,
        synthesizer: SynthesizerConfig,
        llm_agent: LlmAgentConfig,
    ) -> Self {
        let io = StreamIo::telephony(telephony_provider);
        Self {
            task_type: TaskType::Conversation,
            toolchain: Toolchain::voice_pipeline(),
            task_config: TaskConfig::conversation(policy),
            tools_config: ToolsConfig {
                input: Some(io.clone()),
                output: Some(io),
                api_tools: None,
                llm_agent,
                synthesizer: Some(synthesizer),
                transcriber: Some(transcriber),
            },
        }
    }

    pub fn summarization() -> Self {
        Self::post_call(
            TaskType::Summarization,
            LlmAgentConfig::new(LlmConfig::lightweight()),
        )
    }

    pub fn extraction(extraction_prompt: &str) -> Self {
        Self::post_call(
            TaskType::Extraction,
            LlmAgentConfig::new(LlmConfig::lightweight().with_extraction(extraction_prompt)),
        )
    }

    fn post_call(task_type: TaskType, llm_agent: LlmAgentConfig) -> Self {
        Self {
            task_type,
            toolchain: Toolchain::llm_only(),
            task_config: TaskConfig::post_call(),
            tools_config: ToolsConfig {
                input: None,
                output: None,
                api_tools: None,
                llm_agent,
                synthesizer: None,
                transcriber: None,
            },
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn task_config(&self) -> &TaskConfig {
        &self.task_config
    }

    pub fn tools_config(&self) -> &ToolsConfig {
        &self.tools_config
    }
}
