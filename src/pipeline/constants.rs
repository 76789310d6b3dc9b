/// 编译器相关的常量定义
///
/// 统一管理运行时要求的固定词汇、默认值与占位值

/// 工具链词汇
pub mod toolchain {
    /// 运行时期望的固定值，单阶段流水线也保持不变
    pub const EXECUTION_PARALLEL: &str = "parallel";

    pub const STAGE_TRANSCRIBER: &str = "transcriber";
    pub const STAGE_LLM: &str = "llm";
    pub const STAGE_SYNTHESIZER: &str = "synthesizer";
}

/// 任务类型
pub mod task_type {
    pub const CONVERSATION: &str = "conversation";
    pub const SUMMARIZATION: &str = "summarization";
    pub const EXTRACTION: &str = "extraction";
}

/// 对话任务 task_config 的默认值
pub mod call_policy {
    pub const CALL_TERMINATE_SECS: u32 = 300;
    pub const HANGUP_AFTER_SILENCE_SECS: u32 = 10;
    pub const VOICEMAIL_DETECTION_SECS: f32 = 2.5;
    pub const NUMBER_OF_WORDS_FOR_INTERRUPTION: u32 = 5;
    pub const INCREMENTAL_DELAY_MS: u32 = 400;
    pub const TRIGGER_USER_ONLINE_MESSAGE_AFTER_SECS: u32 = 10;
    pub const CHECK_IF_USER_ONLINE_MESSAGE: &str = "Hey, are you still there?";
    pub const HANGUP_PROMPT: &str =
        "You are an AI that decides if a call should end. Answer Yes if the caller's issue is resolved or they said goodbye, otherwise answer No.";
    pub const HANGUP_MESSAGE: &str = "Thanks for calling roadside assistance. Drive safe!";
}

/// 通话结束后任务（总结 / 抽取）固定使用的保守配置
pub mod post_call {
    pub const CALL_TERMINATE_SECS: u32 = 60;
    pub const HANGUP_AFTER_SILENCE_SECS: u32 = 5;
    pub const NUMBER_OF_WORDS_FOR_INTERRUPTION: u32 = 3;
    pub const INCREMENTAL_DELAY_MS: u32 = 100;

    pub const LLM_PROVIDER: &str = "openai";
    pub const LLM_FAMILY: &str = "openai";
    pub const LLM_MODEL: &str = "gpt-4o-mini";
    pub const LLM_TEMPERATURE: f32 = 0.1;
    pub const LLM_MAX_TOKENS: u32 = 500;

    pub const SUMMARIZATION_PROMPT: &str =
        "Summarize the roadside assistance call: the caller's location, vehicle, problem, and the agreed next step.";
    pub const EXTRACTION_PROMPT: &str =
        "Extract the caller's name, phone number, vehicle, location, and requested service as JSON.";
}

/// LLM agent 相关常量
pub mod llm {
    pub const AGENT_TYPE: &str = "simple_llm_agent";
    pub const AGENT_FLOW_TYPE: &str = "streaming";
    pub const DEFAULT_PROVIDER: &str = "openai";
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    pub const DEFAULT_MAX_TOKENS: u32 = 150;
    pub const TOP_P: f32 = 0.9;
    pub const MIN_P: f32 = 0.1;
    pub const TOP_K: u32 = 0;
    pub const PRESENCE_PENALTY: f32 = 0.0;
    pub const FREQUENCY_PENALTY: f32 = 0.0;

    /// FAQ 路由所使用的 embedding 模型
    pub const ROUTES_EMBEDDING_MODEL: &str = "snowflake/snowflake-arctic-embed-m";
}

/// 语音合成相关常量
pub mod voice {
    pub const DEFAULT_PROVIDER: &str = "elevenlabs";
    pub const FIXED_TEMPERATURE: f32 = 0.5;
    pub const FIXED_SIMILARITY_BOOST: f32 = 0.75;
    pub const DEFAULT_SPEED: f32 = 1.0;
    pub const DEFAULT_BUFFER_SIZE: u32 = 250;
    pub const AUDIO_FORMAT: &str = "wav";

    /// 仅用于未知供应商（默认分支）
    pub const PLACEHOLDER_MODEL: &str = "eleven_turbo_v2_5";
    pub const PLACEHOLDER_VOICE_NAME: &str = "Default";
    pub const PLACEHOLDER_VOICE_ID: &str = "default";
}

/// 语音识别相关常量
pub mod transcriber {
    pub const DEFAULT_PROVIDER: &str = "deepgram";
    pub const FALLBACK_LANGUAGE: &str = "en";
    pub const SAMPLING_RATE: u32 = 16000;
    pub const ENCODING: &str = "linear16";
    pub const ENDPOINTING_MS: u32 = 250;
}

/// 电话接入相关常量
pub mod telephony {
    pub const DEFAULT_PROVIDER: &str = "twilio";
    pub const STREAM_FORMAT: &str = "wav";
}

/// Payload 字段名常量
pub mod fields {
    pub const PROMPT_KEY_PREFIX: &str = "task_";
    pub const DEFAULT_AGENT_TYPE: &str = "other";
}
