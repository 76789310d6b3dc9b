use super::kind::Schema;

pub const AGENT_PAYLOAD: &str = "agent_payload";
pub const DRAFT_LIMITS: &str = "draft_limits";

const STAGES: [&str; 3] = ["transcriber", "llm", "synthesizer"];
const TASK_TYPES: [&str; 3] = ["conversation", "summarization", "extraction"];
const ANALYTIC_TYPES: [&str; 3] = ["free_text", "enum_list", "numeric_range"];

/// 提交给 agent 运行时的创建请求体
pub fn agent_payload_schema() -> Schema {
    Schema::object([
        ("agent_config", agent_config(), true),
        (
            "agent_prompts",
            Schema::map(Schema::object([("system_prompt", Schema::string(), true)])),
            true,
        ),
    ])
    .closed()
    .with_name(AGENT_PAYLOAD)
    .with_description("agent creation request accepted by the voice agent runtime")
}

pub fn draft_limits_schema() -> Schema {
    Schema::object([
        ("min_faq_threshold", Schema::number(), false),
        ("max_utterances", Schema::integer(), false),
        ("max_faqs", Schema::integer(), false),
    ])
    .closed()
    .with_name(DRAFT_LIMITS)
}

fn agent_config() -> Schema {
    Schema::object([
        ("agent_name", Schema::string(), true),
        ("agent_welcome_message", Schema::string(), true),
        ("agent_type", Schema::string(), true),
        ("webhook_url", Schema::string().nullable(), true),
        ("custom_analytics", Schema::array(custom_analytic()), false),
        ("tasks", Schema::non_empty_array(task()), true),
    ])
}

fn custom_analytic() -> Schema {
    Schema::object([
        ("key", Schema::string(), true),
        ("type", Schema::enumeration(ANALYTIC_TYPES), true),
        ("prompt", Schema::string(), true),
    ])
    .closed()
}

fn task() -> Schema {
    Schema::object([
        ("task_type", Schema::enumeration(TASK_TYPES), true),
        ("toolchain", toolchain(), true),
        ("task_config", task_config(), true),
        ("tools_config", tools_config(), true),
    ])
}

fn toolchain() -> Schema {
    Schema::object([
        ("execution", Schema::enumeration(["parallel"]), true),
        (
            "pipelines",
            Schema::non_empty_array(Schema::non_empty_array(Schema::enumeration(STAGES))),
            true,
        ),
    ])
    .closed()
}

fn task_config() -> Schema {
    Schema::object([
        ("hangup_after_silence", Schema::integer().nullable(), true),
        ("incremental_delay", Schema::integer(), true),
        ("number_of_words_for_interruption", Schema::integer(), true),
        ("hangup_after_LLMCall", Schema::boolean(), true),
        ("call_cancellation_prompt", Schema::string().nullable(), true),
        ("call_terminate", Schema::integer(), true),
        ("voicemail", Schema::boolean(), true),
        ("check_if_user_online", Schema::boolean(), true),
    ])
}

fn stream_io() -> Schema {
    Schema::object([
        ("provider", Schema::string(), true),
        ("format", Schema::string(), true),
    ])
    .nullable()
}

fn tools_config() -> Schema {
    Schema::object([
        ("input", stream_io(), true),
        ("output", stream_io(), true),
        ("api_tools", Schema::any().nullable(), true),
        ("llm_agent", llm_agent(), true),
        ("synthesizer", synthesizer().nullable(), true),
        ("transcriber", transcriber().nullable(), true),
    ])
}

fn llm_agent() -> Schema {
    Schema::object([
        ("agent_type", Schema::string(), true),
        ("agent_flow_type", Schema::string(), true),
        ("routes", routes(), false),
        ("llm_config", llm_config(), true),
    ])
}

fn routes() -> Schema {
    let route = Schema::object([
        ("route_name", Schema::string(), true),
        ("utterances", Schema::array(Schema::string()), true),
        ("response", Schema::string(), true),
        ("score_threshold", Schema::number(), true),
    ]);
    Schema::object([
        ("embedding_model", Schema::string(), true),
        ("routes", Schema::non_empty_array(route), true),
    ])
}

fn llm_config() -> Schema {
    Schema::object([
        ("provider", Schema::string(), true),
        ("family", Schema::string(), true),
        ("model", Schema::string(), true),
        ("max_tokens", Schema::integer(), true),
        ("temperature", Schema::number(), true),
        ("request_json", Schema::boolean(), true),
        ("extraction_details", Schema::string(), false),
    ])
}

fn synthesizer() -> Schema {
    let provider_config = Schema::object([
        ("voice", Schema::string(), true),
        ("voice_id", Schema::string(), true),
        ("model", Schema::string(), true),
        ("speed", Schema::number(), true),
        ("temperature", Schema::number(), true),
        ("similarity_boost", Schema::number(), true),
    ])
    .closed();
    Schema::object([
        ("provider", Schema::string(), true),
        ("provider_config", provider_config, true),
        ("stream", Schema::boolean(), true),
        ("buffer_size", Schema::integer(), true),
        ("audio_format", Schema::string(), true),
    ])
}

fn transcriber() -> Schema {
    Schema::object([
        ("provider", Schema::string(), true),
        ("model", Schema::string(), true),
        ("language", Schema::string(), true),
        ("stream", Schema::boolean(), true),
        ("keywords", Schema::string(), false),
    ])
}
