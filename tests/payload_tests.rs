use agentbuilder::draft::{AnalyticKindTag, AnalyticUpdate, IdentityUpdate, PostCallUpdate, VoiceUpdate};
use agentbuilder::payload::prompt_key;
use agentbuilder::{assemble, compile, serialize, validate_schema, Draft, ProviderCatalog, TaskType};
use serde_json::json;

fn roadside_helper() -> Draft {
    Draft::new()
        .update_identity(IdentityUpdate {
            name: Some("Roadside Helper".into()),
            welcome_message: Some("Hi, this is Roadside Helper. Where are you stuck?".into()),
            prompt: Some("You help stranded drivers get roadside assistance.".into()),
            use_case: Some("customer_support".into()),
        })
        .update_voice(
            VoiceUpdate {
                provider: Some("ElevenLabs".into()),
                voice_id: Some("21m00Tcm4TlvDq8ikWAM".into()),
                voice_name: Some("Rachel".into()),
                ..Default::default()
            },
            ProviderCatalog::builtin(),
        )
        .update_post_call(PostCallUpdate {
            summarization_enabled: Some(true),
            ..Default::default()
        })
}

#[test]
fn roadside_helper_compiles_to_two_aligned_tasks() {
    let payload = compile(&roadside_helper(), ProviderCatalog::builtin()).expect("compile");
    let value = serde_json::to_value(&payload).unwrap();

    let config = &value["agent_config"];
    assert_eq!(config["agent_name"], "Roadside Helper");
    assert_eq!(config["agent_type"], "customer_support");
    assert!(config["webhook_url"].is_null());
    assert!(config.get("custom_analytics").is_none());

    let tasks = config["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["task_type"], "conversation");
    assert_eq!(tasks[1]["task_type"], "summarization");
    assert_eq!(tasks[0]["toolchain"]["execution"], "parallel");
    assert_eq!(tasks[1]["toolchain"]["execution"], "parallel");
    assert_eq!(
        tasks[0]["tools_config"]["synthesizer"]["provider"],
        "elevenlabs"
    );

    let prompts = value["agent_prompts"].as_object().unwrap();
    assert_eq!(prompts.len(), 2);
    assert_eq!(
        prompts["task_1"]["system_prompt"],
        "You help stranded drivers get roadside assistance."
    );
    assert!(prompts.contains_key("task_2"));
}

#[test]
fn prompt_map_matches_task_count_for_every_flag_combination() {
    for (summarization, extraction) in [(false, false), (true, false), (false, true), (true, true)] {
        let draft = roadside_helper().update_post_call(PostCallUpdate {
            summarization_enabled: Some(summarization),
            extraction_enabled: Some(extraction),
            ..Default::default()
        });
        let pipeline = assemble(&draft, None);
        let types = pipeline.task_types();
        let payload = serialize(&draft, pipeline);

        assert_eq!(payload.agent_prompts.len(), payload.tasks().len());
        for (index, task) in payload.tasks().iter().enumerate() {
            assert!(payload.agent_prompts.contains_key(&prompt_key(index)));
            assert_eq!(task.task_type(), types[index]);
        }
        assert_eq!(payload.tasks()[0].task_type(), TaskType::Conversation);
    }
}

#[test]
fn custom_analytics_carry_folded_prompts() {
    let draft = roadside_helper()
        .add_analytic("service")
        .update_analytic(
            0,
            AnalyticUpdate {
                prompt: Some("Which service was dispatched?".into()),
                ..Default::default()
            },
        )
        .set_analytic_kind(0, AnalyticKindTag::EnumList)
        .add_enum_value(0, "tow", "a tow truck was sent")
        .add_analytic("wait_minutes")
        .set_analytic_kind(1, AnalyticKindTag::NumericRange)
        .set_numeric_range(1, 0.0, 120.0);

    let payload = compile(&draft, ProviderCatalog::builtin()).expect("compile");
    let value = serde_json::to_value(&payload).unwrap();
    let analytics = value["agent_config"]["custom_analytics"].as_array().unwrap();
    assert_eq!(analytics.len(), 2);
    assert_eq!(analytics[0]["key"], "service");
    assert_eq!(analytics[0]["type"], "enum_list");
    assert!(analytics[0]["prompt"]
        .as_str()
        .unwrap()
        .contains("- tow: a tow truck was sent"));
    assert_eq!(analytics[1]["type"], "numeric_range");
    assert!(analytics[1]["prompt"].as_str().unwrap().contains("between 0 and 120"));
}

#[test]
fn webhook_is_emitted_when_set() {
    let draft = roadside_helper().update_webhook(Some("https://hooks.example.test/calls"));
    let payload = compile(&draft, ProviderCatalog::builtin()).expect("compile");
    assert_eq!(
        payload.agent_config.webhook_url.as_deref(),
        Some("https://hooks.example.test/calls")
    );
}

#[test]
fn registered_schema_rejects_tampered_payload() {
    let payload = compile(&roadside_helper(), ProviderCatalog::builtin()).expect("compile");
    let mut value = serde_json::to_value(&payload).unwrap();
    assert!(validate_schema("agent_payload", &value).is_ok());

    value["agent_config"]["tasks"][0]["toolchain"]["execution"] = json!("sequential");
    let err = validate_schema("agent_payload", &value).unwrap_err();
    assert_eq!(
        err.path().as_deref(),
        Some("agent_config.tasks.0.toolchain.execution")
    );
}
