use std::fs;

use agentbuilder::cli::{load_config, load_draft};
use agentbuilder::{BuilderConfig, BuilderError, ProviderCategory};
use tempfile::tempdir;

#[test]
fn config_file_with_relative_catalog_loads() {
    let dir = tempdir().expect("temp dir");
    let catalog = serde_json::json!({
        "version": "custom",
        "llm": [{ "id": "local", "variants": [{ "id": "tiny" }] }]
    });
    fs::write(dir.path().join("catalog.json"), catalog.to_string()).expect("write catalog");

    let config_path = dir.path().join("agentbuilder.json");
    let config = serde_json::json!({
        "api": { "base_url": "https://agents.example.test", "timeout_secs": 5 },
        "limits": { "max_faqs": 3 },
        "catalog_path": "catalog.json"
    });
    fs::write(&config_path, config.to_string()).expect("write config");

    let config = BuilderConfig::from_path(&config_path).expect("load config");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.limits.max_faqs, 3);
    assert_eq!(config.limits.max_utterances, 20);
    assert_eq!(config.api.agent_endpoint(), "https://agents.example.test/v2/agent");

    let catalog = config.load_catalog().expect("load catalog");
    assert_eq!(catalog.version, "custom");
    assert_eq!(catalog.default_variant(ProviderCategory::Llm, "local"), Some("tiny"));
}

#[test]
fn api_key_resolves_from_environment() {
    std::env::set_var("AGENTBUILDER_CONFIG_TEST_KEY", "bn-abcdefghijklmnopqrstuv");
    let config = BuilderConfig::from_str(
        r#"{ "api": { "api_key": "${AGENTBUILDER_CONFIG_TEST_KEY}" } }"#,
    )
    .expect("parse config");
    assert_eq!(
        config.api.resolved_api_key().expect("resolve key"),
        "bn-abcdefghijklmnopqrstuv"
    );
    std::env::remove_var("AGENTBUILDER_CONFIG_TEST_KEY");
}

#[test]
fn malformed_config_is_reported() {
    let err = BuilderConfig::from_str("{ not json").unwrap_err();
    assert!(matches!(err, BuilderError::Config(_)));
}

#[test]
fn draft_file_picks_up_config_limits() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "limits": { "min_faq_threshold": 0.7 } }"#).expect("write config");
    let draft_path = dir.path().join("draft.json");
    fs::write(
        &draft_path,
        r#"{ "identity": { "name": "Roadside Helper" }, "faqs": [{ "name": "tow", "threshold": 0.2 }] }"#,
    )
    .expect("write draft");

    let config = load_config(Some(&config_path)).expect("config");
    let catalog = config.load_catalog().expect("catalog");
    let draft = load_draft(&draft_path, &config, &catalog).expect("draft");
    assert_eq!(draft.identity().name, "Roadside Helper");
    assert_eq!(draft.faqs()[0].threshold, 0.7);
    assert_eq!(draft.faqs()[0].utterances.len(), 1);
}

#[test]
fn loaded_draft_drops_models_the_provider_does_not_offer() {
    let dir = tempdir().expect("temp dir");
    let draft_path = dir.path().join("draft.json");
    let draft = serde_json::json!({
        "identity": { "name": "Roadside Helper", "prompt": "Help stranded drivers." },
        "llm": { "provider": "groq", "model": "gpt-4o" },
        "voice": { "provider": "polly", "model": "eleven_turbo_v2_5", "voice_id": "Matthew" },
        "transcription": { "provider": "sarvam", "model": "nova-2", "language": "fr" }
    });
    fs::write(&draft_path, draft.to_string()).expect("write draft");

    let config = load_config(None).expect("config");
    let catalog = config.load_catalog().expect("catalog");
    let draft = load_draft(&draft_path, &config, &catalog).expect("draft");

    let groq_default = catalog.default_variant(ProviderCategory::Llm, "groq");
    assert_eq!(draft.llm().choice.provider(), "groq");
    assert_eq!(Some(draft.llm().choice.model()), groq_default);

    assert_eq!(draft.voice().choice.provider(), "polly");
    assert_ne!(draft.voice().choice.model(), "eleven_turbo_v2_5");
    assert_eq!(
        Some(draft.voice().choice.model()),
        catalog.default_variant(ProviderCategory::Voice, "polly")
    );
    assert_eq!(draft.voice().voice_id.as_deref(), Some("Matthew"));

    assert_eq!(
        Some(draft.transcription().choice.model()),
        catalog.default_variant(ProviderCategory::Transcription, "sarvam")
    );
    assert_eq!(
        Some(draft.transcription().language.as_str()),
        catalog.default_language("sarvam")
    );
}

#[test]
fn loaded_draft_keeps_models_the_provider_offers() {
    let dir = tempdir().expect("temp dir");
    let draft_path = dir.path().join("draft.json");
    fs::write(
        &draft_path,
        r#"{ "llm": { "provider": "openai", "model": "gpt-4.1" }, "voice": { "provider": "elevenlabs", "model": "eleven_flash_v2_5" } }"#,
    )
    .expect("write draft");

    let config = load_config(None).expect("config");
    let catalog = config.load_catalog().expect("catalog");
    let draft = load_draft(&draft_path, &config, &catalog).expect("draft");
    assert_eq!(draft.llm().choice.model(), "gpt-4.1");
    assert_eq!(draft.voice().choice.model(), "eleven_flash_v2_5");
}
