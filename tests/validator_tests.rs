use agentbuilder::draft::{AnalyticUpdate, IdentityUpdate, LlmUpdate, VoiceUpdate};
use agentbuilder::{
    compile, validate, validate_for_submit, BuilderError, BuilderTab, Draft, ProviderCatalog,
};

fn named(draft: &Draft) -> Draft {
    draft.update_identity(IdentityUpdate {
        name: Some("Roadside Helper".into()),
        prompt: Some("You help stranded drivers.".into()),
        ..Default::default()
    })
}

fn voiced(draft: &Draft) -> Draft {
    draft.update_voice(
        VoiceUpdate {
            voice_id: Some("voice-123".into()),
            ..Default::default()
        },
        ProviderCatalog::builtin(),
    )
}

#[test]
fn identity_requires_name_and_prompt() {
    let result = validate(BuilderTab::Identity, &Draft::new());
    assert!(!result.valid);
    assert_eq!(result.field_errors["name"], "Agent name is required");
    assert_eq!(result.field_errors["prompt"], "Agent prompt is required");

    let whitespace = Draft::new().update_identity(IdentityUpdate {
        name: Some("   ".into()),
        prompt: Some("ok".into()),
        ..Default::default()
    });
    let result = validate(BuilderTab::Identity, &whitespace);
    assert!(result.field_errors.contains_key("name"));
    assert!(!result.field_errors.contains_key("prompt"));
}

#[test]
fn voice_requires_selection() {
    let result = validate(BuilderTab::Voice, &Draft::new());
    assert_eq!(result.field_errors["voice_id"], "Please select a voice");
    assert!(validate(BuilderTab::Voice, &voiced(&Draft::new())).valid);
}

#[test]
fn optional_tabs_stay_valid_with_warnings() {
    let draft = Draft::new()
        .update_llm(
            LlmUpdate {
                temperature: Some(3.5),
                ..Default::default()
            },
            ProviderCatalog::builtin(),
        )
        .add_analytic("outcome")
        .add_analytic("outcome")
        .update_webhook(Some("ftp://hooks.example.test"));

    let llm = validate(BuilderTab::Llm, &draft);
    assert!(llm.valid);
    assert!(llm.warnings.contains_key("temperature"));

    let analytics = validate(BuilderTab::Analytics, &draft);
    assert!(analytics.valid);
    assert!(analytics.warnings.contains_key("analytics[1].key"));

    let post_call = validate(BuilderTab::PostCall, &draft);
    assert!(post_call.valid);
    assert!(post_call.warnings.contains_key("webhook_url"));
}

#[test]
fn blank_analytic_key_is_a_warning() {
    let draft = Draft::new().add_analytic("x").update_analytic(
        0,
        AnalyticUpdate {
            key: Some(" ".into()),
            ..Default::default()
        },
    );
    let result = validate(BuilderTab::Analytics, &draft);
    assert!(result.valid);
    assert!(result.warnings.contains_key("analytics[0].key"));
}

#[test]
fn submit_reports_first_failing_tab() {
    let result = validate_for_submit(&Draft::new());
    assert!(!result.valid);
    assert_eq!(result.first_invalid_tab, Some(BuilderTab::Identity));

    let result = validate_for_submit(&named(&Draft::new()));
    assert_eq!(result.first_invalid_tab, Some(BuilderTab::Voice));
    assert_eq!(result.field_errors.len(), 1);

    let result = validate_for_submit(&voiced(&named(&Draft::new())));
    assert!(result.valid);
    assert!(result.first_invalid_tab.is_none());
}

#[test]
fn missing_name_and_voice_block_compilation() {
    let draft = Draft::new().update_identity(IdentityUpdate {
        prompt: Some("You help stranded drivers.".into()),
        ..Default::default()
    });
    let err = compile(&draft, ProviderCatalog::builtin()).unwrap_err();
    match err {
        BuilderError::Validation { field_errors } => {
            assert_eq!(field_errors.len(), 2);
            assert!(field_errors.contains_key("name"));
            assert!(field_errors.contains_key("voice_id"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn tab_names_parse_from_cli_spelling() {
    assert_eq!("post-call".parse::<BuilderTab>(), Ok(BuilderTab::PostCall));
    assert_eq!("CALL_POLICY".parse::<BuilderTab>(), Ok(BuilderTab::CallPolicy));
    assert!("billing".parse::<BuilderTab>().is_err());
    assert_eq!(BuilderTab::Identity.next(), Some(BuilderTab::Llm));
    assert_eq!(BuilderTab::PostCall.next(), None);
}
