use std::sync::Arc;
use std::time::Duration;

use agentbuilder::draft::{IdentityUpdate, VoiceUpdate};
use agentbuilder::{
    BuilderError, BuilderSession, BuilderTab, DryRunSubmitter, ProviderCatalog, SubmissionError,
};

fn session() -> BuilderSession {
    BuilderSession::new(Arc::new(ProviderCatalog::builtin().clone()))
}

fn fill_required(session: &BuilderSession) {
    session
        .update(|draft, catalog| {
            draft
                .update_identity(IdentityUpdate {
                    name: Some("Roadside Helper".into()),
                    prompt: Some("You help stranded drivers.".into()),
                    ..Default::default()
                })
                .update_voice(
                    VoiceUpdate {
                        voice_id: Some("21m00Tcm4TlvDq8ikWAM".into()),
                        ..Default::default()
                    },
                    catalog,
                )
        })
        .expect("update draft");
}

#[tokio::test]
async fn submit_succeeds_with_dry_run() {
    let session = session();
    fill_required(&session);
    let submitter = DryRunSubmitter::new();

    let created = session.submit(&submitter).await.expect("submit");
    assert_eq!(created.id, "dry-run-1");
    assert_eq!(created.agent_name.as_deref(), Some("Roadside Helper"));
    assert_eq!(submitter.submissions(), 1);
    let sent = &submitter.received()[0];
    assert_eq!(sent["agent_config"]["agent_name"], "Roadside Helper");
    assert!(sent["agent_prompts"]["task_1"]["system_prompt"].is_string());
    assert!(session.banner().unwrap().is_none());
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn invalid_draft_redirects_focus_and_never_submits() {
    let session = session();
    session.goto_tab(BuilderTab::PostCall).unwrap();
    let submitter = DryRunSubmitter::new();

    let err = session.submit(&submitter).await.unwrap_err();
    let errors = err.field_errors().expect("field errors");
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("voice_id"));
    assert_eq!(session.active_tab().unwrap(), BuilderTab::Identity);
    assert!(session.banner().unwrap().is_some());
    assert_eq!(submitter.submissions(), 0);
}

#[tokio::test]
async fn second_submit_is_rejected_while_in_flight() {
    let session = session();
    fill_required(&session);
    let submitter = DryRunSubmitter::new().with_delay(Duration::from_millis(100));

    let (first, second) = tokio::join!(session.submit(&submitter), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.submit(&submitter).await
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(BuilderError::SubmissionInFlight)));
    assert_eq!(submitter.submissions(), 1);

    // 第一个请求结束后可以再次提交
    assert!(session.submit(&submitter).await.is_ok());
}

#[tokio::test]
async fn failed_submission_sets_banner_and_keeps_draft() {
    let session = session();
    fill_required(&session);
    let before = session.draft().unwrap();
    let submitter = DryRunSubmitter::rejecting(SubmissionError::Rejected {
        status: 409,
        message: "An agent with this name already exists".into(),
    });

    let err = session.submit(&submitter).await.unwrap_err();
    assert!(matches!(err, BuilderError::Submission(_)));
    assert_eq!(
        session.banner().unwrap().as_deref(),
        Some("An agent with this name already exists")
    );
    assert_eq!(session.draft().unwrap(), before);
    assert!(!session.is_submitting());

    session.update(|draft, _| draft.update_webhook(None)).unwrap();
    assert!(session.banner().unwrap().is_none());
}

#[tokio::test]
async fn closed_session_cannot_submit() {
    let session = session();
    fill_required(&session);
    session.close();
    let err = session.submit(&DryRunSubmitter::new()).await.unwrap_err();
    assert!(matches!(err, BuilderError::SessionClosed));
}
