//! Builder session
//!
//! 一个会话拥有一份 draft、当前标签页、错误横幅和提交中的标记。
//! 编译全部是同步的，只有提交会跨越 await；锁从不跨越 await 持有。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::ProviderCatalog;
use crate::client::{AgentSubmitter, CreatedAgent};
use crate::draft::{Draft, DraftLimits};
use crate::error::{BuilderError, Result};
use crate::payload::compile;
use crate::validator::{validate, validate_for_submit, BuilderTab, TabValidation};

const VALIDATION_BANNER: &str = "Please fix the highlighted fields before creating the agent.";

struct SessionState {
    draft: Draft,
    active_tab: BuilderTab,
    banner: Option<String>,
}

pub struct BuilderSession {
    catalog: Arc<ProviderCatalog>,
    state: RwLock<Option<SessionState>>,
    in_flight: AtomicBool,
}

/// 提交期间持有，离开作用域时释放提交中标记
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new(Arc::new(ProviderCatalog::builtin().clone()))
    }
}

impl BuilderSession {
    pub fn new(catalog: Arc<ProviderCatalog>) -> Self {
        let draft = Draft::with_catalog(&catalog);
        Self::with_draft(catalog, draft)
    }

    /// 从已有 draft 开始，例如从文件载入；供应商选择按会话目录校正
    pub fn with_draft(catalog: Arc<ProviderCatalog>, draft: Draft) -> Self {
        let draft = draft.reconciled(&catalog);
        Self {
            catalog,
            state: RwLock::new(Some(SessionState {
                draft,
                active_tab: BuilderTab::Identity,
                banner: None,
            })),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_limits(self, limits: DraftLimits) -> Self {
        if let Some(state) = self.state.write().as_mut() {
            state.draft = state.draft.with_limits(limits);
        }
        self
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    fn read<R>(&self, apply: impl FnOnce(&SessionState) -> R) -> Result<R> {
        self.state
            .read()
            .as_ref()
            .map(apply)
            .ok_or(BuilderError::SessionClosed)
    }

    fn write<R>(&self, apply: impl FnOnce(&mut SessionState) -> R) -> Result<R> {
        self.state
            .write()
            .as_mut()
            .map(apply)
            .ok_or(BuilderError::SessionClosed)
    }

    pub fn draft(&self) -> Result<Draft> {
        self.read(|state| state.draft.clone())
    }

    /// 用一次 draft 更新替换当前 draft；横幅随编辑清除
    pub fn update(&self, apply: impl FnOnce(&Draft, &ProviderCatalog) -> Draft) -> Result<Draft> {
        let catalog: &ProviderCatalog = &self.catalog;
        self.write(|state| {
            state.draft = apply(&state.draft, catalog);
            state.banner = None;
            state.draft.clone()
        })
    }

    pub fn active_tab(&self) -> Result<BuilderTab> {
        self.read(|state| state.active_tab)
    }

    /// 直接跳转不做校验
    pub fn goto_tab(&self, tab: BuilderTab) -> Result<()> {
        self.write(|state| state.active_tab = tab)
    }

    /// 当前标签页通过校验时前进到下一页，最后一页停留不动
    pub fn advance(&self) -> Result<TabValidation> {
        self.write(|state| {
            let validation = validate(state.active_tab, &state.draft);
            if validation.valid {
                if let Some(next) = state.active_tab.next() {
                    state.active_tab = next;
                }
            }
            validation
        })
    }

    pub fn banner(&self) -> Result<Option<String>> {
        self.read(|state| state.banner.clone())
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 提交当前 draft。
    ///
    /// 同一时刻只允许一个请求；校验失败时焦点切到第一个出错的标签页；
    /// 任何失败都会写入横幅，draft 保持不变以便重试。
    pub async fn submit(&self, submitter: &dyn AgentSubmitter) -> Result<CreatedAgent> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(BuilderError::SubmissionInFlight)?;

        let draft = self.draft()?;
        let validation = validate_for_submit(&draft);
        if !validation.valid {
            self.write(|state| {
                if let Some(tab) = validation.first_invalid_tab {
                    state.active_tab = tab;
                }
                state.banner = Some(VALIDATION_BANNER.to_string());
            })?;
            return Err(BuilderError::Validation {
                field_errors: validation.field_errors,
            });
        }

        let payload = match compile(&draft, &self.catalog) {
            Ok(payload) => payload,
            Err(err) => {
                self.write(|state| state.banner = Some(err.to_string()))?;
                return Err(err);
            }
        };

        tracing::info!(agent = %payload.agent_config.agent_name, "submitting agent");
        match submitter.create_agent(&payload).await {
            Ok(created) => {
                // 会话在请求期间被关闭时结果仍然返回给调用方
                let _ = self.write(|state| state.banner = None);
                tracing::info!(agent_id = %created.id, "agent submission succeeded");
                Ok(created)
            }
            Err(err) => {
                tracing::warn!(error = %err, "agent submission failed");
                let message = err.user_message();
                let _ = self.write(|state| state.banner = Some(message));
                Err(err.into())
            }
        }
    }

    /// 丢弃 draft，此后所有操作返回 [`BuilderError::SessionClosed`]
    pub fn close(&self) {
        if self.state.write().take().is_some() {
            tracing::debug!("builder session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::IdentityUpdate;

    #[test]
    fn advance_is_gated_by_tab_validation() {
        let session = BuilderSession::default();
        let validation = session.advance().unwrap();
        assert!(!validation.valid);
        assert_eq!(session.active_tab().unwrap(), BuilderTab::Identity);

        session
            .update(|draft, _| {
                draft.update_identity(IdentityUpdate {
                    name: Some("Roadside Helper".into()),
                    prompt: Some("Help drivers.".into()),
                    ..Default::default()
                })
            })
            .unwrap();
        assert!(session.advance().unwrap().valid);
        assert_eq!(session.active_tab().unwrap(), BuilderTab::Llm);
    }

    #[test]
    fn last_tab_stays_put() {
        let session = BuilderSession::default();
        session.goto_tab(BuilderTab::PostCall).unwrap();
        assert!(session.advance().unwrap().valid);
        assert_eq!(session.active_tab().unwrap(), BuilderTab::PostCall);
    }

    #[test]
    fn closed_session_rejects_operations() {
        let session = BuilderSession::default();
        session.close();
        assert!(session.is_closed());
        assert!(matches!(session.draft(), Err(BuilderError::SessionClosed)));
        assert!(matches!(
            session.goto_tab(BuilderTab::Voice),
            Err(BuilderError::SessionClosed)
        ));
    }

    #[test]
    fn loaded_draft_is_reconciled_against_session_catalog() {
        let draft = Draft::from_json(r#"{ "llm": { "provider": "groq", "model": "gpt-4o" } }"#)
            .unwrap();
        let session =
            BuilderSession::with_draft(Arc::new(ProviderCatalog::builtin().clone()), draft);
        let llm = session.draft().unwrap().llm().choice.clone();
        assert_eq!(llm.provider(), "groq");
        assert_eq!(llm.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn guard_releases_flag_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = InFlightGuard::acquire(&flag).unwrap();
            assert!(InFlightGuard::acquire(&flag).is_none());
        }
        assert!(InFlightGuard::acquire(&flag).is_some());
    }
}
