use serde::{Deserialize, Serialize};

use crate::domain::request::ReviewStage;
use crate::domain::reviewer::{Permission, Reviewer};
use crate::workflow::WorkflowAction;

/// Permission that covers `action` at exactly `stage`.
pub fn stage_permission(stage: ReviewStage, action: WorkflowAction) -> Permission {
    match (stage, action) {
        (ReviewStage::Creative, WorkflowAction::Approve) => Permission::ApproveCreative,
        (ReviewStage::Legal, WorkflowAction::Approve) => Permission::ApproveLegal,
        (ReviewStage::Finance, WorkflowAction::Approve) => Permission::ApproveFinance,
        (ReviewStage::Creative, WorkflowAction::Reject) => Permission::RejectCreative,
        (ReviewStage::Legal, WorkflowAction::Reject) => Permission::RejectLegal,
        (ReviewStage::Finance, WorkflowAction::Reject) => Permission::RejectFinance,
    }
}

/// Permission that covers `action` at every stage.
pub fn blanket_permission(action: WorkflowAction) -> Permission {
    match action {
        WorkflowAction::Approve => Permission::ApproveAll,
        WorkflowAction::Reject => Permission::RejectAll,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityDecision {
    pub allowed: bool,
    pub reason: String,
    pub missing: Option<Permission>,
}

impl AuthorityDecision {
    fn allow(reason: impl Into<String>) -> Self {
        Self { allowed: true, reason: reason.into(), missing: None }
    }

    fn deny(reason: impl Into<String>, missing: Permission) -> Self {
        Self { allowed: false, reason: reason.into(), missing: Some(missing) }
    }
}

/// Decides whether a reviewer may act on a request sitting at a given stage.
#[derive(Clone, Debug, Default)]
pub struct ReviewAuthority {
    ignore_blanket_permissions: bool,
}

impl ReviewAuthority {
    /// Authority that only honours stage-specific permissions.
    pub fn stage_scoped() -> Self {
        Self { ignore_blanket_permissions: true }
    }

    pub fn check(
        &self,
        reviewer: &Reviewer,
        stage: ReviewStage,
        action: WorkflowAction,
    ) -> AuthorityDecision {
        let specific = stage_permission(stage, action);
        if reviewer.has(specific) {
            return AuthorityDecision::allow(format!(
                "reviewer `{}` holds `{specific}` for {}",
                reviewer.user_id,
                stage.label()
            ));
        }

        let blanket = blanket_permission(action);
        if !self.ignore_blanket_permissions && reviewer.has(blanket) {
            return AuthorityDecision::allow(format!(
                "reviewer `{}` holds `{blanket}`",
                reviewer.user_id
            ));
        }

        AuthorityDecision::deny(
            format!(
                "reviewer `{}` ({}) cannot {action} during {}",
                reviewer.user_id,
                reviewer.role.as_str(),
                stage.label()
            ),
            specific,
        )
    }

    /// Stages at which `reviewer` may perform `action`, in review order.
    pub fn reviewable_stages(&self, reviewer: &Reviewer, action: WorkflowAction) -> Vec<ReviewStage> {
        ReviewStage::ORDER
            .into_iter()
            .filter(|stage| self.check(reviewer, *stage, action).allowed)
            .collect()
    }
}
