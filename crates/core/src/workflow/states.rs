use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::request::{RequestId, RequestStatus, ReviewStage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Approve,
    Reject,
}

impl WorkflowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub id: RequestId,
    pub from: RequestStatus,
    pub to: RequestStatus,
    pub action: WorkflowAction,
    pub stage: ReviewStage,
}

/// The review transition table. `None` means the action is not legal from `current`.
pub fn next_status(current: RequestStatus, action: WorkflowAction) -> Option<RequestStatus> {
    use RequestStatus::{Approved, PendingCreative, PendingFinance, PendingLegal, Rejected};
    use WorkflowAction::{Approve, Reject};

    match (current, action) {
        (PendingCreative, Approve) => Some(PendingLegal),
        (PendingLegal, Approve) => Some(PendingFinance),
        (PendingFinance, Approve) => Some(Approved),
        (PendingCreative | PendingLegal | PendingFinance, Reject) => Some(Rejected),
        (Approved | Rejected, _) => None,
    }
}
