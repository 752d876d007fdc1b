use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::request::{RequestId, RequestStatus};
use crate::domain::reviewer::Permission;
use crate::workflow::WorkflowAction;

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowError {
    #[error("request `{id}` was not found")]
    NotFound { id: RequestId },
    #[error("cannot {action} request `{id}` from status `{from}`")]
    InvalidTransition { id: RequestId, from: RequestStatus, action: WorkflowAction },
    #[error("rejecting request `{id}` requires a non-empty reason")]
    EmptyReason { id: RequestId },
    #[error("reviewer `{user_id}` lacks `{required}` for request `{id}`")]
    Unauthorized { id: RequestId, user_id: String, required: Permission },
}

impl WorkflowError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::EmptyReason { .. } => "empty_reason",
            Self::Unauthorized { .. } => "unauthorized",
        }
    }

    pub fn request_id(&self) -> &RequestId {
        match self {
            Self::NotFound { id }
            | Self::InvalidTransition { id, .. }
            | Self::EmptyReason { id }
            | Self::Unauthorized { id, .. } => id,
        }
    }

    /// Short reason used in bulk summaries, e.g. `already rejected`.
    pub fn short_reason(&self) -> String {
        match self {
            Self::NotFound { .. } => "not found".to_owned(),
            Self::InvalidTransition { from, .. } => format!("already {}", from.as_str()),
            Self::EmptyReason { .. } => "missing rejection reason".to_owned(),
            Self::Unauthorized { required, .. } => format!("requires {}", required.as_str()),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("request id `{0}` appears more than once")]
    DuplicateRequestId(RequestId),
    #[error("rejected request `{0}` has no rejection reason")]
    MissingRejectionReason(RequestId),
    #[error("request `{id}` carries a rejection reason but has status `{status}`")]
    UnexpectedRejectionReason { id: RequestId, status: RequestStatus },
    #[error("no request id is left above `REQ-{}`", u32::MAX)]
    SequenceExhausted,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("data source failure: {0}")]
    DataSource(String),
}
