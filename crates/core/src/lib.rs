pub mod approvals;
pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod source;
pub mod summary;
pub mod workflow;

pub use approvals::{AuthorityDecision, ReviewAuthority};
pub use audit::{AuditEvent, AuditSink, InMemoryAuditSink, NoopAuditSink};
pub use domain::request::{
    MediaType, NewRequest, Priority, Request, RequestId, RequestStatus, ReviewStage,
};
pub use domain::reviewer::{Permission, Reviewer, ReviewerRole};
pub use errors::{ApplicationError, IntakeError, WorkflowError};
pub use source::RequestSource;
pub use summary::WorkflowSummary;
pub use workflow::{
    BulkItemResult, BulkOutcome, RequestFilter, RequestWorkflow, Selection,
    SharedRequestWorkflow, StageProgress, Timeline, TimelineEntry, TransitionOutcome,
    WorkflowAction,
};
