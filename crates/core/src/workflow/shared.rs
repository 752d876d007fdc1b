use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::request::{NewRequest, Request, RequestId};
use crate::domain::reviewer::Reviewer;
use crate::errors::{IntakeError, WorkflowError};
use crate::summary::WorkflowSummary;
use crate::workflow::bulk::BulkOutcome;
use crate::workflow::engine::RequestWorkflow;
use crate::workflow::filter::RequestFilter;
use crate::workflow::states::TransitionOutcome;
use crate::workflow::timeline::Timeline;

/// Cloneable handle for callers that share one workflow across tasks.
///
/// Each operation holds the lock for its whole duration, so a bulk call is never
/// interleaved with another transition.
#[derive(Clone, Debug)]
pub struct SharedRequestWorkflow {
    inner: Arc<RwLock<RequestWorkflow>>,
}

impl SharedRequestWorkflow {
    pub fn new(workflow: RequestWorkflow) -> Self {
        Self { inner: Arc::new(RwLock::new(workflow)) }
    }

    pub async fn get(&self, id: &RequestId) -> Option<Request> {
        let workflow = self.inner.read().await;
        workflow.get(id).cloned()
    }

    /// Snapshot of the requests matching `filter` at the time of the call.
    pub async fn filter_collect(&self, filter: RequestFilter) -> Vec<Request> {
        let workflow = self.inner.read().await;
        workflow.filter(filter).cloned().collect()
    }

    pub async fn summary(&self) -> WorkflowSummary {
        self.inner.read().await.summary()
    }

    pub async fn timeline(&self, id: &RequestId) -> Result<Timeline, WorkflowError> {
        self.inner.read().await.timeline(id)
    }

    pub async fn submit(&self, new_request: NewRequest) -> Result<RequestId, IntakeError> {
        self.inner.write().await.submit(new_request)
    }

    pub async fn approve(
        &self,
        reviewer: Option<&Reviewer>,
        id: &RequestId,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let mut workflow = self.inner.write().await;
        match reviewer {
            Some(reviewer) => workflow.approve_as(reviewer, id),
            None => workflow.approve(id),
        }
    }

    pub async fn reject(
        &self,
        reviewer: Option<&Reviewer>,
        id: &RequestId,
        reason: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let mut workflow = self.inner.write().await;
        match reviewer {
            Some(reviewer) => workflow.reject_as(reviewer, id, reason),
            None => workflow.reject(id, reason),
        }
    }

    pub async fn bulk_approve(&self, reviewer: Option<&Reviewer>, ids: &[RequestId]) -> BulkOutcome {
        let mut workflow = self.inner.write().await;
        match reviewer {
            Some(reviewer) => workflow.bulk_approve_as(reviewer, ids),
            None => workflow.bulk_approve(ids),
        }
    }

    pub async fn bulk_reject(
        &self,
        reviewer: Option<&Reviewer>,
        ids: &[RequestId],
        reason: &str,
    ) -> BulkOutcome {
        let mut workflow = self.inner.write().await;
        match reviewer {
            Some(reviewer) => workflow.bulk_reject_as(reviewer, ids, reason),
            None => workflow.bulk_reject(ids, reason),
        }
    }
}
