use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::approvals::ReviewAuthority;
use crate::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, NoopAuditSink};
use crate::domain::request::{NewRequest, Request, RequestId, RequestStatus};
use crate::domain::reviewer::Reviewer;
use crate::errors::{IntakeError, WorkflowError};
use crate::summary::WorkflowSummary;
use crate::workflow::bulk::{BulkItemResult, BulkOutcome, Selection};
use crate::workflow::filter::RequestFilter;
use crate::workflow::states::{next_status, TransitionOutcome, WorkflowAction};
use crate::workflow::timeline::Timeline;

const SYSTEM_ACTOR: &str = "system";

/// Owns the request collection and applies review transitions to it.
///
/// Every operation runs to completion synchronously. Callers only ever see shared
/// references into the collection; mutation happens through the review operations.
pub struct RequestWorkflow {
    requests: Vec<Request>,
    positions: HashMap<RequestId, usize>,
    authority: ReviewAuthority,
    audit: Arc<dyn AuditSink>,
    next_sequence: u32,
}

impl fmt::Debug for RequestWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestWorkflow")
            .field("requests", &self.requests.len())
            .field("authority", &self.authority)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

/// Rejection text plus the action it belongs to.
#[derive(Clone, Copy)]
enum Decision<'a> {
    Approve,
    Reject(&'a str),
}

impl Decision<'_> {
    fn action(&self) -> WorkflowAction {
        match self {
            Self::Approve => WorkflowAction::Approve,
            Self::Reject(_) => WorkflowAction::Reject,
        }
    }
}

impl RequestWorkflow {
    pub fn new(requests: Vec<Request>) -> Result<Self, IntakeError> {
        let mut positions = HashMap::with_capacity(requests.len());
        for (position, request) in requests.iter().enumerate() {
            validate_intake(request)?;
            if positions.insert(request.id.clone(), position).is_some() {
                return Err(IntakeError::DuplicateRequestId(request.id.clone()));
            }
        }

        let next_sequence = requests
            .iter()
            .filter_map(|request| request.id.sequence_number())
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        Ok(Self {
            requests,
            positions,
            authority: ReviewAuthority::default(),
            audit: Arc::new(NoopAuditSink),
            next_sequence,
        })
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    pub fn with_authority(mut self, authority: ReviewAuthority) -> Self {
        self.authority = authority;
        self
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, id: &RequestId) -> Option<&Request> {
        self.positions.get(id).map(|position| &self.requests[*position])
    }

    pub fn requests(&self) -> impl Iterator<Item = &Request> + Clone + '_ {
        self.requests.iter()
    }

    /// Lazily yields requests matching `filter`, in collection order.
    ///
    /// The iterator borrows the live collection, so every call reflects the latest
    /// transitions; cloning it restarts the scan.
    pub fn filter(&self, filter: RequestFilter) -> impl Iterator<Item = &Request> + Clone + '_ {
        self.requests.iter().filter(move |request| filter.matches(request))
    }

    pub fn filter_by<P>(&self, predicate: P) -> impl Iterator<Item = &Request> + Clone + '_
    where
        P: Fn(&Request) -> bool + Clone + 'static,
    {
        self.requests.iter().filter(move |request| predicate(*request))
    }

    pub fn derived_stage_label(request: &Request) -> &'static str {
        request.status.stage_label()
    }

    pub fn timeline(&self, id: &RequestId) -> Result<Timeline, WorkflowError> {
        self.get(id)
            .map(Timeline::for_request)
            .ok_or_else(|| WorkflowError::NotFound { id: id.clone() })
    }

    pub fn summary(&self) -> WorkflowSummary {
        WorkflowSummary::from_requests(self.requests.iter())
    }

    /// Registers a new request at the start of the review pipeline.
    ///
    /// Fails once no unused `REQ-NNN` id remains above the highest one seen.
    pub fn submit(&mut self, new_request: NewRequest) -> Result<RequestId, IntakeError> {
        let mut sequence = self.next_sequence;
        let id = loop {
            let candidate = RequestId::from_sequence(sequence);
            if !self.positions.contains_key(&candidate) {
                break candidate;
            }
            sequence = sequence.checked_add(1).ok_or(IntakeError::SequenceExhausted)?;
        };
        self.next_sequence = sequence.saturating_add(1);

        let request = new_request.into_request(id.clone());
        info!(
            event_name = "workflow.request.submitted",
            request_id = %id,
            advertiser = %request.advertiser,
            media_type = request.media_type.as_str(),
            "request submitted for creative review"
        );
        self.audit.emit(
            AuditEvent::new(
                Some(id.clone()),
                Uuid::new_v4().to_string(),
                "workflow.request_submitted",
                AuditCategory::Intake,
                request.submitted_by.clone(),
                AuditOutcome::Success,
            )
            .with_metadata("status", request.status.as_str()),
        );

        self.positions.insert(id.clone(), self.requests.len());
        self.requests.push(request);
        Ok(id)
    }

    pub fn approve(&mut self, id: &RequestId) -> Result<TransitionOutcome, WorkflowError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.apply(id, Decision::Approve, None, &correlation_id)
    }

    pub fn reject(
        &mut self,
        id: &RequestId,
        reason: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.apply(id, Decision::Reject(reason), None, &correlation_id)
    }

    pub fn approve_as(
        &mut self,
        reviewer: &Reviewer,
        id: &RequestId,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.apply(id, Decision::Approve, Some(reviewer), &correlation_id)
    }

    pub fn reject_as(
        &mut self,
        reviewer: &Reviewer,
        id: &RequestId,
        reason: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.apply(id, Decision::Reject(reason), Some(reviewer), &correlation_id)
    }

    pub fn bulk_approve(&mut self, ids: &[RequestId]) -> BulkOutcome {
        self.apply_bulk(ids, Decision::Approve, None)
    }

    pub fn bulk_reject(&mut self, ids: &[RequestId], reason: &str) -> BulkOutcome {
        self.apply_bulk(ids, Decision::Reject(reason), None)
    }

    pub fn bulk_approve_as(&mut self, reviewer: &Reviewer, ids: &[RequestId]) -> BulkOutcome {
        self.apply_bulk(ids, Decision::Approve, Some(reviewer))
    }

    pub fn bulk_reject_as(
        &mut self,
        reviewer: &Reviewer,
        ids: &[RequestId],
        reason: &str,
    ) -> BulkOutcome {
        self.apply_bulk(ids, Decision::Reject(reason), Some(reviewer))
    }

    /// Bulk-approves the selection and clears it.
    pub fn approve_selected(
        &mut self,
        selection: &mut Selection,
        reviewer: Option<&Reviewer>,
    ) -> BulkOutcome {
        let ids = selection.take();
        self.apply_bulk(&ids, Decision::Approve, reviewer)
    }

    /// Bulk-rejects the selection with one shared reason and clears it.
    pub fn reject_selected(
        &mut self,
        selection: &mut Selection,
        reason: &str,
        reviewer: Option<&Reviewer>,
    ) -> BulkOutcome {
        let ids = selection.take();
        self.apply_bulk(&ids, Decision::Reject(reason), reviewer)
    }

    fn apply_bulk(
        &mut self,
        ids: &[RequestId],
        decision: Decision<'_>,
        reviewer: Option<&Reviewer>,
    ) -> BulkOutcome {
        let correlation_id = Uuid::new_v4().to_string();
        let items = ids
            .iter()
            .map(|id| BulkItemResult {
                id: id.clone(),
                result: self.apply(id, decision, reviewer, &correlation_id),
            })
            .collect();

        let outcome = BulkOutcome { action: decision.action(), correlation_id, items };
        info!(
            event_name = "workflow.bulk.completed",
            correlation_id = %outcome.correlation_id,
            action = outcome.action.as_str(),
            succeeded = outcome.success_count(),
            failed = outcome.failure_count(),
            "{}",
            outcome.summary_line()
        );
        outcome
    }

    fn apply(
        &mut self,
        id: &RequestId,
        decision: Decision<'_>,
        reviewer: Option<&Reviewer>,
        correlation_id: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let actor = reviewer.map_or(SYSTEM_ACTOR, |reviewer| reviewer.user_id.as_str());
        let result = self.try_apply(id, decision, reviewer);

        match &result {
            Ok(outcome) => {
                info!(
                    event_name = "workflow.request.transitioned",
                    request_id = %outcome.id,
                    correlation_id,
                    actor,
                    action = outcome.action.as_str(),
                    from = outcome.from.as_str(),
                    to = outcome.to.as_str(),
                    "request moved to {}",
                    outcome.to.stage_label()
                );
                let event_type = match outcome.action {
                    WorkflowAction::Approve => "workflow.request_approved",
                    WorkflowAction::Reject => "workflow.request_rejected",
                };
                let mut event = AuditEvent::new(
                    Some(outcome.id.clone()),
                    correlation_id,
                    event_type,
                    AuditCategory::Review,
                    actor,
                    AuditOutcome::Success,
                )
                .with_metadata("from", outcome.from.as_str())
                .with_metadata("to", outcome.to.as_str())
                .with_metadata("stage", outcome.stage.as_str());
                if let Decision::Reject(reason) = decision {
                    event = event.with_metadata("reason", reason);
                }
                self.audit.emit(event);
            }
            Err(error) => {
                warn!(
                    event_name = "workflow.request.transition_refused",
                    request_id = %id,
                    correlation_id,
                    actor,
                    action = decision.action().as_str(),
                    error_kind = error.kind(),
                    "{error}"
                );
                self.audit.emit(
                    AuditEvent::new(
                        Some(id.clone()),
                        correlation_id,
                        "workflow.transition_refused",
                        AuditCategory::Review,
                        actor,
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("action", decision.action().as_str())
                    .with_metadata("error_kind", error.kind())
                    .with_metadata("error", error.to_string()),
                );
            }
        }

        result
    }

    fn try_apply(
        &mut self,
        id: &RequestId,
        decision: Decision<'_>,
        reviewer: Option<&Reviewer>,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let position = *self
            .positions
            .get(id)
            .ok_or_else(|| WorkflowError::NotFound { id: id.clone() })?;

        if let Decision::Reject(reason) = decision {
            if reason.trim().is_empty() {
                return Err(WorkflowError::EmptyReason { id: id.clone() });
            }
        }

        let action = decision.action();
        let current = self.requests[position].status;
        let invalid = || WorkflowError::InvalidTransition { id: id.clone(), from: current, action };
        let (Some(stage), Some(next)) = (current.review_stage(), next_status(current, action)) else {
            return Err(invalid());
        };

        if let Some(reviewer) = reviewer {
            let verdict = self.authority.check(reviewer, stage, action);
            if let Some(required) = verdict.missing {
                return Err(WorkflowError::Unauthorized {
                    id: id.clone(),
                    user_id: reviewer.user_id.clone(),
                    required,
                });
            }
        }

        let request = &mut self.requests[position];
        request.status = next;
        if let Decision::Reject(reason) = decision {
            request.rejection_reason = Some(reason.to_owned());
            request.rejected_at = Some(stage);
        }

        Ok(TransitionOutcome { id: id.clone(), from: current, to: next, action, stage })
    }
}

fn validate_intake(request: &Request) -> Result<(), IntakeError> {
    let has_reason =
        request.rejection_reason.as_deref().is_some_and(|reason| !reason.trim().is_empty());

    match request.status {
        RequestStatus::Rejected if !has_reason => {
            Err(IntakeError::MissingRejectionReason(request.id.clone()))
        }
        RequestStatus::Rejected => Ok(()),
        status if request.rejection_reason.is_some() || request.rejected_at.is_some() => {
            Err(IntakeError::UnexpectedRejectionReason { id: request.id.clone(), status })
        }
        _ => Ok(()),
    }
}
