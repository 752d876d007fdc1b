use crate::domain::request::RequestId;
use crate::errors::WorkflowError;
use crate::workflow::states::{TransitionOutcome, WorkflowAction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkItemResult {
    pub id: RequestId,
    pub result: Result<TransitionOutcome, WorkflowError>,
}

impl BulkItemResult {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-item results of a bulk operation, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkOutcome {
    pub action: WorkflowAction,
    pub correlation_id: String,
    pub items: Vec<BulkItemResult>,
}

impl BulkOutcome {
    pub fn succeeded(&self) -> impl Iterator<Item = &TransitionOutcome> + '_ {
        self.items.iter().filter_map(|item| item.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &WorkflowError> + '_ {
        self.items.iter().filter_map(|item| item.result.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Human summary such as `2 approved, 1 failed: REQ-004 already approved`.
    pub fn summary_line(&self) -> String {
        let head = format!("{} {}", self.success_count(), self.action.past_tense());
        let failures: Vec<String> = self
            .failed()
            .map(|error| format!("{} {}", error.request_id(), error.short_reason()))
            .collect();

        if failures.is_empty() {
            return head;
        }

        format!("{head}, {} failed: {}", failures.len(), failures.join("; "))
    }
}

/// Ordered set of request ids picked for a bulk action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<RequestId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id was already selected.
    pub fn select(&mut self, id: RequestId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn deselect(&mut self, id: &RequestId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    /// Flips membership and reports whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: RequestId) -> bool {
        if self.deselect(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &RequestId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[RequestId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Hands the selected ids to a bulk operation and leaves the selection empty.
    pub fn take(&mut self) -> Vec<RequestId> {
        std::mem::take(&mut self.ids)
    }
}

impl FromIterator<RequestId> for Selection {
    fn from_iter<I: IntoIterator<Item = RequestId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.select(id);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::request::{RequestId, RequestStatus, ReviewStage};
    use crate::errors::WorkflowError;
    use crate::workflow::states::{TransitionOutcome, WorkflowAction};

    use super::{BulkItemResult, BulkOutcome, Selection};

    fn approved(id: &str) -> BulkItemResult {
        BulkItemResult {
            id: RequestId::from(id),
            result: Ok(TransitionOutcome {
                id: RequestId::from(id),
                from: RequestStatus::PendingFinance,
                to: RequestStatus::Approved,
                action: WorkflowAction::Approve,
                stage: ReviewStage::Finance,
            }),
        }
    }

    #[test]
    fn summary_line_lists_each_failure() {
        let outcome = BulkOutcome {
            action: WorkflowAction::Approve,
            correlation_id: "batch-1".to_owned(),
            items: vec![
                approved("REQ-001"),
                BulkItemResult {
                    id: RequestId::from("REQ-005"),
                    result: Err(WorkflowError::InvalidTransition {
                        id: RequestId::from("REQ-005"),
                        from: RequestStatus::Rejected,
                        action: WorkflowAction::Approve,
                    }),
                },
                approved("REQ-003"),
            ],
        };

        assert_eq!(outcome.success_count(), 2);
        assert_eq!(outcome.failure_count(), 1);
        assert!(!outcome.is_complete_success());
        assert_eq!(outcome.summary_line(), "2 approved, 1 failed: REQ-005 already rejected");
    }

    #[test]
    fn summary_line_without_failures_is_just_the_count() {
        let outcome = BulkOutcome {
            action: WorkflowAction::Approve,
            correlation_id: "batch-2".to_owned(),
            items: vec![approved("REQ-001")],
        };

        assert_eq!(outcome.summary_line(), "1 approved");
    }

    #[test]
    fn selection_keeps_insertion_order_and_ignores_duplicates() {
        let mut selection = Selection::new();
        assert!(selection.select(RequestId::from("REQ-002")));
        assert!(selection.select(RequestId::from("REQ-001")));
        assert!(!selection.select(RequestId::from("REQ-002")));

        assert_eq!(selection.ids(), &[RequestId::from("REQ-002"), RequestId::from("REQ-001")]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(RequestId::from("REQ-003")));
        assert!(selection.contains(&RequestId::from("REQ-003")));
        assert!(!selection.toggle(RequestId::from("REQ-003")));
        assert!(selection.is_empty());
    }

    #[test]
    fn take_drains_the_selection() {
        let mut selection: Selection =
            ["REQ-001", "REQ-002"].into_iter().map(RequestId::from).collect();

        let ids = selection.take();
        assert_eq!(ids.len(), 2);
        assert!(selection.is_empty());
    }
}
