use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::request::{MediaType, Request, RequestStatus, ReviewStage};

/// Dashboard figures derived from the current request collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub total: usize,
    pub pending_review: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub stage_backlog: BTreeMap<String, usize>,
    pub media_counts: BTreeMap<String, usize>,
    pub pending_value: Decimal,
    pub approved_value: Decimal,
    /// Approved share of decided requests, in whole percent.
    pub approval_rate_pct: Option<Decimal>,
}

impl WorkflowSummary {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a Request>) -> Self {
        let mut status_counts: BTreeMap<String, usize> =
            RequestStatus::ALL.iter().map(|status| (status.as_str().to_owned(), 0)).collect();
        let mut stage_backlog: BTreeMap<String, usize> =
            ReviewStage::ORDER.iter().map(|stage| (stage.as_str().to_owned(), 0)).collect();
        let mut media_counts: BTreeMap<String, usize> =
            MediaType::ALL.iter().map(|media| (media.as_str().to_owned(), 0)).collect();

        let mut total = 0;
        let mut pending_review = 0;
        let mut pending_value = Decimal::ZERO;
        let mut approved_value = Decimal::ZERO;
        let mut approved = 0u32;
        let mut rejected = 0u32;

        for request in requests {
            total += 1;
            *status_counts.entry(request.status.as_str().to_owned()).or_default() += 1;
            *media_counts.entry(request.media_type.as_str().to_owned()).or_default() += 1;

            match request.status {
                RequestStatus::Approved => {
                    approved += 1;
                    approved_value += request.value;
                }
                RequestStatus::Rejected => rejected += 1,
                pending => {
                    pending_review += 1;
                    pending_value += request.value;
                    if let Some(stage) = pending.review_stage() {
                        *stage_backlog.entry(stage.as_str().to_owned()).or_default() += 1;
                    }
                }
            }
        }

        Self {
            total,
            pending_review,
            status_counts,
            stage_backlog,
            media_counts,
            pending_value,
            approved_value,
            approval_rate_pct: approval_rate(approved, rejected),
        }
    }

    pub fn count_for(&self, status: RequestStatus) -> usize {
        self.status_counts.get(status.as_str()).copied().unwrap_or(0)
    }
}

fn approval_rate(approved: u32, rejected: u32) -> Option<Decimal> {
    let decided = approved + rejected;
    if decided == 0 {
        return None;
    }

    let rate = Decimal::from(approved) * Decimal::ONE_HUNDRED / Decimal::from(decided);
    Some(rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::request::RequestStatus;
    use crate::fixtures;

    use super::WorkflowSummary;

    #[test]
    fn demo_dataset_summary() {
        let requests = fixtures::demo_requests();
        let summary = WorkflowSummary::from_requests(&requests);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.pending_review, 3);
        assert_eq!(summary.count_for(RequestStatus::Approved), 1);
        assert_eq!(summary.media_counts.get("TV"), Some(&2));
        assert_eq!(summary.media_counts.get("Digital"), Some(&1));
        assert_eq!(summary.stage_backlog.get("finance"), Some(&1));
        assert_eq!(summary.pending_value, Decimal::new(845_000, 2));
        assert_eq!(summary.approved_value, Decimal::new(120_000, 2));
        assert_eq!(summary.approval_rate_pct, Some(Decimal::from(50)));
    }

    #[test]
    fn empty_collection_has_no_approval_rate() {
        let summary = WorkflowSummary::from_requests(std::iter::empty());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.approval_rate_pct, None);
        assert_eq!(summary.count_for(RequestStatus::PendingLegal), 0);
        assert_eq!(summary.status_counts.len(), 5);
    }
}
