use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::request::{Request, RequestId, RequestStatus, ReviewStage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageProgress {
    Completed,
    InProgress,
    Upcoming,
    Rejected,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub label: &'static str,
    pub stage: Option<ReviewStage>,
    pub progress: StageProgress,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub request_id: RequestId,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn for_request(request: &Request) -> Self {
        let mut entries = vec![TimelineEntry {
            label: "Submitted",
            stage: None,
            progress: StageProgress::Completed,
            date: Some(request.submission_date),
        }];

        entries.extend(ReviewStage::ORDER.into_iter().map(|stage| TimelineEntry {
            label: stage.label(),
            stage: Some(stage),
            progress: stage_progress(request, stage),
            date: None,
        }));

        Self { request_id: request.id.clone(), entries }
    }

    pub fn progress_of(&self, stage: ReviewStage) -> Option<StageProgress> {
        self.entries.iter().find(|entry| entry.stage == Some(stage)).map(|entry| entry.progress)
    }
}

fn stage_progress(request: &Request, stage: ReviewStage) -> StageProgress {
    match request.status {
        RequestStatus::Approved => StageProgress::Completed,
        RequestStatus::Rejected => match request.rejected_at {
            Some(halted) if stage < halted => StageProgress::Completed,
            Some(halted) if stage == halted => StageProgress::Rejected,
            _ => StageProgress::Skipped,
        },
        pending => match pending.review_stage() {
            Some(current) if stage < current => StageProgress::Completed,
            Some(current) if stage == current => StageProgress::InProgress,
            _ => StageProgress::Upcoming,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::request::{RequestStatus, ReviewStage};
    use crate::fixtures;

    use super::{StageProgress, Timeline};

    #[test]
    fn pending_legal_shows_creative_done_and_finance_upcoming() {
        let mut request = fixtures::demo_requests().remove(0);
        request.status = RequestStatus::PendingLegal;

        let timeline = Timeline::for_request(&request);
        assert_eq!(timeline.entries.len(), 4);
        assert_eq!(timeline.entries[0].date, Some(request.submission_date));
        assert_eq!(timeline.progress_of(ReviewStage::Creative), Some(StageProgress::Completed));
        assert_eq!(timeline.progress_of(ReviewStage::Legal), Some(StageProgress::InProgress));
        assert_eq!(timeline.progress_of(ReviewStage::Finance), Some(StageProgress::Upcoming));
    }

    #[test]
    fn approved_request_completes_every_stage() {
        let mut request = fixtures::demo_requests().remove(0);
        request.status = RequestStatus::Approved;

        let timeline = Timeline::for_request(&request);
        for stage in ReviewStage::ORDER {
            assert_eq!(timeline.progress_of(stage), Some(StageProgress::Completed));
        }
    }

    #[test]
    fn rejection_marks_the_halting_stage_and_skips_the_rest() {
        let mut request = fixtures::demo_requests().remove(0);
        request.status = RequestStatus::Rejected;
        request.rejection_reason = Some("Content does not meet broadcast standards".to_owned());
        request.rejected_at = Some(ReviewStage::Legal);

        let timeline = Timeline::for_request(&request);
        assert_eq!(timeline.progress_of(ReviewStage::Creative), Some(StageProgress::Completed));
        assert_eq!(timeline.progress_of(ReviewStage::Legal), Some(StageProgress::Rejected));
        assert_eq!(timeline.progress_of(ReviewStage::Finance), Some(StageProgress::Skipped));
    }
}
