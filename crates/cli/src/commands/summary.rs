use adbook_core::config::LoadOptions;
use adbook_core::WorkflowSummary;
use serde::Serialize;

use crate::commands::{format_money, load_workflow, CommandResult};

#[derive(Debug, Serialize)]
struct SummaryView {
    #[serde(flatten)]
    summary: WorkflowSummary,
    currency: String,
    pending_value_display: String,
    approved_value_display: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let loaded = match load_workflow("summary", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let summary = loaded.workflow.summary();
    let currency = loaded.config.workflow.currency;
    let message = format!(
        "{} requests, {} pending review ({})",
        summary.total,
        summary.pending_review,
        format_money(summary.pending_value, &currency)
    );

    let view = SummaryView {
        pending_value_display: format_money(summary.pending_value, &currency),
        approved_value_display: format_money(summary.approved_value, &currency),
        summary,
        currency,
    };
    CommandResult::success("summary", message, view)
}
