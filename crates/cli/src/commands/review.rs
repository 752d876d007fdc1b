use std::sync::Arc;

use adbook_core::config::LoadOptions;
use adbook_core::{
    AuditEvent, BulkOutcome, InMemoryAuditSink, RequestId, Reviewer, ReviewerRole, WorkflowAction,
};
use serde::Serialize;

use crate::commands::{load_workflow, CommandResult, EXIT_CONFIG, EXIT_ITEM_FAILED};

#[derive(Clone, Debug)]
pub struct ReviewArgs {
    pub ids: Vec<String>,
    pub role: Option<ReviewerRole>,
    pub user: String,
}

#[derive(Debug, Serialize)]
struct ItemView {
    id: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReviewView {
    action: WorkflowAction,
    correlation_id: String,
    reviewer: Option<String>,
    succeeded: usize,
    failed: usize,
    items: Vec<ItemView>,
    audit: Vec<AuditEvent>,
}

pub fn approve(options: &LoadOptions, args: &ReviewArgs) -> CommandResult {
    run("approve", options, args, None)
}

pub fn reject(options: &LoadOptions, args: &ReviewArgs, reason: &str) -> CommandResult {
    run("reject", options, args, Some(reason))
}

fn run(
    command: &str,
    options: &LoadOptions,
    args: &ReviewArgs,
    reason: Option<&str>,
) -> CommandResult {
    let loaded = match load_workflow(command, options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    if loaded.config.workflow.require_reviewer_role && args.role.is_none() {
        return CommandResult::failure(
            command,
            "reviewer_required",
            "workflow.require_reviewer_role is set; pass --role",
            EXIT_CONFIG,
        );
    }

    let audit = InMemoryAuditSink::default();
    let mut workflow = loaded.workflow.with_audit_sink(Arc::new(audit.clone()));
    let reviewer = args.role.map(|role| Reviewer::with_role(args.user.clone(), role));
    let ids: Vec<RequestId> = args.ids.iter().map(|id| RequestId::from(id.as_str())).collect();

    let outcome = match (reason, reviewer.as_ref()) {
        (None, Some(reviewer)) => workflow.bulk_approve_as(reviewer, &ids),
        (None, None) => workflow.bulk_approve(&ids),
        (Some(reason), Some(reviewer)) => workflow.bulk_reject_as(reviewer, &ids, reason),
        (Some(reason), None) => workflow.bulk_reject(&ids, reason),
    };

    let message = outcome.summary_line();
    let view = review_view(&outcome, reviewer.as_ref(), audit.events());
    if outcome.is_complete_success() {
        CommandResult::success(command, message, view)
    } else {
        CommandResult::failure_with_data(command, "item_failed", message, EXIT_ITEM_FAILED, view)
    }
}

fn review_view(
    outcome: &BulkOutcome,
    reviewer: Option<&Reviewer>,
    audit: Vec<AuditEvent>,
) -> ReviewView {
    let items = outcome
        .items
        .iter()
        .map(|item| match &item.result {
            Ok(transition) => ItemView {
                id: item.id.to_string(),
                status: "ok",
                from: Some(transition.from.as_str()),
                to: Some(transition.to.as_str()),
                error_kind: None,
                error: None,
            },
            Err(error) => ItemView {
                id: item.id.to_string(),
                status: "error",
                from: None,
                to: None,
                error_kind: Some(error.kind()),
                error: Some(error.to_string()),
            },
        })
        .collect();

    ReviewView {
        action: outcome.action,
        correlation_id: outcome.correlation_id.clone(),
        reviewer: reviewer.map(|reviewer| format!("{} ({})", reviewer.user_id, reviewer.role.as_str())),
        succeeded: outcome.success_count(),
        failed: outcome.failure_count(),
        items,
        audit,
    }
}
