use adbook_core::config::LoadOptions;
use adbook_core::{RequestId, Timeline};
use serde::Serialize;

use crate::commands::{load_workflow, CommandResult, RequestRow, EXIT_ITEM_FAILED};

#[derive(Debug, Serialize)]
struct RequestDetail<'a> {
    #[serde(flatten)]
    row: RequestRow<'a>,
    description: &'a str,
    materials: &'a [String],
    timeline: Timeline,
}

pub fn run(options: &LoadOptions, id: &str) -> CommandResult {
    let loaded = match load_workflow("show", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let id = RequestId::from(id);
    let Some(request) = loaded.workflow.get(&id) else {
        return CommandResult::failure(
            "show",
            "not_found",
            format!("request `{id}` was not found"),
            EXIT_ITEM_FAILED,
        );
    };

    let detail = RequestDetail {
        row: RequestRow::new(request, &loaded.config.workflow.currency),
        description: &request.description,
        materials: &request.materials,
        timeline: Timeline::for_request(request),
    };
    let message = format!("{} is at {}", id, request.stage_label());
    CommandResult::success("show", message, detail)
}
