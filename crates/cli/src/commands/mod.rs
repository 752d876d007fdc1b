pub mod config;
pub mod list;
pub mod review;
pub mod show;
pub mod summary;

use adbook_core::config::{AppConfig, LoadOptions};
use adbook_core::{Request, RequestSource, RequestWorkflow};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_DATA_SOURCE: u8 = 3;
pub const EXIT_ITEM_FAILED: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    data: Value,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: to_value(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::failure_with_data(command, error_class, message, exit_code, Value::Null)
    }

    pub fn failure_with_data(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
        data: impl Serialize,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: to_value(data),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Config plus an opened workflow, or the failure payload explaining why not.
pub(crate) struct Loaded {
    pub config: AppConfig,
    pub workflow: RequestWorkflow,
}

pub(crate) fn load_workflow(command: &str, options: &LoadOptions) -> Result<Loaded, CommandResult> {
    let config = AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })?;

    let source = RequestSource::from_option(config.workflow.requests_file.as_deref());
    let workflow = source.open().map_err(|error| {
        CommandResult::failure(
            command,
            "data_source",
            format!("could not load requests from {}: {error}", source.describe()),
            EXIT_DATA_SOURCE,
        )
    })?;

    let workflow = workflow.with_authority(config.workflow.review_authority());
    Ok(Loaded { config, workflow })
}

/// One line of request output, shared by `list` and `show`.
#[derive(Debug, Serialize)]
pub(crate) struct RequestRow<'a> {
    id: &'a str,
    advertiser: &'a str,
    media_type: &'static str,
    program: &'a str,
    submitted_by: &'a str,
    submission_date: String,
    value: String,
    priority: &'static str,
    status: &'static str,
    stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<&'a str>,
}

impl<'a> RequestRow<'a> {
    pub(crate) fn new(request: &'a Request, currency: &str) -> Self {
        Self {
            id: request.id.as_str(),
            advertiser: &request.advertiser,
            media_type: request.media_type.as_str(),
            program: &request.program,
            submitted_by: &request.submitted_by,
            submission_date: request.submission_date.to_string(),
            value: format_money(request.value, currency),
            priority: request.priority.as_str(),
            status: request.status.as_str(),
            stage: RequestWorkflow::derived_stage_label(request),
            rejection_reason: request.rejection_reason.as_deref(),
        }
    }
}

pub(crate) fn format_money(value: Decimal, currency: &str) -> String {
    format!("{currency} {:.2}", value)
}

fn to_value(data: impl Serialize) -> Value {
    serde_json::to_value(data).unwrap_or(Value::Null)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
