use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use adbook_cli::commands::list::ListArgs;
use adbook_cli::commands::review::{self, ReviewArgs};
use adbook_cli::commands::{config, list, show, summary};
use adbook_core::config::{ConfigOverrides, LoadOptions};
use adbook_core::{MediaType, RequestStatus, ReviewerRole};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn list_filters_by_status_and_media() {
    with_env(&[], |options| {
        let args = ListArgs {
            status: Some(RequestStatus::PendingCreative),
            media_type: Some(MediaType::Tv),
            search: None,
        };
        let result = list::run(&options, &args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "list");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], "1 of 5 requests");
        assert_eq!(payload["data"][0]["id"], "REQ-001");
        assert_eq!(payload["data"][0]["stage"], "Creative Review");
        assert_eq!(payload["data"][0]["value"], "USD 5200.00");
    });
}

#[test]
fn list_with_unmatched_search_is_empty_not_an_error() {
    with_env(&[], |options| {
        let args = ListArgs { search: Some("no such advertiser".to_string()), ..ListArgs::default() };
        let result = list::run(&options, &args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(0));
    });
}

#[test]
fn show_includes_timeline() {
    with_env(&[], |options| {
        let result = show::run(&options, "REQ-005");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["rejection_reason"], "Content does not meet broadcast standards");
        let timeline = &payload["data"]["timeline"]["entries"];
        assert_eq!(timeline[0]["label"], "Submitted");
        assert_eq!(timeline[1]["progress"], "rejected");
        assert_eq!(timeline[3]["progress"], "skipped");
    });
}

#[test]
fn show_unknown_request_fails_with_item_code() {
    with_env(&[], |options| {
        let result = show::run(&options, "REQ-404");
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "not_found");
    });
}

#[test]
fn approve_reports_partial_failure() {
    with_env(&[], |options| {
        let args = ReviewArgs {
            ids: vec!["REQ-001".to_string(), "REQ-004".to_string()],
            role: None,
            user: "operator".to_string(),
        };
        let result = review::approve(&options, &args);
        assert_eq!(result.exit_code, 4, "one item was already approved");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "item_failed");
        assert_eq!(payload["message"], "1 approved, 1 failed: REQ-004 already approved");
        assert_eq!(payload["data"]["items"][0]["to"], "pending_legal");
        assert_eq!(payload["data"]["items"][1]["error_kind"], "invalid_transition");
        let audit = payload["data"]["audit"].as_array().cloned().unwrap_or_default();
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0]["event_type"], "workflow.request_approved");
        assert_eq!(audit[0]["request_id"], "REQ-001");
        assert_eq!(audit[1]["event_type"], "workflow.transition_refused");
        assert_eq!(audit[1]["outcome"], "rejected");
        assert_eq!(audit[1]["metadata"]["error_kind"], "invalid_transition");
        assert!(audit.iter().all(|event| event["correlation_id"] == payload["data"]["correlation_id"]));
    });
}

#[test]
fn reviewer_role_limits_stages() {
    with_env(&[], |options| {
        let args = ReviewArgs {
            ids: vec!["REQ-002".to_string(), "REQ-003".to_string()],
            role: Some(ReviewerRole::Legal),
            user: "sara".to_string(),
        };
        let result = review::reject(&options, &args, "Missing disclaimer");
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["reviewer"], "sara (legal)");
        assert_eq!(payload["data"]["items"][0]["status"], "ok");
        assert_eq!(payload["data"]["items"][1]["error_kind"], "unauthorized");
    });
}

#[test]
fn blank_reason_fails_every_item() {
    with_env(&[], |options| {
        let args = ReviewArgs {
            ids: vec!["REQ-001".to_string()],
            role: None,
            user: "operator".to_string(),
        };
        let result = review::reject(&options, &args, "   ");
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["items"][0]["error_kind"], "empty_reason");
    });
}

#[test]
fn required_reviewer_role_is_enforced() {
    with_env(&[("ADBOOK_WORKFLOW_REQUIRE_REVIEWER_ROLE", "true")], |options| {
        let args = ReviewArgs {
            ids: vec!["REQ-001".to_string()],
            role: None,
            user: "operator".to_string(),
        };
        let result = review::approve(&options, &args);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "reviewer_required");
    });
}

#[test]
fn stage_scoped_authority_ignores_blanket_permissions() {
    with_env(&[("ADBOOK_WORKFLOW_HONOR_BLANKET_PERMISSIONS", "false")], |options| {
        let args = ReviewArgs {
            ids: vec!["REQ-001".to_string()],
            role: Some(ReviewerRole::SuperAdmin),
            user: "root".to_string(),
        };
        let result = review::approve(&options, &args);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["items"][0]["error_kind"], "unauthorized");
    });
}

#[test]
fn invalid_config_returns_config_failure() {
    with_env(&[("ADBOOK_WORKFLOW_CURRENCY", "dollars")], |options| {
        let result = summary::run(&options);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "summary");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn missing_requests_file_returns_data_source_failure() {
    with_env(&[("ADBOOK_WORKFLOW_REQUESTS_FILE", "/nonexistent/adbook/requests.json")], |options| {
        let result = list::run(&options, &ListArgs::default());
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "data_source");
    });
}

#[test]
fn requests_file_override_replaces_demo_dataset() {
    with_env(&[], |options| {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("requests.json");
        fs::write(
            &path,
            r#"[{
                "id": "REQ-041",
                "advertiser": "Harbor Cinema",
                "media_type": "Print",
                "program": "Weekend Guide",
                "description": "Quarter page listing",
                "submitted_by": "Noor Saleh",
                "submission_date": "2024-03-02",
                "value": "310.50",
                "priority": "medium",
                "status": "pending_finance"
            }]"#,
        )
        .expect("write requests");

        let options = LoadOptions {
            overrides: ConfigOverrides { requests_file: Some(path), ..ConfigOverrides::default() },
            ..options
        };
        let result = summary::run(&options);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["total"], 1);
        assert_eq!(payload["data"]["stage_backlog"]["finance"], 1);
        assert_eq!(payload["data"]["pending_value_display"], "USD 310.50");
    });
}

#[test]
fn summary_counts_demo_dataset() {
    with_env(&[("ADBOOK_WORKFLOW_CURRENCY", "EUR")], |options| {
        let result = summary::run(&options);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["total"], 5);
        assert_eq!(payload["data"]["pending_review"], 3);
        assert_eq!(payload["data"]["status_counts"]["approved"], 1);
        assert_eq!(payload["data"]["currency"], "EUR");
        assert_eq!(payload["message"], "5 requests, 3 pending review (EUR 8450.00)");
    });
}

#[test]
fn config_attributes_sources() {
    with_env(&[("ADBOOK_WORKFLOW_CURRENCY", "GBP")], |options| {
        let result = config::run(&options);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let fields = payload["data"].as_array().cloned().unwrap_or_default();
        let currency = fields
            .iter()
            .find(|field| field["key"] == "workflow.currency")
            .expect("currency field present");
        assert_eq!(currency["value"], "GBP");
        assert_eq!(currency["source"], "env (ADBOOK_WORKFLOW_CURRENCY)");

        let level = fields
            .iter()
            .find(|field| field["key"] == "logging.level")
            .expect("logging level present");
        assert_eq!(level["source"], "default");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce(LoadOptions)) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "ADBOOK_WORKFLOW_REQUESTS_FILE",
        "ADBOOK_WORKFLOW_CURRENCY",
        "ADBOOK_WORKFLOW_REQUIRE_REVIEWER_ROLE",
        "ADBOOK_WORKFLOW_HONOR_BLANKET_PERMISSIONS",
        "ADBOOK_LOGGING_LEVEL",
        "ADBOOK_LOGGING_FORMAT",
        "ADBOOK_LOG_LEVEL",
        "ADBOOK_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    // Point at a file that never exists so a stray adbook.toml in the working directory is ignored.
    let scratch = TempDir::new().expect("temp dir");
    let options = LoadOptions {
        config_path: Some(scratch.path().join("adbook.toml")),
        ..LoadOptions::default()
    };
    test_fn(options);

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
