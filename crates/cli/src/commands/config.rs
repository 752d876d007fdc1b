use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use adbook_core::config::{AppConfig, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG};

#[derive(Debug, Serialize)]
struct ConfigField {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let workflow = &config.workflow;
    let fields = vec![
        ConfigField {
            key: "workflow.requests_file",
            value: workflow
                .requests_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<demo dataset>".to_string()),
            source: source("workflow.requests_file", "ADBOOK_WORKFLOW_REQUESTS_FILE"),
        },
        ConfigField {
            key: "workflow.currency",
            value: workflow.currency.clone(),
            source: source("workflow.currency", "ADBOOK_WORKFLOW_CURRENCY"),
        },
        ConfigField {
            key: "workflow.require_reviewer_role",
            value: workflow.require_reviewer_role.to_string(),
            source: source("workflow.require_reviewer_role", "ADBOOK_WORKFLOW_REQUIRE_REVIEWER_ROLE"),
        },
        ConfigField {
            key: "workflow.honor_blanket_permissions",
            value: workflow.honor_blanket_permissions.to_string(),
            source: source(
                "workflow.honor_blanket_permissions",
                "ADBOOK_WORKFLOW_HONOR_BLANKET_PERMISSIONS",
            ),
        },
        ConfigField {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", "ADBOOK_LOGGING_LEVEL"),
        },
        ConfigField {
            key: "logging.format",
            value: format!("{:?}", config.logging.format).to_ascii_lowercase(),
            source: source("logging.format", "ADBOOK_LOGGING_FORMAT"),
        },
    ];

    let message = fields
        .iter()
        .map(|field| format!("{} = {} (source: {})", field.key, field.value, field.source))
        .collect::<Vec<_>>()
        .join("; ");
    CommandResult::success("config", message, fields)
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    [PathBuf::from("adbook.toml"), PathBuf::from("config/adbook.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var(env_key).is_ok_and(|value| !value.trim().is_empty()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
