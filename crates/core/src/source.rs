//! Where the initial request collection comes from.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::request::Request;
use crate::errors::ApplicationError;
use crate::fixtures;
use crate::workflow::RequestWorkflow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestSource {
    Demo,
    File(PathBuf),
}

impl RequestSource {
    pub fn from_option(path: Option<&Path>) -> Self {
        path.map_or(Self::Demo, |path| Self::File(path.to_path_buf()))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Demo => "demo dataset".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<Vec<Request>, ApplicationError> {
        match self {
            Self::Demo => Ok(fixtures::demo_requests()),
            Self::File(path) => load_requests(path),
        }
    }

    /// Loads the collection and validates it into a ready engine.
    pub fn open(&self) -> Result<RequestWorkflow, ApplicationError> {
        let requests = self.load()?;
        let workflow = RequestWorkflow::new(requests)?;
        info!(
            event_name = "workflow.source.loaded",
            source = %self.describe(),
            requests = workflow.len(),
            "request collection loaded"
        );
        Ok(workflow)
    }
}

/// Reads a JSON array of requests.
pub fn load_requests(path: &Path) -> Result<Vec<Request>, ApplicationError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        ApplicationError::DataSource(format!("could not read `{}`: {error}", path.display()))
    })?;

    serde_json::from_str(&raw).map_err(|error| {
        ApplicationError::DataSource(format!("could not parse `{}`: {error}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::errors::{ApplicationError, IntakeError};

    use super::RequestSource;

    #[test]
    fn demo_source_opens_five_requests() {
        let workflow = RequestSource::Demo.open().expect("demo dataset is valid");
        assert_eq!(workflow.len(), 5);
    }

    #[test]
    fn file_source_reads_json_requests() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("requests.json");
        fs::write(
            &path,
            r#"[{
                "id": "REQ-010",
                "advertiser": "Sunrise Bakery",
                "media_type": "Radio",
                "program": "Morning Drive Show",
                "description": "Weekend special",
                "submitted_by": "Lina Haddad",
                "submission_date": "2024-02-01",
                "value": "900.00",
                "priority": "low",
                "status": "pending_legal"
            }]"#,
        )
        .expect("write requests");

        let requests = RequestSource::File(path).load().expect("requests parse");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].materials.is_empty());
        assert_eq!(requests[0].id.as_str(), "REQ-010");
    }

    #[test]
    fn unknown_status_is_a_data_source_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("requests.json");
        fs::write(
            &path,
            r#"[{"id": "REQ-001", "advertiser": "A", "media_type": "TV", "program": "P",
                "description": "D", "submitted_by": "S", "submission_date": "2024-01-01",
                "value": "1.00", "priority": "high", "status": "pending_review"}]"#,
        )
        .expect("write requests");

        let error = RequestSource::File(path).load().expect_err("unknown status");
        assert!(matches!(error, ApplicationError::DataSource(_)));
    }

    #[test]
    fn duplicate_ids_fail_intake_on_open() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("requests.json");
        let mut requests = crate::fixtures::demo_requests();
        requests.push(requests[1].clone());
        fs::write(&path, serde_json::to_string(&requests).expect("serialize"))
            .expect("write requests");

        let error = RequestSource::File(path).open().expect_err("duplicate id");
        assert!(matches!(error, ApplicationError::Intake(IntakeError::DuplicateRequestId(_))));
    }

    #[test]
    fn missing_file_is_a_data_source_error() {
        let dir = TempDir::new().expect("temp dir");
        let error = RequestSource::File(dir.path().join("absent.json"))
            .load()
            .expect_err("missing file");
        assert!(matches!(error, ApplicationError::DataSource(message) if message.contains("absent.json")));
    }
}
