use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of a `REQ-NNN` style identifier.
    pub fn sequence_number(&self) -> Option<u32> {
        let digits = self.0.rsplit('-').next()?;
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn from_sequence(sequence: u32) -> Self {
        Self(format!("REQ-{sequence:03}"))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "TV")]
    Tv,
    Radio,
    Print,
    Digital,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [Self::Tv, Self::Radio, Self::Print, Self::Digital];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Radio => "Radio",
            Self::Print => "Print",
            Self::Digital => "Digital",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tv" => Some(Self::Tv),
            "radio" => Some(Self::Radio),
            "print" => Some(Self::Print),
            "digital" => Some(Self::Digital),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Review stages in the order a request passes through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStage {
    Creative,
    Legal,
    Finance,
}

impl ReviewStage {
    pub const ORDER: [ReviewStage; 3] = [Self::Creative, Self::Legal, Self::Finance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creative => "creative",
            Self::Legal => "legal",
            Self::Finance => "finance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Creative => "Creative Review",
            Self::Legal => "Legal Review",
            Self::Finance => "Finance Review",
        }
    }

    pub fn pending_status(&self) -> RequestStatus {
        match self {
            Self::Creative => RequestStatus::PendingCreative,
            Self::Legal => RequestStatus::PendingLegal,
            Self::Finance => RequestStatus::PendingFinance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    PendingCreative,
    PendingLegal,
    PendingFinance,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        Self::PendingCreative,
        Self::PendingLegal,
        Self::PendingFinance,
        Self::Approved,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingCreative => "pending_creative",
            Self::PendingLegal => "pending_legal",
            Self::PendingFinance => "pending_finance",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending_creative" => Some(Self::PendingCreative),
            "pending_legal" => Some(Self::PendingLegal),
            "pending_finance" => Some(Self::PendingFinance),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn review_stage(&self) -> Option<ReviewStage> {
        match self {
            Self::PendingCreative => Some(ReviewStage::Creative),
            Self::PendingLegal => Some(ReviewStage::Legal),
            Self::PendingFinance => Some(ReviewStage::Finance),
            Self::Approved | Self::Rejected => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.review_stage().is_some()
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Workflow stage shown next to a request. Derived, never stored.
    pub fn stage_label(&self) -> &'static str {
        match self.review_stage() {
            Some(stage) => stage.label(),
            None if *self == Self::Approved => "Completed",
            None => "Rejected",
        }
    }

    /// Badge text for the status itself.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            other => other.stage_label(),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub advertiser: String,
    pub media_type: MediaType,
    pub program: String,
    pub description: String,
    pub submitted_by: String,
    pub submission_date: NaiveDate,
    pub value: Decimal,
    pub priority: Priority,
    #[serde(default)]
    pub materials: Vec<String>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<ReviewStage>,
}

impl Request {
    pub fn stage_label(&self) -> &'static str {
        self.status.stage_label()
    }

    pub fn current_stage(&self) -> Option<ReviewStage> {
        self.status.review_stage()
    }
}

/// Fields supplied by an advertiser at submission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequest {
    pub advertiser: String,
    pub media_type: MediaType,
    pub program: String,
    pub description: String,
    pub submitted_by: String,
    pub submission_date: NaiveDate,
    pub value: Decimal,
    pub priority: Priority,
    #[serde(default)]
    pub materials: Vec<String>,
}

impl NewRequest {
    pub fn into_request(self, id: RequestId) -> Request {
        Request {
            id,
            advertiser: self.advertiser,
            media_type: self.media_type,
            program: self.program,
            description: self.description,
            submitted_by: self.submitted_by,
            submission_date: self.submission_date,
            value: self.value,
            priority: self.priority,
            materials: self.materials,
            status: RequestStatus::PendingCreative,
            rejection_reason: None,
            rejected_at: None,
        }
    }
}
