//! Deterministic demo dataset: one request parked at each workflow status.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::request::{MediaType, Priority, Request, RequestId, RequestStatus, ReviewStage};

struct Seed {
    id: &'static str,
    advertiser: &'static str,
    media_type: MediaType,
    program: &'static str,
    status: RequestStatus,
    day: u32,
    value_cents: i64,
    materials: &'static [&'static str],
    description: &'static str,
    submitted_by: &'static str,
    priority: Priority,
    rejection: Option<(&'static str, ReviewStage)>,
}

const SEEDS: [Seed; 5] = [
    Seed {
        id: "REQ-001",
        advertiser: "Coca-Cola Company",
        media_type: MediaType::Tv,
        program: "Prime Time News",
        status: RequestStatus::PendingCreative,
        day: 15,
        value_cents: 520_000,
        materials: &["video.mp4", "script.pdf"],
        description: "30 second spot for the new Coke Zero campaign",
        submitted_by: "John Smith",
        priority: Priority::High,
        rejection: None,
    },
    Seed {
        id: "REQ-002",
        advertiser: "Nike Sports",
        media_type: MediaType::Radio,
        program: "Morning Drive Show",
        status: RequestStatus::PendingLegal,
        day: 14,
        value_cents: 280_000,
        materials: &["audio.mp3", "legal_docs.pdf"],
        description: "Audio spot promoting Nike Air Max",
        submitted_by: "Sarah Johnson",
        priority: Priority::Medium,
        rejection: None,
    },
    Seed {
        id: "REQ-003",
        advertiser: "Local Restaurant",
        media_type: MediaType::Print,
        program: "Daily News",
        status: RequestStatus::PendingFinance,
        day: 13,
        value_cents: 45_000,
        materials: &["design.jpg", "copy.doc"],
        description: "Half page ad for a weekend offer",
        submitted_by: "Mike Wilson",
        priority: Priority::Low,
        rejection: None,
    },
    Seed {
        id: "REQ-004",
        advertiser: "Tech Startup",
        media_type: MediaType::Digital,
        program: "Social Media Package",
        status: RequestStatus::Approved,
        day: 12,
        value_cents: 120_000,
        materials: &["banner.png", "video.mp4"],
        description: "Digital campaign for an app launch",
        submitted_by: "Emily Davis",
        priority: Priority::High,
        rejection: None,
    },
    Seed {
        id: "REQ-005",
        advertiser: "Fashion Brand",
        media_type: MediaType::Tv,
        program: "Evening Show",
        status: RequestStatus::Rejected,
        day: 11,
        value_cents: 360_000,
        materials: &["video.mp4"],
        description: "Fashion spot with controversial content",
        submitted_by: "Alex Brown",
        priority: Priority::Medium,
        rejection: Some(("Content does not meet broadcast standards", ReviewStage::Creative)),
    },
];

pub fn demo_requests() -> Vec<Request> {
    SEEDS.iter().map(seed_request).collect()
}

fn seed_request(seed: &Seed) -> Request {
    Request {
        id: RequestId::from(seed.id),
        advertiser: seed.advertiser.to_owned(),
        media_type: seed.media_type,
        program: seed.program.to_owned(),
        description: seed.description.to_owned(),
        submitted_by: seed.submitted_by.to_owned(),
        submission_date: NaiveDate::from_ymd_opt(2024, 1, seed.day).unwrap_or(NaiveDate::MIN),
        value: Decimal::new(seed.value_cents, 2),
        priority: seed.priority,
        materials: seed.materials.iter().map(|name| (*name).to_owned()).collect(),
        status: seed.status,
        rejection_reason: seed.rejection.map(|(reason, _)| reason.to_owned()),
        rejected_at: seed.rejection.map(|(_, stage)| stage),
    }
}
