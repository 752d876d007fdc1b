//! Review pipeline: transition table, engine, bulk operations, and read-side views.

pub mod bulk;
pub mod engine;
pub mod filter;
pub mod shared;
pub mod states;
pub mod timeline;

pub use bulk::{BulkItemResult, BulkOutcome, Selection};
pub use engine::RequestWorkflow;
pub use filter::RequestFilter;
pub use shared::SharedRequestWorkflow;
pub use states::{next_status, TransitionOutcome, WorkflowAction};
pub use timeline::{StageProgress, Timeline, TimelineEntry};
