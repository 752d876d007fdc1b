use adbook_core::config::LoadOptions;
use adbook_core::{MediaType, RequestFilter, RequestStatus};

use crate::commands::{load_workflow, CommandResult, RequestRow};

#[derive(Clone, Debug, Default)]
pub struct ListArgs {
    pub status: Option<RequestStatus>,
    pub media_type: Option<MediaType>,
    pub search: Option<String>,
}

impl ListArgs {
    fn filter(&self) -> RequestFilter {
        let mut filter = RequestFilter::new();
        if let Some(search) = &self.search {
            filter = filter.search(search);
        }
        if let Some(status) = self.status {
            filter = filter.status(status);
        }
        if let Some(media_type) = self.media_type {
            filter = filter.media_type(media_type);
        }
        filter
    }
}

pub fn run(options: &LoadOptions, args: &ListArgs) -> CommandResult {
    let loaded = match load_workflow("list", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let currency = loaded.config.workflow.currency.as_str();
    let rows: Vec<RequestRow<'_>> = loaded
        .workflow
        .filter(args.filter())
        .map(|request| RequestRow::new(request, currency))
        .collect();

    let message = format!("{} of {} requests", rows.len(), loaded.workflow.len());
    CommandResult::success("list", message, rows)
}
