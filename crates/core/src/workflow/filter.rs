use serde::{Deserialize, Serialize};

use crate::domain::request::{MediaType, Request, RequestStatus};

/// Search and facet filter over the request list. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    search: Option<String>,
    pub status: Option<RequestStatus>,
    pub media_type: Option<MediaType>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match against advertiser name or request id.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, request: &Request) -> bool {
        let matches_search = self.search.as_deref().map_or(true, |term| {
            request.advertiser.to_lowercase().contains(term)
                || request.id.as_str().to_lowercase().contains(term)
        });
        let matches_status = self.status.map_or(true, |status| request.status == status);
        let matches_media = self.media_type.map_or(true, |media| request.media_type == media);

        matches_search && matches_status && matches_media
    }
}
