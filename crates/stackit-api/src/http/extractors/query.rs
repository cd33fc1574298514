//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use stackit_core::service::question::{ListQuestions, Pagination};

/// Query parameters for the question list endpoint.
///
/// Numbers stay strings here so malformed values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
pub struct QuestionListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Exact tag match.
    pub tag: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

impl QuestionListQuery {
    pub fn into_params(self) -> ListQuestions {
        ListQuestions {
            pagination: Pagination::from_raw(self.page.as_deref(), self.limit.as_deref()),
            tag: self.tag,
            search: self.search,
        }
    }
}
