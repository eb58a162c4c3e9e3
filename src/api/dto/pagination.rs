//! Search parameters and paged responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Page, PageRequest};

/// Query parameters shared by the search endpoints.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Case-insensitive fragment of the name; empty matches everything
    #[serde(default)]
    #[param(example = "high")]
    pub query: String,

    /// Page number (0-based)
    #[serde(default)]
    #[param(minimum = 0, example = 0)]
    pub page: u32,

    /// Number of items per page (max 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub size: u32,
}

fn default_size() -> u32 {
    PageRequest::DEFAULT_SIZE
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// One page of search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    #[schema(example = 0)]
    pub page_number: u32,
    #[schema(example = 20)]
    pub page_size: u32,
    #[schema(example = 42)]
    pub total_elements: u64,
    #[schema(example = 3)]
    pub total_pages: u32,
    #[schema(example = true)]
    pub has_next: bool,
    #[schema(example = false)]
    pub has_previous: bool,
}

impl<T> PagedResponse<T> {
    pub fn from_page<D>(page: Page<D>, f: impl FnMut(D) -> T) -> Self {
        let page_number = page.request.page;
        let page_size = page.request.size;
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        let total_elements = page.total;

        Self {
            content: page.items.into_iter().map(f).collect(),
            page_number,
            page_size,
            total_elements,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twenty() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.query, "");
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn size_out_of_range_fails_validation() {
        for size in [0, 101] {
            let params = PageParams {
                query: String::new(),
                page: 0,
                size,
            };
            assert!(params.validate().is_err());
        }
    }

    #[test]
    fn paged_response_uses_camel_case() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 5);
        let response = PagedResponse::from_page(page, |n: i32| n.to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["content"], serde_json::json!(["1", "2"]));
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalElements"], 5);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], true);
    }
}
