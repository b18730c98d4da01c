//! Response envelopes: `{ data }` and `{ data, pageInfo }`.
use serde::{Deserialize, Serialize};

use crate::repos::page::Page;

/// `?page=&size=` on plain list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SingleResponse<T> {
    pub data: T,
}

impl<T> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiResponse<T> {
    pub data: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> From<Page<T>> for MultiResponse<T> {
    fn from(page: Page<T>) -> Self {
        let page_info = PageInfo {
            page: page.request.page,
            size: page.request.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
        };
        Self {
            data: page.items,
            page_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::page::PageRequest;

    #[test]
    fn multi_response_shape() {
        let page = Page {
            items: vec!["a", "b"],
            request: PageRequest { page: 2, size: 2 },
            total_elements: 5,
        };

        let json = serde_json::to_value(MultiResponse::from(page)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "data": ["a", "b"],
                "pageInfo": { "page": 2, "size": 2, "totalElements": 5, "totalPages": 3 }
            })
        );
    }
}
