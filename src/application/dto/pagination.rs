use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_more: bool,
}

impl PageInfo {
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        let total_pages = if total_count == 0 || limit == 0 {
            0
        } else {
            total_count.div_ceil(u64::from(limit)) as u32
        };
        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_more: page < total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: PageInfo) -> Self {
        Self { items, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let info = PageInfo::new(1, 10, 21);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_more);
        assert!(!PageInfo::new(3, 10, 21).has_more);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let info = PageInfo::new(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_more);
    }
}
