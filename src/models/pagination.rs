//! Pagination parameters and the paged response envelope.

use serde::Serialize;
use utoipa::ToSchema;

/// Page size for financial record lists.
pub const RECORD_PAGE_SIZE: u64 = 15;
/// Page size for directory-style lists (members, pledges, offering types).
pub const DIRECTORY_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest page whose offset still fits the signed 64-bit OFFSET databases accept.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn get_offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn get_limit(&self) -> u64 {
        self.limit
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl PageMeta {
    pub fn new(params: &PaginationParams, total: u64) -> Self {
        Self {
            total,
            page: params.page,
            limit: params.limit,
            pages: total.div_ceil(params.limit),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        Self {
            success: true,
            data,
            meta: PageMeta::new(params, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params() {
        let params = PaginationParams::new(Some(2), Some(10), RECORD_PAGE_SIZE);
        assert_eq!(params.page, 2);
        assert_eq!(params.get_limit(), 10);
        assert_eq!(params.get_offset(), 10);
    }

    #[test]
    fn test_pagination_params_defaults_and_clamping() {
        let params = PaginationParams::new(None, None, RECORD_PAGE_SIZE);
        assert_eq!((params.page, params.limit), (1, 15));

        let params = PaginationParams::new(Some(0), Some(0), DIRECTORY_PAGE_SIZE);
        assert_eq!((params.page, params.limit), (1, 1));

        let params = PaginationParams::new(None, Some(1_000), DIRECTORY_PAGE_SIZE);
        assert_eq!(params.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_is_clamped_without_overflow() {
        let params = PaginationParams::new(Some(u64::MAX), Some(1_000), RECORD_PAGE_SIZE);
        assert_eq!(params.page, MAX_PAGE);
        assert!(params.get_offset() <= i64::MAX as u64);

        let params = PaginationParams {
            page: u64::MAX,
            limit: MAX_PAGE_SIZE,
        };
        assert_eq!(params.get_offset(), u64::MAX);
    }

    #[test]
    fn test_page_meta_rounds_up() {
        let params = PaginationParams::new(Some(1), Some(10), RECORD_PAGE_SIZE);
        assert_eq!(PageMeta::new(&params, 25).pages, 3);
        assert_eq!(PageMeta::new(&params, 30).pages, 3);
        assert_eq!(PageMeta::new(&params, 0).pages, 0);
        assert_eq!(PageMeta::new(&params, 1).pages, 1);
    }
}
