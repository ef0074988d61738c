use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// A normalized page request: `page_number >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    page_number: u64,
    page_size: u64,
}

impl PaginationRequest {
    /// Normalizes caller supplied values.
    ///
    /// A missing or non-positive page number becomes 1. A missing or non-positive
    /// page size becomes `DEFAULT_PAGE_SIZE`, and a page size above `MAX_PAGE_SIZE`
    /// is capped.
    pub fn normalize(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_number = match page_number {
            Some(n) if n >= 1 => n as u64,
            _ => DEFAULT_PAGE_NUMBER,
        };
        let page_size = match page_size {
            Some(s) if s >= 1 => (s as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items before the requested page
    pub fn skip(&self) -> u64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Number of items in a full page
    pub fn take(&self) -> u64 {
        self.page_size
    }

    /// Wraps one page of items with the metadata derived from `total_count`
    pub fn build_response<T>(&self, items: Vec<T>, total_count: u64) -> PaginationResponse<T> {
        let total_pages = total_count.div_ceil(self.page_size);

        PaginationResponse {
            items,
            total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages,
            has_previous_page: self.page_number > 1,
            has_next_page: self.page_number < total_pages,
        }
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PaginationResponse<T> {
    /// Converts every item while keeping the page metadata
    pub fn try_map<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<PaginationResponse<U>, E> {
        Ok(PaginationResponse {
            items: self.items.into_iter().map(f).collect::<Result<Vec<U>, E>>()?,
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
        })
    }
}
