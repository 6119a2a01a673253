//! Paging

use serde::{Deserialize, Serialize};

/// Requested page (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 0 }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Clamp to page ≥ 1, apply the default size for 0 and cap at `max_limit`
    pub fn normalized(self, default_limit: usize, max_limit: Option<usize>) -> Self {
        let page = self.page.max(1);
        let mut limit = if self.limit == 0 {
            default_limit.max(1)
        } else {
            self.limit
        };
        if let Some(max) = max_limit {
            limit = limit.min(max.max(1));
        }
        Self { page, limit }
    }

    /// Items before this page; saturates, so huge page numbers land past the end
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of results plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    /// Slice an already filtered and sorted result set
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let limit = request.limit.max(1);
        let total_items = all.len();
        let total_pages = total_items.div_ceil(limit);
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(limit)
            .collect();
        Self {
            items,
            current_page: request.page.max(1),
            total_pages,
            total_items,
            limit,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            limit: self.limit,
        }
    }
}
