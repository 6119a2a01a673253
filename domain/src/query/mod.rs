//! Read-side filters, sorting and paging

pub mod filter;
pub mod history;
pub mod page;

pub use filter::{FormFilter, SortKey, SortOrder};
pub use history::{ApprovalHistoryFilter, ApprovalHistoryRow};
pub use page::{Page, PageRequest};
