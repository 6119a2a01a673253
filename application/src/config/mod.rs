//! Application-level configuration.
//!
//! [`WorkflowPolicy`] carries the tunable rules use cases apply: the
//! attachment policy, the committee reject reason and paging limits.

pub mod workflow_policy;

pub use workflow_policy::{PagingPolicy, WorkflowPolicy};
