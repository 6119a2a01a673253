//! Workflow policy: the configurable parts of the nomination rules.

use award_domain::{AttachmentPolicy, CommitteeRule, PageRequest};

/// Page size defaults and caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    /// Page size for searches when none is requested.
    pub default_page_size: usize,
    /// Upper bound for search page sizes.
    pub max_page_size: usize,
    /// Page size of the paged personal history.
    pub history_page_size: usize,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 5,
            history_page_size: 10,
        }
    }
}

impl PagingPolicy {
    /// Normalize a search page request
    pub fn search(&self, page: PageRequest) -> PageRequest {
        page.normalized(self.default_page_size, Some(self.max_page_size))
    }

    /// Normalize a history page request; its size is fixed
    pub fn history(&self, page: PageRequest) -> PageRequest {
        PageRequest::new(page.page, self.history_page_size).normalized(self.history_page_size, None)
    }
}

/// Rules handed to the use cases.
#[derive(Debug, Clone, Default)]
pub struct WorkflowPolicy {
    pub attachments: AttachmentPolicy,
    pub committee: CommitteeRule,
    pub paging: PagingPolicy,
}

impl WorkflowPolicy {
    // ==================== Builder Methods ====================

    pub fn with_attachments(mut self, attachments: AttachmentPolicy) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_committee(mut self, committee: CommitteeRule) -> Self {
        self.committee = committee;
        self
    }

    pub fn with_paging(mut self, paging: PagingPolicy) -> Self {
        self.paging = paging;
        self
    }
}
