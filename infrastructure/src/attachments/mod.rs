//! Attachment storage adapters

mod local;

pub use local::LocalAttachmentStore;
