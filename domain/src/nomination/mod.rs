//! Nomination forms
//!
//! A [`Form`](entities::Form) is one award nomination. It is created in
//! status 1 by a student (nominating themselves) or an organization
//! (nominating a student) and owns zero or more PDF attachments.

pub mod attachment;
pub mod entities;
pub mod status;
pub mod submission;

pub use attachment::{AttachmentPolicy, StoredFile, Upload};
pub use entities::{Attachment, Form, NominationDraft, OrganizationDetails};
pub use status::{Decision, FormStatus};
pub use submission::{NominationInput, NomineeInput, parse_date};
