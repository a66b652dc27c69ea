pub mod draft;
pub mod machine;

pub use draft::{DraftStore, IdentityDraft, MemoryDraftStore};
pub use machine::{Attachment, FormMachine, FormPhase, MAX_ATTACHMENTS};
