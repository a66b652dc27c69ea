use std::sync::Mutex;

/// The identity block remembered across form sessions so a requester does
/// not retype it per submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityDraft {
    pub nome: String,
    pub telefone: String,
    pub email: String,
}

/// Persistence seam for the identity draft. Lifecycle: loaded when a form
/// machine is created, saved on every identity edit, cleared on successful
/// submission.
pub trait DraftStore: Send + Sync {
    fn load(&self) -> Option<IdentityDraft>;
    fn save(&self, draft: &IdentityDraft);
    fn clear(&self);
}

/// In-memory implementation, also the test double.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<IdentityDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: IdentityDraft) -> Self {
        Self {
            slot: Mutex::new(Some(draft)),
        }
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Option<IdentityDraft> {
        self.slot.lock().expect("draft lock").clone()
    }

    fn save(&self, draft: &IdentityDraft) {
        *self.slot.lock().expect("draft lock") = Some(draft.clone());
    }

    fn clear(&self) {
        *self.slot.lock().expect("draft lock") = None;
    }
}
