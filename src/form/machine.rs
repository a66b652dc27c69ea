use std::sync::Arc;

use serde_json::{Map, Value};

use crate::submission::phone;
use crate::submission::schema::FormKind;
use crate::submission::validate::{self, FieldError, ValidationCtx};

use super::draft::{DraftStore, IdentityDraft};

/// Attachments the client can send (name + size only; bytes stay with the
/// transport layer).
pub const MAX_ATTACHMENTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Success { protocolo: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub size: u64,
}

/// Client-side model of one form: field values, attachments, validation
/// state and the editing → submitting → success lifecycle. A front-end
/// drives it with events and renders from its accessors.
pub struct FormMachine {
    kind: FormKind,
    phase: FormPhase,
    values: Map<String, Value>,
    attachments: Vec<Attachment>,
    field_errors: Vec<FieldError>,
    banner: Option<String>,
    draft: Arc<dyn DraftStore>,
}

const IDENTITY_FIELDS: &[&str] = &["nome", "telefone", "email"];

impl FormMachine {
    pub fn new(kind: FormKind, draft: Arc<dyn DraftStore>) -> Self {
        let mut values = Map::new();
        if let Some(identity) = draft.load() {
            values.insert("nome".to_string(), Value::String(identity.nome));
            values.insert("telefone".to_string(), Value::String(identity.telefone));
            values.insert("email".to_string(), Value::String(identity.email));
        }

        Self {
            kind,
            phase: FormPhase::Editing,
            values,
            attachments: Vec::new(),
            field_errors: Vec::new(),
            banner: None,
            draft,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Field the view should scroll to after a failed submit.
    pub fn first_invalid(&self) -> Option<&str> {
        self.field_errors.first().map(|e| e.field.as_str())
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Record an edit. Phone input is normalized as typed; identity edits
    /// are persisted to the draft store.
    pub fn set_field(&mut self, name: &str, value: &str) {
        if self.phase != FormPhase::Editing {
            return;
        }

        let stored = if name == "telefone" {
            phone::normalize(value)
        } else {
            value.to_string()
        };
        self.values.insert(name.to_string(), Value::String(stored));

        if IDENTITY_FIELDS.contains(&name) {
            self.draft.save(&self.identity());
        }
    }

    /// Add an attachment. Entries past the cap are ignored.
    pub fn attach(&mut self, file_name: &str, size: u64) {
        if self.phase != FormPhase::Editing || self.attachments.len() >= MAX_ATTACHMENTS {
            return;
        }
        self.attachments.push(Attachment {
            file_name: file_name.to_string(),
            size,
        });
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if self.phase == FormPhase::Editing && index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    /// Validate and, when clean, move to `Submitting`. On failure the
    /// machine stays editable with per-field errors populated; no request
    /// leaves the client.
    pub fn submit(&mut self, ctx: &ValidationCtx) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }
        self.banner = None;
        self.field_errors = validate::validate(self.kind, &self.values, ctx);
        if self.field_errors.is_empty() {
            self.phase = FormPhase::Submitting;
            true
        } else {
            false
        }
    }

    /// Fields the transport layer should post, including the form type tag.
    pub fn export(&self) -> Map<String, Value> {
        let mut out = self.values.clone();
        out.insert(
            "form_type".to_string(),
            Value::String(self.kind.as_type().to_string()),
        );
        out
    }

    /// Apply the handler's result. Success clears the draft and locks the
    /// machine on the protocol screen; failure returns to editing with a
    /// banner message.
    pub fn resolve(&mut self, result: Result<String, String>) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        match result {
            Ok(protocolo) => {
                self.draft.clear();
                self.phase = FormPhase::Success { protocolo };
            }
            Err(message) => {
                self.banner = Some(message);
                self.phase = FormPhase::Editing;
            }
        }
    }

    fn identity(&self) -> IdentityDraft {
        let get = |name: &str| {
            self.values
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };
        IdentityDraft {
            nome: get("nome"),
            telefone: get("telefone"),
            email: get("email"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StoreValidationMode;
    use crate::form::draft::MemoryDraftStore;

    use super::*;

    fn ctx<'a>(stores: Option<&'a [String]>) -> ValidationCtx<'a> {
        ValidationCtx {
            today: "2025-09-10".parse().unwrap(),
            stores,
            store_mode: StoreValidationMode::Strict,
        }
    }

    fn filled_bonus_machine(draft: Arc<dyn DraftStore>) -> FormMachine {
        let mut m = FormMachine::new(FormKind::ContestacaoBonus, draft);
        m.set_field("nome", "Maria Silva");
        m.set_field("telefone", "11999998888");
        m.set_field("email", "maria@example.com");
        m.set_field("tipoSolicitacao", "Bônus de Domingo");
        m.set_field("data_contestacao", "2025-09-01");
        m.set_field("turno", "Manhã");
        m.set_field("loja", "Loja A");
        m.set_field("valor_recebido", "10");
        m.set_field("valor_anunciado", "25");
        m.set_field("detalhamento", "Valor divergente.");
        m
    }

    #[test]
    fn unknown_store_blocks_before_any_request() {
        let stores = vec!["A".to_string(), "B".to_string()];
        let mut m = filled_bonus_machine(Arc::new(MemoryDraftStore::new()));
        m.set_field("loja", "C");

        assert!(!m.submit(&ctx(Some(&stores))));
        assert_eq!(*m.phase(), FormPhase::Editing);
        assert_eq!(m.error_for("loja"), Some("Loja inválida."));
    }

    #[test]
    fn valid_form_moves_to_submitting_then_success() {
        let stores = vec!["Loja A".to_string()];
        let mut m = filled_bonus_machine(Arc::new(MemoryDraftStore::new()));

        assert!(m.submit(&ctx(Some(&stores))));
        assert_eq!(*m.phase(), FormPhase::Submitting);

        // Edits are ignored while in flight.
        m.set_field("nome", "Outra Pessoa");
        assert_eq!(m.values()["nome"], "Maria Silva");

        m.resolve(Ok("2025091011223344".to_string()));
        assert_eq!(
            *m.phase(),
            FormPhase::Success {
                protocolo: "2025091011223344".to_string()
            }
        );
    }

    #[test]
    fn failure_returns_to_editing_with_banner() {
        let stores = vec!["Loja A".to_string()];
        let mut m = filled_bonus_machine(Arc::new(MemoryDraftStore::new()));
        assert!(m.submit(&ctx(Some(&stores))));

        m.resolve(Err("Não foi possível enviar sua solicitação.".to_string()));
        assert_eq!(*m.phase(), FormPhase::Editing);
        assert!(m.banner().is_some());
    }

    #[test]
    fn first_invalid_field_follows_schema_order() {
        let mut m = FormMachine::new(
            FormKind::ContestacaoBonus,
            Arc::new(MemoryDraftStore::new()),
        );
        m.set_field("email", "maria@example.com");

        assert!(!m.submit(&ctx(None)));
        assert_eq!(m.first_invalid(), Some("nome"));
    }

    #[test]
    fn phone_is_normalized_as_typed() {
        let mut m = FormMachine::new(
            FormKind::ContestacaoBonus,
            Arc::new(MemoryDraftStore::new()),
        );
        m.set_field("telefone", "(11) 99999-8888");
        assert_eq!(m.values()["telefone"], "+5511999998888");
    }

    #[test]
    fn attachments_are_capped() {
        let mut m = FormMachine::new(
            FormKind::ContestacaoBonus,
            Arc::new(MemoryDraftStore::new()),
        );
        for i in 0..8 {
            m.attach(&format!("foto{i}.png"), 100);
        }
        assert_eq!(m.attachments().len(), MAX_ATTACHMENTS);

        m.remove_attachment(0);
        assert_eq!(m.attachments().len(), MAX_ATTACHMENTS - 1);
    }

    #[test]
    fn draft_loads_on_create_persists_on_edit_clears_on_success() {
        let store = Arc::new(MemoryDraftStore::with_draft(IdentityDraft {
            nome: "Maria Silva".to_string(),
            telefone: "+5511999998888".to_string(),
            email: "maria@example.com".to_string(),
        }));

        let mut m = FormMachine::new(FormKind::RevisaoBloqueio, store.clone());
        assert_eq!(m.values()["nome"], "Maria Silva");

        m.set_field("email", "nova@example.com");
        assert_eq!(store.load().unwrap().email, "nova@example.com");

        m.set_field("data_bloqueio", "2025-08-01");
        m.set_field("justificativa", "Bloqueio indevido.");

        assert!(m.submit(&ctx(None)));
        m.resolve(Ok("2025091000000000".to_string()));

        assert!(matches!(m.phase(), FormPhase::Success { .. }));
        assert!(store.load().is_none());
    }

    #[test]
    fn export_includes_the_form_type_tag() {
        let m = FormMachine::new(
            FormKind::SolicitacaoSaque,
            Arc::new(MemoryDraftStore::new()),
        );
        assert_eq!(m.export()["form_type"], "solicitacao_saque");
    }
}
