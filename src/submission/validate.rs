use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::StoreValidationMode;

use super::calendar;
use super::phone;
use super::schema::{Cond, CondOp, FieldDef, FormKind, Rule};

/// Everything rule evaluation needs besides the submitted values. `stores`
/// is `None` when the directory could not be fetched; store membership is
/// then skipped rather than failed.
pub struct ValidationCtx<'a> {
    pub today: NaiveDate,
    pub stores: Option<&'a [String]>,
    pub store_mode: StoreValidationMode,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Run the form's schema over the submitted values. Errors come back in
/// schema order, at most one per field; the first entry is the field the
/// client should scroll to.
pub fn validate(kind: FormKind, values: &Map<String, Value>, ctx: &ValidationCtx) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for def in kind.fields() {
        if !is_visible(def, values) {
            continue;
        }

        let raw = field_str(values, def.name);
        if let Some(message) = check_field(def, raw, ctx) {
            errors.push(FieldError {
                field: def.name.to_string(),
                message,
            });
        }
    }

    errors
}

fn check_field(def: &FieldDef, raw: &str, ctx: &ValidationCtx) -> Option<String> {
    for rule in def.rules {
        match rule {
            Rule::Required => {
                if raw.is_empty() {
                    return Some("Campo obrigatório.".to_string());
                }
            }
            // Remaining rules only constrain filled-in fields.
            _ if raw.is_empty() => return None,
            Rule::Phone => {
                if !phone::is_complete(raw) {
                    return Some("Informe o telefone completo com DDD.".to_string());
                }
            }
            Rule::BusinessDays(days) => {
                let Ok(date) = raw.parse::<NaiveDate>() else {
                    return Some("Data inválida.".to_string());
                };
                if date > calendar::limit_date(ctx.today, *days) {
                    return Some(format!("Aguarde {days} dias úteis."));
                }
            }
            Rule::Store => {
                if let Some(message) = check_store(def.name, raw, ctx) {
                    return Some(message);
                }
            }
            Rule::Range { min, max } => {
                let Ok(value) = raw.parse::<i64>() else {
                    return Some("Informe um número válido.".to_string());
                };
                if value < *min || value > *max {
                    return Some(format!("Informe um valor entre {min} e {max}."));
                }
            }
        }
    }
    None
}

fn check_store(field: &str, raw: &str, ctx: &ValidationCtx) -> Option<String> {
    if ctx.store_mode == StoreValidationMode::Off {
        return None;
    }
    let Some(stores) = ctx.stores else {
        return None;
    };
    if stores.iter().any(|s| s == raw) {
        return None;
    }
    match ctx.store_mode {
        StoreValidationMode::Strict => Some("Loja inválida.".to_string()),
        StoreValidationMode::Advisory => {
            tracing::warn!("Unknown store name in field {field}: {raw}");
            None
        }
        StoreValidationMode::Off => None,
    }
}

fn is_visible(def: &FieldDef, values: &Map<String, Value>) -> bool {
    match def.visible_when {
        None => true,
        Some(Cond { field, op, value }) => {
            let actual = field_str(values, field);
            match op {
                CondOp::Eq => actual == value,
                CondOp::Ne => actual != value,
            }
        }
    }
}

fn field_str<'a>(values: &'a Map<String, Value>, name: &str) -> &'a str {
    values
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("")
}
