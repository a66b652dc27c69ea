//! Declarative field schema for every form the portal accepts. One table per
//! form type drives both the client form model and the server-side
//! validation, replacing per-form hand-written checks.

/// Bonus categories a partner can contest.
pub const BONUS_TYPES: &[&str] = &[
    "Bônus Adicional 2 Turnos",
    "Bônus Data Comemorativa",
    "Bônus de Domingo",
    "Bônus de Fim de Ano",
    "Bônus de Treinamento",
    "Bônus Especial",
    "Bônus Ofertado por WhatsApp ou Push App",
    "Conectividade",
    "Hora Certa",
    "Indicação de Novo Zubalero",
    "Meta de Produtividade",
    "SKU / Item",
];

const SHIFTS: &[&str] = &["Manhã", "Tarde", "Noite", "Integral"];
const SHIFTS_UPPER: &[&str] = &["MANHÃ", "TARDE", "NOITE", "INTEGRAL"];

const DENUNCIA_TYPES: &[&str] = &[
    "RECLAMAÇÃO DE LOJA (Tratamento/Erros)",
    "ACESSO INDEVIDO A DADOS",
    "ENVIO DE TAREFAS DE OUTRO ZUBALERO",
    "INFORMAÇÕES INCONSISTENTES NOS PEDIDOS",
    "TAREFA FINALIZADA SEM PRESENÇA FÍSICA",
    "USO DE FAKE GPS / MANIPULAÇÃO",
    "OUTROS",
];

const BLOCK_REASONS: &[&str] = &[
    "COMPORTAMENTO INADEQUADO",
    "BAIXA PRODUTIVIDADE",
    "INSUBORDINAÇÃO",
    "FURTO / SEGURANÇA",
    "OUTROS",
];

const REINFORCEMENT_REASONS: &[&str] = &[
    "AUMENTO DE DEMANDA",
    "FALTA DE EQUIPE INTERNA",
    "PROMOÇÃO / EVENTO",
];

const MATERIAL_ITEMS: &[&str] = &["CRACHÁ DE ACESSO", "OUTROS"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    Number,
    Money,
    TextArea,
    Select(&'static [&'static str]),
}

/// A single validation rule. Rules run in declaration order; the first
/// failure per field wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    /// Normalized number must carry exactly 13 digits.
    Phone,
    /// Date must be at least this many business days in the past.
    BusinessDays(u32),
    /// Value must match the store directory (subject to the configured mode).
    Store,
    /// Integer bounds, inclusive.
    Range { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CondOp {
    Eq,
    Ne,
}

/// Visibility condition on another field's value. Hidden fields are neither
/// rendered nor validated.
#[derive(Debug, Clone, Copy)]
pub struct Cond {
    pub field: &'static str,
    pub op: CondOp,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
    pub visible_when: Option<Cond>,
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    rules: &'static [Rule],
) -> FieldDef {
    FieldDef {
        name,
        label,
        kind,
        rules,
        visible_when: None,
    }
}

const fn shown_when(def: FieldDef, cond: Cond) -> FieldDef {
    FieldDef {
        name: def.name,
        label: def.label,
        kind: def.kind,
        rules: def.rules,
        visible_when: Some(cond),
    }
}

const fn eq(field: &'static str, value: &'static str) -> Cond {
    Cond {
        field,
        op: CondOp::Eq,
        value,
    }
}

const fn ne(field: &'static str, value: &'static str) -> Cond {
    Cond {
        field,
        op: CondOp::Ne,
        value,
    }
}

// Shared identity block.
const NOME: FieldDef = field("nome", "NOME COMPLETO", FieldKind::Text, &[Rule::Required]);
const TELEFONE: FieldDef = field(
    "telefone",
    "TELEFONE (DDD + NÚMERO)",
    FieldKind::Phone,
    &[Rule::Required, Rule::Phone],
);
const EMAIL: FieldDef = field(
    "email",
    "E-MAIL DE CADASTRO",
    FieldKind::Email,
    &[Rule::Required],
);

static CONTESTACAO_BONUS: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field(
        "tipoSolicitacao",
        "O QUE DESEJA CONTESTAR?",
        FieldKind::Select(BONUS_TYPES),
        &[Rule::Required],
    ),
    field(
        "data_contestacao",
        "DATA DA REALIZAÇÃO",
        FieldKind::Date,
        &[Rule::Required, Rule::BusinessDays(3)],
    ),
    field("turno", "TURNO ATUADO", FieldKind::Select(SHIFTS), &[Rule::Required]),
    field(
        "loja",
        "LOJA ATUADA",
        FieldKind::Text,
        &[Rule::Required, Rule::Store],
    ),
    shown_when(
        field(
            "codigo_indicacao",
            "CÓDIGO DE INDICAÇÃO",
            FieldKind::Text,
            &[Rule::Required],
        ),
        eq("tipoSolicitacao", "Indicação de Novo Zubalero"),
    ),
    shown_when(
        field("sku_codigo", "CÓDIGO SKU", FieldKind::Text, &[Rule::Required]),
        eq("tipoSolicitacao", "SKU / Item"),
    ),
    shown_when(
        field(
            "valor_recebido",
            "VALOR RECEBIDO (R$)",
            FieldKind::Money,
            &[Rule::Required],
        ),
        ne("tipoSolicitacao", "Indicação de Novo Zubalero"),
    ),
    shown_when(
        field(
            "valor_anunciado",
            "VALOR ANUNCIADO (R$)",
            FieldKind::Money,
            &[Rule::Required],
        ),
        ne("tipoSolicitacao", "Indicação de Novo Zubalero"),
    ),
    field(
        "detalhamento",
        "EXPLIQUE SEU CASO",
        FieldKind::TextArea,
        &[Rule::Required],
    ),
];

static OUVIDORIA_CONDUTA: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field("loja_relacionada", "LOJA DO OCORRIDO", FieldKind::Text, &[]),
    field(
        "tipo_denuncia",
        "TIPO DE DENÚNCIA",
        FieldKind::Select(DENUNCIA_TYPES),
        &[Rule::Required],
    ),
    field(
        "detalhes",
        "RELATO DETALHADO",
        FieldKind::TextArea,
        &[Rule::Required],
    ),
];

static REVISAO_BLOQUEIO: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field(
        "data_bloqueio",
        "DATA DO BLOQUEIO",
        FieldKind::Date,
        &[Rule::Required],
    ),
    field(
        "justificativa",
        "JUSTIFICATIVA / DEFESA",
        FieldKind::TextArea,
        &[Rule::Required],
    ),
];

static SOLICITACAO_SAQUE: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field("chave_pix", "CHAVE PIX", FieldKind::Text, &[Rule::Required]),
    field(
        "titular_conta",
        "NOME DO TITULAR DA CONTA",
        FieldKind::Text,
        &[Rule::Required],
    ),
    field("observacoes", "OBSERVAÇÕES", FieldKind::TextArea, &[]),
];

static SOLICITACAO_MATERIAIS: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field(
        "item_select",
        "ITEM NECESSÁRIO",
        FieldKind::Select(MATERIAL_ITEMS),
        &[Rule::Required],
    ),
    shown_when(
        field(
            "item_digitado",
            "DIGITE O NOME DO ITEM",
            FieldKind::Text,
            &[Rule::Required],
        ),
        eq("item_select", "OUTROS"),
    ),
    field(
        "motivo",
        "MOTIVO DA SOLICITAÇÃO",
        FieldKind::TextArea,
        &[Rule::Required],
    ),
];

static BLOQUEIO_ZUBALERO: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field("loja_solicitante", "SUA LOJA", FieldKind::Text, &[Rule::Required]),
    field(
        "nome_zubalero",
        "NOME OU ID DO ZUBALERO",
        FieldKind::Text,
        &[Rule::Required],
    ),
    field(
        "motivo_bloqueio",
        "MOTIVO",
        FieldKind::Select(BLOCK_REASONS),
        &[Rule::Required],
    ),
    field("detalhes", "DETALHES", FieldKind::TextArea, &[Rule::Required]),
];

static REPORTAR_FALTA_LOJISTA: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field("loja_solicitante", "SUA LOJA", FieldKind::Text, &[Rule::Required]),
    field(
        "nome_zubalero",
        "NOME DO ZUBALERO",
        FieldKind::Text,
        &[Rule::Required],
    ),
    field("data_falta", "DATA DA FALTA", FieldKind::Date, &[Rule::Required]),
    field(
        "turno",
        "TURNO",
        FieldKind::Select(SHIFTS_UPPER),
        &[Rule::Required],
    ),
];

static SOLICITACAO_REFORCO: &[FieldDef] = &[
    NOME,
    TELEFONE,
    EMAIL,
    field("loja_solicitante", "SUA LOJA", FieldKind::Text, &[Rule::Required]),
    field("data_reforco", "DATA", FieldKind::Date, &[Rule::Required]),
    field(
        "qtd_pessoas",
        "QTD. DE PESSOAS",
        FieldKind::Number,
        &[Rule::Required, Rule::Range { min: 1, max: 10 }],
    ),
    field(
        "motivo_reforco",
        "MOTIVO",
        FieldKind::Select(REINFORCEMENT_REASONS),
        &[Rule::Required],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    ContestacaoBonus,
    OuvidoriaConduta,
    RevisaoBloqueio,
    SolicitacaoSaque,
    SolicitacaoMateriais,
    BloqueioZubalero,
    ReportarFaltaLojista,
    SolicitacaoReforco,
}

impl FormKind {
    pub const ALL: [FormKind; 8] = [
        FormKind::ContestacaoBonus,
        FormKind::OuvidoriaConduta,
        FormKind::RevisaoBloqueio,
        FormKind::SolicitacaoSaque,
        FormKind::SolicitacaoMateriais,
        FormKind::BloqueioZubalero,
        FormKind::ReportarFaltaLojista,
        FormKind::SolicitacaoReforco,
    ];

    /// Wire value of the `form_type` field.
    pub fn as_type(&self) -> &'static str {
        match self {
            FormKind::ContestacaoBonus => "contestacao_bonus",
            FormKind::OuvidoriaConduta => "ouvidoria_conduta",
            FormKind::RevisaoBloqueio => "revisao_bloqueio",
            FormKind::SolicitacaoSaque => "solicitacao_saque",
            FormKind::SolicitacaoMateriais => "solicitacao_materiais",
            FormKind::BloqueioZubalero => "bloqueio_zubalero",
            FormKind::ReportarFaltaLojista => "reportar_falta_lojista",
            FormKind::SolicitacaoReforco => "solicitacao_reforco",
        }
    }

    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_type() == value)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::ContestacaoBonus => "PAGAMENTO DE BÔNUS",
            FormKind::OuvidoriaConduta => "OUVIDORIA / CONDUTA",
            FormKind::RevisaoBloqueio => "CONTESTAR BLOQUEIO",
            FormKind::SolicitacaoSaque => "SOLICITAR SAQUE",
            FormKind::SolicitacaoMateriais => "SOLICITAR MATERIAIS",
            FormKind::BloqueioZubalero => "SOLICITAR BLOQUEIO",
            FormKind::ReportarFaltaLojista => "REPORTAR FALTA",
            FormKind::SolicitacaoReforco => "SOLICITAR REFORÇO",
        }
    }

    /// Estimated response time shown on the success screen.
    pub fn sla(&self) -> &'static str {
        match self {
            FormKind::OuvidoriaConduta => "7 dias úteis (Investigação)",
            FormKind::SolicitacaoSaque => "10 dias úteis (Processamento Financeiro)",
            FormKind::SolicitacaoMateriais => "5 a 10 dias úteis (Envio)",
            _ => "5 dias úteis",
        }
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        match self {
            FormKind::ContestacaoBonus => CONTESTACAO_BONUS,
            FormKind::OuvidoriaConduta => OUVIDORIA_CONDUTA,
            FormKind::RevisaoBloqueio => REVISAO_BLOQUEIO,
            FormKind::SolicitacaoSaque => SOLICITACAO_SAQUE,
            FormKind::SolicitacaoMateriais => SOLICITACAO_MATERIAIS,
            FormKind::BloqueioZubalero => BLOQUEIO_ZUBALERO,
            FormKind::ReportarFaltaLojista => REPORTAR_FALTA_LOJISTA,
            FormKind::SolicitacaoReforco => SOLICITACAO_REFORCO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_type_round_trips() {
        for kind in FormKind::ALL {
            assert_eq!(FormKind::from_type(kind.as_type()), Some(kind));
        }
        assert_eq!(FormKind::from_type("nope"), None);
    }

    #[test]
    fn every_form_carries_the_identity_block() {
        for kind in FormKind::ALL {
            let names: Vec<_> = kind.fields().iter().map(|f| f.name).collect();
            assert!(names.contains(&"nome"), "{kind:?}");
            assert!(names.contains(&"telefone"), "{kind:?}");
            assert!(names.contains(&"email"), "{kind:?}");
        }
    }

    #[test]
    fn conditional_fields_reference_declared_fields() {
        for kind in FormKind::ALL {
            let names: Vec<_> = kind.fields().iter().map(|f| f.name).collect();
            for def in kind.fields() {
                if let Some(cond) = def.visible_when {
                    assert!(names.contains(&cond.field), "{kind:?}/{}", def.name);
                }
            }
        }
    }

    #[test]
    fn field_names_are_unique_per_form() {
        for kind in FormKind::ALL {
            let mut names: Vec<_> = kind.fields().iter().map(|f| f.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "{kind:?}");
        }
    }
}
