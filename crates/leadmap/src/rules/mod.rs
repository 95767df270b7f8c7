//! Deterministic rule stage: ordered regex table over folded headers.

mod unicode;

pub use unicode::fold_header;

use regex::Regex;

use crate::crm::CrmField;

/// Confidence assigned to every rule match.
pub const RULE_CONFIDENCE: u8 = 95;

/// Matches known column-name patterns to canonical fields.
///
/// Patterns are written against the folded header space (lowercase,
/// diacritics stripped), so "Descrição", "DESCRICAO", and the NFD
/// spelling of either all hit the same rule. First match wins, so more
/// specific patterns sit higher in the table.
pub struct RuleClassifier {
    patterns: Vec<(Regex, CrmField)>,
}

impl RuleClassifier {
    /// Create a classifier with the built-in English/Portuguese table.
    pub fn new() -> Self {
        Self {
            patterns: Self::build_patterns(),
        }
    }

    fn build_patterns() -> Vec<(Regex, CrmField)> {
        // Patterns apply to folded headers only; all-ASCII by construction.
        vec![
            (Regex::new(r"\b(first ?name|primeiro nome)\b").unwrap(), CrmField::FirstName),
            (Regex::new(r"\b(last ?name|sobrenome|surname)\b").unwrap(), CrmField::LastName),

            (Regex::new(r"\be-?mail\b|correio eletronico").unwrap(), CrmField::Email),

            // Mobile before the generic phone patterns.
            (Regex::new(r"\b(celular|cel|mobile|cell|whatsapp|whats)\b").unwrap(), CrmField::MobilePhone),
            (Regex::new(r"\b(telefone|tel|phone|fone|fixo|landline)\b").unwrap(), CrmField::Phone),

            (Regex::new(r"\b(empresa|company|organizacao|organization|razao social|firma|account)\b").unwrap(), CrmField::Company),
            (Regex::new(r"\b(cargo|funcao|title|position|role)\b").unwrap(), CrmField::Title),
            (Regex::new(r"\b(site|website|url|homepage|pagina)\b").unwrap(), CrmField::Website),

            (Regex::new(r"\b(descricao|observacao|observacoes|obs|notas?|comentarios?|description|notes|comments|remarks)\b").unwrap(), CrmField::Description),

            (Regex::new(r"\b(endereco|logradouro|rua|address|street)\b").unwrap(), CrmField::Street),
            (Regex::new(r"\b(cidade|municipio|city)\b").unwrap(), CrmField::City),
            (Regex::new(r"\b(estado|uf|state|provincia|province)\b").unwrap(), CrmField::State),
            (Regex::new(r"\b(cep|zip ?code|zip|postal|codigo postal)\b").unwrap(), CrmField::PostalCode),
            (Regex::new(r"\b(pais|country)\b").unwrap(), CrmField::Country),

            (Regex::new(r"\b(industria|setor|segmento|ramo|industry|sector)\b").unwrap(), CrmField::Industry),
            (Regex::new(r"\b(faturamento|receita( anual)?|revenue)\b").unwrap(), CrmField::AnnualRevenue),
            (Regex::new(r"\b(funcionarios|colaboradores|employees|headcount)\b").unwrap(), CrmField::NumberOfEmployees),
            (Regex::new(r"\b(origem|fonte|canal|campanha|source|campaign)\b").unwrap(), CrmField::LeadSource),
            (Regex::new(r"\b(status|situacao|etapa|estagio|stage)\b").unwrap(), CrmField::Status),

            // The lead's own name column. Exact matches only, and last, so
            // "Nome da Empresa" reaches the Company rule above instead.
            (Regex::new(r"^(lead|nome|name|nome completo|full name|contato|contact|cliente)$").unwrap(), CrmField::LastName),
        ]
    }

    /// Classify a raw column header. Returns the first matching field.
    pub fn classify(&self, header: &str) -> Option<CrmField> {
        let folded = fold_header(header);
        for (pattern, field) in &self.patterns {
            if pattern.is_match(&folded) {
                return Some(*field);
            }
        }
        None
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}
