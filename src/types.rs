use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row as it appears in the source file, before coercion.
///
/// Every field is optional text so that a sloppy export (blank cells,
/// numbers typed as strings, stray words in a count column) still
/// deserializes; `loader` turns it into a [`Record`].
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "semana", alias = "week", default)]
    pub week: Option<String>,
    #[serde(rename = "entidad", alias = "entity", default)]
    pub entity: Option<String>,
    #[serde(rename = "contrato", alias = "contract", default)]
    pub contract: Option<String>,
    #[serde(rename = "fechaInicio", alias = "periodStart", default)]
    pub period_start: Option<String>,
    #[serde(rename = "fechaFin", alias = "periodEnd", default)]
    pub period_end: Option<String>,
    #[serde(rename = "fechaRango", alias = "periodLabel", default)]
    pub period_label: Option<String>,
    #[serde(rename = "validacionIdentidad", alias = "identityValidationCount", default)]
    pub identity_validation: Option<String>,
    #[serde(rename = "analisisDeudor", alias = "debtorAnalysisCount", default)]
    pub debtor_analysis: Option<String>,
    #[serde(rename = "analisisCodeudor", alias = "coDebtorAnalysisCount", default)]
    pub co_debtor_analysis: Option<String>,
    #[serde(rename = "total", default)]
    pub total: Option<String>,
    #[serde(rename = "encargado", alias = "owner", default)]
    pub owner: Option<String>,
}

/// A weekly activity row for one entity and contract. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub week: String,
    pub entity: String,
    pub contract: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub period_label: Option<String>,
    #[serde(rename = "identityValidationCount")]
    pub identity_validation: i64,
    #[serde(rename = "debtorAnalysisCount")]
    pub debtor_analysis: i64,
    #[serde(rename = "coDebtorAnalysisCount")]
    pub co_debtor_analysis: i64,
    /// Stored total. Not checked against the three counts above.
    pub total: i64,
    pub owner: Option<String>,
}

/// Value of a record under a given sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Count(i64),
    Text(&'a str),
}

impl Record {
    pub fn field(&self, key: SortKey) -> FieldValue<'_> {
        match key {
            SortKey::Week => FieldValue::Text(&self.week),
            SortKey::Entity => FieldValue::Text(&self.entity),
            SortKey::Contract => FieldValue::Text(&self.contract),
            SortKey::IdentityValidation => FieldValue::Count(self.identity_validation),
            SortKey::DebtorAnalysis => FieldValue::Count(self.debtor_analysis),
            SortKey::CoDebtorAnalysis => FieldValue::Count(self.co_debtor_analysis),
            SortKey::Total => FieldValue::Count(self.total),
            SortKey::Owner => FieldValue::Text(self.owner.as_deref().unwrap_or("")),
        }
    }

    /// Text of one of the three filterable identifier columns.
    pub fn filter_value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Week => &self.week,
            FilterField::Entity => &self.entity,
            FilterField::Contract => &self.contract,
        }
    }
}

/// Columns a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Week,
    Entity,
    Contract,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [FilterField::Week, FilterField::Entity, FilterField::Contract];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Week => "Semana",
            FilterField::Entity => "Entidad",
            FilterField::Contract => "Contrato",
        }
    }
}

/// How a sortable column compares its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Activity counts: numeric comparison, largest first by default.
    Metric,
    /// Identifiers and names: collated comparison, A to Z by default.
    Categorical,
}

/// Every sortable column of the report table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Week,
    Entity,
    Contract,
    IdentityValidation,
    DebtorAnalysis,
    CoDebtorAnalysis,
    Total,
    Owner,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Week,
        SortKey::Entity,
        SortKey::Contract,
        SortKey::IdentityValidation,
        SortKey::DebtorAnalysis,
        SortKey::CoDebtorAnalysis,
        SortKey::Total,
        SortKey::Owner,
    ];

    pub fn kind(self) -> SortKind {
        match self {
            SortKey::IdentityValidation
            | SortKey::DebtorAnalysis
            | SortKey::CoDebtorAnalysis
            | SortKey::Total => SortKind::Metric,
            SortKey::Week | SortKey::Entity | SortKey::Contract | SortKey::Owner => {
                SortKind::Categorical
            }
        }
    }

    /// Direction a column starts in when it is first selected.
    pub fn default_direction(self) -> SortDirection {
        match self.kind() {
            SortKind::Metric => SortDirection::Descending,
            SortKind::Categorical => SortDirection::Ascending,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            SortKey::Week => "Semana",
            SortKey::Entity => "Entidad",
            SortKey::Contract => "Contrato",
            SortKey::IdentityValidation => "Validación identidad",
            SortKey::DebtorAnalysis => "Análisis deudor",
            SortKey::CoDebtorAnalysis => "Análisis codeudor",
            SortKey::Total => "Total",
            SortKey::Owner => "Encargado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Suffix appended to the active column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    }
}

/// Sum-based indicators over the rows currently matched by the filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub identity_validation_sum: i64,
    pub debtor_analysis_sum: i64,
    pub co_debtor_analysis_sum: i64,
    pub total_sum: i64,
    pub row_count: usize,
}

/// One line of the KPI block.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[serde(rename = "Indicador")]
    #[tabled(rename = "Indicador")]
    pub label: String,
    #[serde(rename = "Valor")]
    #[tabled(rename = "Valor")]
    pub value: String,
}

/// A record with every cell already formatted for display or export.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TableRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "Entidad")]
    #[tabled(rename = "Entidad")]
    pub entity: String,
    #[serde(rename = "Contrato")]
    #[tabled(rename = "Contrato")]
    pub contract: String,
    #[serde(rename = "ValidacionIdentidad")]
    #[tabled(rename = "Validación identidad")]
    pub identity_validation: String,
    #[serde(rename = "AnalisisDeudor")]
    #[tabled(rename = "Análisis deudor")]
    pub debtor_analysis: String,
    #[serde(rename = "AnalisisCodeudor")]
    #[tabled(rename = "Análisis codeudor")]
    pub co_debtor_analysis: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: String,
    #[serde(rename = "Encargado")]
    #[tabled(rename = "Encargado")]
    pub owner: String,
}

#[cfg(test)]
impl Record {
    /// Bare record with the three counts set to zero and no dates.
    pub(crate) fn sample(week: &str, entity: &str, contract: &str, total: i64) -> Self {
        Record {
            week: week.to_string(),
            entity: entity.to_string(),
            contract: contract.to_string(),
            period_start: None,
            period_end: None,
            period_label: None,
            identity_validation: 0,
            debtor_analysis: 0,
            co_debtor_analysis: 0,
            total,
            owner: None,
        }
    }
}
