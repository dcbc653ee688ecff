use crate::types::{FilterField, Record};
use serde::Serialize;

/// Exact-match constraints on the identifier columns. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub week: Option<String>,
    pub entity: Option<String>,
    pub contract: Option<String>,
}

impl FilterCriteria {
    /// Replace one constraint. An empty string clears it, the same as
    /// picking the "all" option.
    pub fn with(mut self, field: FilterField, value: Option<&str>) -> Self {
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);
        match field {
            FilterField::Week => self.week = value,
            FilterField::Entity => self.entity = value,
            FilterField::Contract => self.contract = value,
        }
        self
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Week => self.week.as_deref(),
            FilterField::Entity => self.entity.as_deref(),
            FilterField::Contract => self.contract.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn matches(&self, record: &Record) -> bool {
        FilterField::ALL.iter().all(|&field| match self.get(field) {
            Some(wanted) if !wanted.is_empty() => record.filter_value(field) == wanted,
            _ => true,
        })
    }
}

/// Records satisfying every active constraint, in input order.
pub fn filter_records<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
