use crate::collation::Collator;
use crate::types::{FilterField, Record};

/// Label of the option that clears a filter.
pub const ALL_SENTINEL: &str = "Todas";

/// The loaded records. Read-only for the whole session.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of one identifier column in collated order.
    pub fn options(&self, field: FilterField, collator: &Collator) -> Vec<String> {
        collator.unique_sorted(self.records.iter().map(|r| r.filter_value(field)))
    }

    pub fn filter_options(&self, collator: &Collator) -> FilterOptions {
        FilterOptions {
            weeks: self.options(FilterField::Week, collator),
            entities: self.options(FilterField::Entity, collator),
            contracts: self.options(FilterField::Contract, collator),
        }
    }
}

/// Selectable values for each filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FilterOptions {
    pub weeks: Vec<String>,
    pub entities: Vec<String>,
    pub contracts: Vec<String>,
}

impl FilterOptions {
    pub fn values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Week => &self.weeks,
            FilterField::Entity => &self.entities,
            FilterField::Contract => &self.contracts,
        }
    }

    /// `(value, label)` pairs as shown in a picker: the "all" entry with an
    /// empty value first, then every distinct value.
    pub fn choices(&self, field: FilterField) -> Vec<(String, String)> {
        std::iter::once((String::new(), ALL_SENTINEL.to_string()))
            .chain(self.values(field).iter().map(|v| (v.clone(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_distinct_and_collated() {
        let store = RecordStore::new(vec![
            Record::sample("S2", "Ñapa", "C2", 1),
            Record::sample("S1", "banco", "C1", 1),
            Record::sample("S2", "Oriente", "C1", 1),
            Record::sample("S1", "Banco", "C3", 1),
        ]);
        let opts = store.filter_options(&Collator::default());
        assert_eq!(opts.weeks, vec!["S1", "S2"]);
        assert_eq!(opts.entities, vec!["banco", "Banco", "Ñapa", "Oriente"]);
        assert_eq!(opts.contracts, vec!["C1", "C2", "C3"]);
    }

    #[test]
    fn choices_start_with_the_all_sentinel() {
        let store = RecordStore::new(vec![Record::sample("S1", "A", "C1", 1)]);
        let choices = store.filter_options(&Collator::default()).choices(FilterField::Week);
        assert_eq!(
            choices,
            vec![
                (String::new(), ALL_SENTINEL.to_string()),
                ("S1".to_string(), "S1".to_string())
            ]
        );
    }

    #[test]
    fn empty_store_has_no_options() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert_eq!(store.filter_options(&Collator::default()), FilterOptions::default());
    }
}
