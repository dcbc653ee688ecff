use crate::collation::Collator;
use crate::sort_state::SortState;
use crate::types::{FieldValue, Record, SortDirection, SortKey};
use std::cmp::Ordering;

/// Natural (ascending) order of two records under `key`.
pub fn compare_records(a: &Record, b: &Record, key: SortKey, collator: &Collator) -> Ordering {
    match (a.field(key), b.field(key)) {
        (FieldValue::Count(x), FieldValue::Count(y)) => x.cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => collator.compare(x, y),
        // A key always maps to the same variant on both sides.
        (FieldValue::Count(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Count(_)) => Ordering::Greater,
    }
}

/// Stable sort by the active column. Descending flips the comparator rather
/// than the output, so ties keep input order in both directions.
pub fn sort_records<'a>(
    records: &[&'a Record],
    state: SortState,
    collator: &Collator,
) -> Vec<&'a Record> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = compare_records(a, b, state.key, collator);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    out
}
