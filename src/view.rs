// Ties the pipeline together: filter, aggregate, sort, label.
//
// `on_state_change` is the whole computation as a pure function of the
// store, the filter criteria and the sort state. `ViewSession` is the
// thin stateful shell an event loop drives: each user action replaces
// one of the two state values and recomputes the snapshot.

use crate::aggregate::aggregate;
use crate::collation::Collator;
use crate::filter::{filter_records, FilterCriteria};
use crate::sort::sort_records;
use crate::sort_state::SortState;
use crate::store::{FilterOptions, RecordStore};
use crate::types::{FilterField, Kpis, Record, SortKey};
use crate::util::{Formatter, PLACEHOLDER};
use serde::Serialize;
use tracing::debug;

/// Shown when no single week is selected.
pub const MULTIPLE_PERIODS: &str = "Mostrando varias semanas";

/// Everything a renderer needs for one frame of the report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub criteria: FilterCriteria,
    pub sort: SortState,
    pub period_label: String,
    pub kpis: Kpis,
    pub rows_info: String,
    pub rows: Vec<&'a Record>,
}

/// Run the pipeline once. KPIs come from the filtered rows before sorting.
pub fn on_state_change<'a>(
    store: &'a RecordStore,
    criteria: &FilterCriteria,
    sort: SortState,
    collator: &Collator,
    formatter: &Formatter,
) -> ViewSnapshot<'a> {
    let filtered = filter_records(store.records(), criteria);
    let kpis = aggregate(filtered.iter().copied());
    let rows = sort_records(&filtered, sort, collator);
    let period_label = period_label(store.records(), criteria.week.as_deref(), formatter);

    debug!(
        week = criteria.week.as_deref().unwrap_or(""),
        entity = criteria.entity.as_deref().unwrap_or(""),
        contract = criteria.contract.as_deref().unwrap_or(""),
        filtered = !criteria.is_empty(),
        sort_key = ?sort.key,
        direction = ?sort.direction,
        matched = kpis.row_count,
        "view recomputed"
    );

    ViewSnapshot {
        criteria: criteria.clone(),
        sort,
        period_label,
        kpis,
        rows_info: formatter.rows_info(kpis.row_count),
        rows,
    }
}

/// Human-readable date range for the selected week.
///
/// Uses the earliest start and latest end among that week's records, with
/// the first record's free-text label in parentheses when it has one. When
/// the week has no dates the free-text label stands alone.
pub fn period_label(records: &[Record], week: Option<&str>, formatter: &Formatter) -> String {
    if records.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let Some(week) = week.filter(|w| !w.is_empty()) else {
        return MULTIPLE_PERIODS.to_string();
    };
    let rows: Vec<&Record> = records.iter().filter(|r| r.week == week).collect();
    let Some(first) = rows.first() else {
        return PLACEHOLDER.to_string();
    };

    let min_start = rows.iter().filter_map(|r| r.period_start).min();
    let max_end = rows.iter().filter_map(|r| r.period_end).max();
    let fallback = first.period_label.as_deref();

    match (min_start, max_end) {
        (Some(start), Some(end)) => {
            let range = format!(
                "Del {} al {}",
                formatter.date(Some(start)),
                formatter.date(Some(end))
            );
            match fallback {
                Some(label) => format!("{} ({})", range, label),
                None => range,
            }
        }
        _ => formatter.text_or_placeholder(fallback),
    }
}

/// Current filters and sort for an interactive session.
#[derive(Debug)]
pub struct ViewSession {
    store: RecordStore,
    collator: Collator,
    formatter: Formatter,
    criteria: FilterCriteria,
    sort: SortState,
}

impl ViewSession {
    /// Locale is fixed for the lifetime of the session.
    pub fn new(store: RecordStore, locale: &str) -> Self {
        ViewSession {
            store,
            collator: Collator::for_locale(locale),
            formatter: Formatter::new(locale),
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn options(&self) -> FilterOptions {
        self.store.filter_options(&self.collator)
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        on_state_change(
            &self.store,
            &self.criteria,
            self.sort,
            &self.collator,
            &self.formatter,
        )
    }

    /// Filter control changed. `None` or an empty value selects "all".
    pub fn set_filter(&mut self, field: FilterField, value: Option<&str>) -> ViewSnapshot<'_> {
        self.criteria = self.criteria.clone().with(field, value);
        debug!(?field, value = value.unwrap_or(""), "filter changed");
        self.snapshot()
    }

    pub fn set_week(&mut self, value: Option<&str>) -> ViewSnapshot<'_> {
        self.set_filter(FilterField::Week, value)
    }

    pub fn set_entity(&mut self, value: Option<&str>) -> ViewSnapshot<'_> {
        self.set_filter(FilterField::Entity, value)
    }

    pub fn set_contract(&mut self, value: Option<&str>) -> ViewSnapshot<'_> {
        self.set_filter(FilterField::Contract, value)
    }

    /// Column header clicked.
    pub fn click_header(&mut self, key: SortKey) -> ViewSnapshot<'_> {
        self.sort = self.sort.select(key);
        debug!(?key, direction = ?self.sort.direction, "sort changed");
        self.snapshot()
    }

    /// Clear every filter and go back to the default sort.
    pub fn reset(&mut self) -> ViewSnapshot<'_> {
        self.criteria = FilterCriteria::default();
        self.sort = self.sort.reset();
        debug!("view reset");
        self.snapshot()
    }
}
