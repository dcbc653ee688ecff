use crate::types::{SortDirection, SortKey};
use serde::Serialize;

/// Active sort column and direction.
///
/// Starts at total, largest first. Only header selection and reset move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: SortKey::Total,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header click: a new column starts in its natural direction, the
    /// current column flips.
    pub fn select(self, key: SortKey) -> Self {
        if key == self.key {
            SortState {
                key,
                direction: self.direction.toggled(),
            }
        } else {
            SortState {
                key,
                direction: key.default_direction(),
            }
        }
    }

    pub fn reset(self) -> Self {
        SortState::default()
    }

    /// Header text for `key`, with the direction arrow if it is active.
    pub fn header_label(&self, key: SortKey) -> String {
        if key == self.key {
            format!("{}{}", key.header(), self.direction.indicator())
        } else {
            key.header().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_total_descending() {
        let s = SortState::default();
        assert_eq!(s.key, SortKey::Total);
        assert_eq!(s.direction, SortDirection::Descending);
    }

    #[test]
    fn new_key_takes_its_default_direction() {
        let s = SortState::default().select(SortKey::Entity);
        assert_eq!(
            s,
            SortState {
                key: SortKey::Entity,
                direction: SortDirection::Ascending
            }
        );
        let s = s.select(SortKey::DebtorAnalysis);
        assert_eq!(s.direction, SortDirection::Descending);
    }

    #[test]
    fn reselecting_toggles() {
        let s = SortState {
            key: SortKey::Entity,
            direction: SortDirection::Ascending,
        };
        let s = s.select(SortKey::Total);
        assert_eq!(
            s,
            SortState {
                key: SortKey::Total,
                direction: SortDirection::Descending
            }
        );
        let s = s.select(SortKey::Total);
        assert_eq!(s.direction, SortDirection::Ascending);
        let s = s.select(SortKey::Total);
        assert_eq!(s.direction, SortDirection::Descending);
    }

    #[test]
    fn reset_from_anywhere() {
        for key in SortKey::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                assert_eq!(SortState { key, direction }.reset(), SortState::default());
            }
        }
    }

    #[test]
    fn only_active_header_has_indicator() {
        let s = SortState::default();
        assert_eq!(s.header_label(SortKey::Total), "Total ▼");
        assert_eq!(s.header_label(SortKey::Week), "Semana");
        let s = s.select(SortKey::Total);
        assert_eq!(s.header_label(SortKey::Total), "Total ▲");
    }
}
