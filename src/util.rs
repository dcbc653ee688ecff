// Parsing and display helpers.
//
// Loading funnels every raw cell through the `parse_*` functions so the
// rest of the code only ever sees typed values; rendering funnels every
// number and date through `Formatter` so locale handling lives in one place.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Shown in place of an absent owner, date or period label.
pub const PLACEHOLDER: &str = "—";

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce an activity count. Anything non-numeric counts as zero and
/// fractional values round to the nearest whole number.
pub fn coerce_count(s: Option<&str>) -> i64 {
    parse_f64_safe(s).map(|v| v.round() as i64).unwrap_or(0)
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // Source dates are ISO `YYYY-MM-DD` with no time zone.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Trim a cell and drop it entirely if nothing is left.
pub fn non_blank(s: Option<String>) -> Option<String> {
    let s = s?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve a BCP-47 style tag (`es-CO`, `es_CO`, `es`) to a `num-format`
/// locale, falling back to the bare language and then to English.
pub fn number_locale(tag: &str) -> Locale {
    let tag = tag.trim();
    let underscored = tag.replace('-', "_");
    let language = tag.split(['-', '_']).next().unwrap_or(tag);
    let locale = [tag, underscored.as_str(), language]
        .into_iter()
        .find_map(|name| Locale::from_name(name).ok())
        .unwrap_or(Locale::en);
    locale
}

/// Locale-bound formatting of counts and dates.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    locale: Locale,
}

impl Formatter {
    pub fn new(locale_tag: &str) -> Self {
        Formatter {
            locale: number_locale(locale_tag),
        }
    }

    pub fn count(&self, n: i64) -> String {
        format_int(n, &self.locale)
    }

    /// Numeric short date, day first (`31/01/2025`).
    pub fn date(&self, d: Option<NaiveDate>) -> String {
        match d {
            Some(d) => d.format("%d/%m/%Y").to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn text_or_placeholder(&self, s: Option<&str>) -> String {
        s.unwrap_or(PLACEHOLDER).to_string()
    }

    /// `"<n> filas"` line shown under the table.
    pub fn rows_info(&self, count: usize) -> String {
        format!("{} filas", count)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new("es-CO")
    }
}

pub fn format_int<T>(n: T, locale: &Locale) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` so callers never touch the locale
    // tables directly.
    n.to_formatted_string(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_coerce_garbage_to_zero() {
        assert_eq!(coerce_count(Some("12")), 12);
        assert_eq!(coerce_count(Some(" 1,250 ")), 1250);
        assert_eq!(coerce_count(Some("7.6")), 8);
        assert_eq!(coerce_count(Some("n/a")), 0);
        assert_eq!(coerce_count(Some("")), 0);
        assert_eq!(coerce_count(None), 0);
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date_safe(Some("2025-01-06")),
            NaiveDate::from_ymd_opt(2025, 1, 6)
        );
        assert_eq!(parse_date_safe(Some("06/01/2025")), None);
        assert_eq!(parse_date_safe(Some("  ")), None);
    }

    #[test]
    fn blank_cells_become_absent() {
        assert_eq!(non_blank(Some("  Ana ".to_string())), Some("Ana".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let f = Formatter::new("xx-YY");
        assert_eq!(f.count(1234567), "1,234,567");
    }

    #[test]
    fn spanish_colombia_groups_with_dots() {
        assert_eq!(Formatter::new("es-CO").count(12000), "12.000");
    }

    #[test]
    fn dates_render_day_first() {
        let f = Formatter::default();
        assert_eq!(f.date(NaiveDate::from_ymd_opt(2025, 1, 31)), "31/01/2025");
        assert_eq!(f.date(None), PLACEHOLDER);
    }
}
