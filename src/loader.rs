use crate::error::ReportError;
use crate::types::{RawRow, Record};
use crate::util::{coerce_count, non_blank, parse_date_safe};
use csv::ReaderBuilder;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub blank_identifiers: usize,
}

/// Load the weekly records from a `.csv` or `.json` file.
pub fn load_records(path: impl AsRef<Path>) -> Result<(Vec<Record>, LoadReport), ReportError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        _ => return Err(ReportError::UnsupportedFormat(path.display().to_string())),
    };
    let (records, report) = clean(rows);
    info!(
        path = %path.display(),
        total = report.total_rows,
        loaded = report.loaded_rows,
        skipped = report.parse_errors,
        "records loaded"
    );
    Ok((records, report))
}

type RawRows = Vec<Result<RawRow, String>>;

fn read_csv(path: &Path) -> Result<RawRows, ReportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    Ok(rdr
        .deserialize::<RawRow>()
        .map(|r| r.map_err(|e| e.to_string()))
        .collect())
}

fn read_json(path: &Path) -> Result<RawRows, ReportError> {
    let text = std::fs::read_to_string(path)?;
    let values: Vec<Value> = serde_json::from_str(&text)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value::<RawRow>(stringify_scalars(v)).map_err(|e| e.to_string()))
        .collect())
}

/// JSON exports mix numbers and strings in the same column; turn numeric
/// and boolean cells into text so they go through the same coercion as CSV.
fn stringify_scalars(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::Number(n) => Value::String(n.to_string()),
                        Value::Bool(b) => Value::String(b.to_string()),
                        other => other,
                    };
                    (k, v)
                })
                .collect(),
        ),
        other => other,
    }
}

fn clean(rows: RawRows) -> (Vec<Record>, LoadReport) {
    let mut report = LoadReport::default();
    let mut records = Vec::with_capacity(rows.len());

    for (line, result) in rows.into_iter().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping unreadable row");
                report.parse_errors += 1;
                continue;
            }
        };

        let week = non_blank(row.week).unwrap_or_default();
        let entity = non_blank(row.entity).unwrap_or_default();
        let contract = non_blank(row.contract).unwrap_or_default();
        if week.is_empty() || entity.is_empty() || contract.is_empty() {
            // Kept as-is; identifier quality is the data owner's problem.
            report.blank_identifiers += 1;
        }

        records.push(Record {
            week,
            entity,
            contract,
            period_start: parse_date_safe(row.period_start.as_deref()),
            period_end: parse_date_safe(row.period_end.as_deref()),
            period_label: non_blank(row.period_label),
            identity_validation: coerce_count(row.identity_validation.as_deref()),
            debtor_analysis: coerce_count(row.debtor_analysis.as_deref()),
            co_debtor_analysis: coerce_count(row.co_debtor_analysis.as_deref()),
            total: coerce_count(row.total.as_deref()),
            owner: non_blank(row.owner),
        });
    }

    report.loaded_rows = records.len();
    if report.blank_identifiers > 0 {
        warn!(rows = report.blank_identifiers, "rows with blank week/entity/contract");
    }
    (records, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn loads_csv_with_spanish_headers() {
        let f = write_temp(
            ".csv",
            "semana,entidad,contrato,fechaInicio,fechaFin,fechaRango,validacionIdentidad,analisisDeudor,analisisCodeudor,total,encargado\n\
             S1,Banco Ñ,C-01,2025-01-06,2025-01-12,6 al 12 ene,10,5,x,15,Ana\n\
             S2,Cooperativa,C-02,,,,\"1,200\",0,3,1203,\n",
        );
        let (records, report) = load_records(f.path()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 0);

        let first = &records[0];
        assert_eq!(first.entity, "Banco Ñ");
        assert_eq!(first.period_start, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(first.period_label.as_deref(), Some("6 al 12 ene"));
        assert_eq!(first.co_debtor_analysis, 0);
        assert_eq!(first.total, 15);
        assert_eq!(first.owner.as_deref(), Some("Ana"));

        let second = &records[1];
        assert_eq!(second.identity_validation, 1200);
        assert_eq!(second.period_start, None);
        assert_eq!(second.period_label, None);
        assert_eq!(second.owner, None);
    }

    #[test]
    fn loads_json_with_mixed_value_types() {
        let f = write_temp(
            ".json",
            r#"[
                {"semana": "S1", "entidad": "A", "contrato": 7, "validacionIdentidad": 3,
                 "analisisDeudor": "4", "analisisCodeudor": null, "total": 7},
                {"week": "S2", "entity": "B", "contract": "C2", "total": "abc", "owner": "Luis"},
                "not a row"
            ]"#,
        );
        let (records, report) = load_records(f.path()).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 1);

        assert_eq!(records[0].contract, "7");
        assert_eq!(records[0].identity_validation, 3);
        assert_eq!(records[0].debtor_analysis, 4);
        assert_eq!(records[0].co_debtor_analysis, 0);
        assert_eq!(records[1].week, "S2");
        assert_eq!(records[1].total, 0);
        assert_eq!(records[1].owner.as_deref(), Some("Luis"));
    }

    #[test]
    fn stored_total_is_trusted() {
        let f = write_temp(
            ".json",
            r#"[{"semana":"S1","entidad":"A","contrato":"C","validacionIdentidad":1,"analisisDeudor":1,"analisisCodeudor":1,"total":99}]"#,
        );
        let (records, _) = load_records(f.path()).unwrap();
        assert_eq!(records[0].total, 99);
    }

    #[test]
    fn blank_identifiers_are_counted_not_dropped() {
        let f = write_temp(".csv", "semana,entidad,contrato,total\nS1,,C1,4\n");
        let (records, report) = load_records(f.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.blank_identifiers, 1);
    }

    #[test]
    fn empty_json_array_is_valid() {
        let f = write_temp(".json", "[]");
        let (records, report) = load_records(f.path()).unwrap();
        assert!(records.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn rejects_unknown_extension() {
        let f = write_temp(".xlsx", "");
        assert!(matches!(
            load_records(f.path()),
            Err(ReportError::UnsupportedFormat(_))
        ));
    }
}
