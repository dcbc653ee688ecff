use crate::error::ReportError;
use crate::sort_state::SortState;
use crate::store::FilterOptions;
use crate::types::{FilterField, KpiRow, Kpis, Record, SortKey, TableRow};
use crate::util::Formatter;
use crate::view::ViewSnapshot;
use serde_json::{Map, Value};
use std::io::Write;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Presentation side of the report. The pipeline hands over computed
/// values only; how they look is up to the implementation.
pub trait Renderer {
    fn render_options(&mut self, options: &FilterOptions) -> Result<(), ReportError>;
    fn render_period_label(&mut self, label: &str) -> Result<(), ReportError>;
    fn render_kpis(&mut self, kpis: &Kpis) -> Result<(), ReportError>;
    fn render_rows(&mut self, rows: &[&Record], sort: SortState, kpis: &Kpis) -> Result<(), ReportError>;
    fn render_rows_info(&mut self, info: &str) -> Result<(), ReportError>;
}

/// Push one full frame through `renderer`.
pub fn render_snapshot<R: Renderer + ?Sized>(
    renderer: &mut R,
    snapshot: &ViewSnapshot<'_>,
) -> Result<(), ReportError> {
    renderer.render_period_label(&snapshot.period_label)?;
    renderer.render_kpis(&snapshot.kpis)?;
    renderer.render_rows(&snapshot.rows, snapshot.sort, &snapshot.kpis)?;
    renderer.render_rows_info(&snapshot.rows_info)?;
    Ok(())
}

pub fn kpi_rows(kpis: &Kpis, fmt: &Formatter) -> Vec<KpiRow> {
    [
        ("Validación de identidad", kpis.identity_validation_sum),
        ("Análisis deudor", kpis.debtor_analysis_sum),
        ("Análisis codeudor", kpis.co_debtor_analysis_sum),
        ("Total", kpis.total_sum),
    ]
    .into_iter()
    .map(|(label, value)| KpiRow {
        label: label.to_string(),
        value: fmt.count(value),
    })
    .collect()
}

pub fn table_row(r: &Record, fmt: &Formatter) -> TableRow {
    TableRow {
        week: r.week.clone(),
        entity: r.entity.clone(),
        contract: r.contract.clone(),
        identity_validation: fmt.count(r.identity_validation),
        debtor_analysis: fmt.count(r.debtor_analysis),
        co_debtor_analysis: fmt.count(r.co_debtor_analysis),
        total: fmt.count(r.total),
        owner: fmt.text_or_placeholder(r.owner.as_deref()),
    }
}

/// Markdown tables on any writer, usually stdout.
pub struct TerminalRenderer<W: Write> {
    out: W,
    fmt: Formatter,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, fmt: Formatter) -> Self {
        TerminalRenderer { out, fmt }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_options(&mut self, options: &FilterOptions) -> Result<(), ReportError> {
        for field in FilterField::ALL {
            writeln!(self.out, "{}:", field.label())?;
            for (idx, (_, label)) in options.choices(field).iter().enumerate() {
                writeln!(self.out, "  [{}] {}", idx, label)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn render_period_label(&mut self, label: &str) -> Result<(), ReportError> {
        writeln!(self.out, "Periodo: {}\n", label)?;
        Ok(())
    }

    fn render_kpis(&mut self, kpis: &Kpis) -> Result<(), ReportError> {
        let table = Table::new(kpi_rows(kpis, &self.fmt)).with(Style::markdown()).to_string();
        writeln!(self.out, "{}\n", table)?;
        Ok(())
    }

    fn render_rows(&mut self, rows: &[&Record], sort: SortState, kpis: &Kpis) -> Result<(), ReportError> {
        if rows.is_empty() {
            writeln!(self.out, "(sin filas)\n")?;
            return Ok(());
        }
        let mut builder = Builder::default();
        builder.push_record(SortKey::ALL.iter().map(|k| sort.header_label(*k)));
        for r in rows {
            builder.push_record(table_row(r, &self.fmt).fields().into_iter().map(|c| c.into_owned()));
        }
        // Footer mirrors the KPI block under each numeric column.
        builder.push_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            self.fmt.count(kpis.identity_validation_sum),
            self.fmt.count(kpis.debtor_analysis_sum),
            self.fmt.count(kpis.co_debtor_analysis_sum),
            self.fmt.count(kpis.total_sum),
            String::new(),
        ]);
        let table = builder.build().with(Style::markdown()).to_string();
        writeln!(self.out, "{}\n", table)?;
        Ok(())
    }

    fn render_rows_info(&mut self, info: &str) -> Result<(), ReportError> {
        writeln!(self.out, "{}", info)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Collects one frame as a JSON object and writes it on [`finish`].
///
/// [`finish`]: JsonRenderer::finish
pub struct JsonRenderer<W: Write> {
    out: W,
    fmt: Formatter,
    doc: Map<String, Value>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, fmt: Formatter) -> Self {
        JsonRenderer {
            out,
            fmt,
            doc: Map::new(),
        }
    }

    pub fn finish(mut self) -> Result<W, ReportError> {
        serde_json::to_writer_pretty(&mut self.out, &Value::Object(self.doc))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render_options(&mut self, options: &FilterOptions) -> Result<(), ReportError> {
        self.doc.insert("options".into(), serde_json::to_value(options)?);
        Ok(())
    }

    fn render_period_label(&mut self, label: &str) -> Result<(), ReportError> {
        self.doc.insert("periodLabel".into(), Value::String(label.to_string()));
        Ok(())
    }

    fn render_kpis(&mut self, kpis: &Kpis) -> Result<(), ReportError> {
        self.doc.insert("kpis".into(), serde_json::to_value(kpis)?);
        self.doc.insert(
            "kpiLabels".into(),
            serde_json::to_value(kpi_rows(kpis, &self.fmt))?,
        );
        Ok(())
    }

    fn render_rows(&mut self, rows: &[&Record], sort: SortState, _kpis: &Kpis) -> Result<(), ReportError> {
        self.doc.insert("sort".into(), serde_json::to_value(sort)?);
        self.doc.insert("rows".into(), serde_json::to_value(rows)?);
        Ok(())
    }

    fn render_rows_info(&mut self, info: &str) -> Result<(), ReportError> {
        self.doc.insert("rowsInfo".into(), Value::String(info.to_string()));
        Ok(())
    }
}
