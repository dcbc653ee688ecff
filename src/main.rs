// Entry point and CLI flow.
//
// One-shot mode loads the data, applies the filters and header clicks given
// on the command line, prints one frame and optionally exports it.
// Interactive mode keeps the same session open behind a numbered menu so
// filters and sorting can be changed repeatedly.
mod aggregate;
mod collation;
mod config;
mod error;
mod filter;
mod loader;
mod output;
mod render;
mod sort;
mod sort_state;
mod store;
mod types;
mod util;
mod view;

use clap::Parser;
use config::{OutputFormat, ViewConfig};
use error::ReportError;
use render::{render_snapshot, JsonRenderer, Renderer, TerminalRenderer};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use store::RecordStore;
use tracing::info;
use types::{FilterField, SortKey};
use view::ViewSession;

/// Weekly identity-validation and debtor-analysis activity report.
#[derive(Parser, Debug)]
#[command(name = "weekly_report")]
#[command(about = "Filter, sort and total weekly activity records")]
struct Args {
    /// Data file (.csv or .json)
    data: PathBuf,

    /// Only show this week
    #[arg(long)]
    week: Option<String>,

    /// Only show this entity
    #[arg(long)]
    entity: Option<String>,

    /// Only show this contract
    #[arg(long)]
    contract: Option<String>,

    /// Column header clicks to replay, in order (repeat to toggle)
    #[arg(long = "sort", value_enum)]
    sort: Vec<SortKey>,

    /// Output style
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Locale for ordering and number/date formatting
    #[arg(long, env = "REPORT_LOCALE", default_value = "es-CO")]
    locale: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "REPORT_LOG", default_value = "warn")]
    log_level: String,

    /// Write the visible rows to a CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Write the full view (KPIs, rows, labels) to a JSON file
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Keep the session open behind a menu
    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn config(&self) -> ViewConfig {
        ViewConfig {
            locale: self.locale.clone(),
            log_level: self.log_level.clone(),
            output: self.format,
        }
    }
}

/// Read a single line of input after printing `prompt`.
///
/// Returns `None` once stdin is closed.
fn read_choice(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn show(session: &ViewSession) -> Result<(), ReportError> {
    let mut r = TerminalRenderer::new(io::stdout().lock(), *session.formatter());
    render_snapshot(&mut r, &session.snapshot())
}

/// Menu entry for picking a filter value. `[0]` always means "all".
fn prompt_filter(session: &mut ViewSession, field: FilterField) -> Result<(), ReportError> {
    let choices = session.options().choices(field);
    println!("{}:", field.label());
    for (idx, (_, label)) in choices.iter().enumerate() {
        println!("  [{}] {}", idx, label);
    }
    let Some(input) = read_choice("Enter choice: ") else {
        return Ok(());
    };
    match input.parse::<usize>().ok().and_then(|i| choices.get(i)) {
        Some((value, _)) => {
            let value = value.clone();
            session.set_filter(field, Some(&value));
            show(session)
        }
        None => {
            println!("Invalid choice. Please enter 0-{}.\n", choices.len().saturating_sub(1));
            Ok(())
        }
    }
}

/// Menu entry standing in for clicking a column header.
fn prompt_sort(session: &mut ViewSession) -> Result<(), ReportError> {
    let sort = session.sort();
    for (idx, key) in SortKey::ALL.iter().enumerate() {
        println!("  [{}] {}", idx + 1, sort.header_label(*key));
    }
    let Some(input) = read_choice("Enter choice: ") else {
        return Ok(());
    };
    match input
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| SortKey::ALL.get(i))
    {
        Some(key) => {
            session.click_header(*key);
            show(session)
        }
        None => {
            println!("Invalid choice. Please enter 1-{}.\n", SortKey::ALL.len());
            Ok(())
        }
    }
}

fn prompt_export(session: &ViewSession) -> Result<(), ReportError> {
    let Some(path) = read_choice("Export to (.csv or .json): ") else {
        return Ok(());
    };
    let path = PathBuf::from(path);
    if has_ext(&path, "csv") {
        export(session, Some(&path), None)
    } else if has_ext(&path, "json") {
        export(session, None, Some(&path))
    } else {
        println!("Unsupported file type: {}\n", path.display());
        Ok(())
    }
}

fn has_ext(path: &std::path::Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn export(
    session: &ViewSession,
    csv_path: Option<&PathBuf>,
    json_path: Option<&PathBuf>,
) -> Result<(), ReportError> {
    let snapshot = session.snapshot();
    if let Some(path) = csv_path {
        let n = output::export_csv(path, &snapshot, session.formatter())?;
        info!(path = %path.display(), rows = n, "csv exported");
        println!("(Table exported to {})\n", path.display());
    }
    if let Some(path) = json_path {
        output::write_json(path, &snapshot)?;
        info!(path = %path.display(), "json exported");
        println!("(View exported to {})\n", path.display());
    }
    Ok(())
}

fn interactive(session: &mut ViewSession) -> Result<(), ReportError> {
    show(session)?;
    loop {
        println!("Select an action:");
        println!("[1] Filter by week");
        println!("[2] Filter by entity");
        println!("[3] Filter by contract");
        println!("[4] Sort by column");
        println!("[5] Reset filters and sorting");
        println!("[6] Export current view");
        println!("[0] Exit\n");
        let Some(choice) = read_choice("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => prompt_filter(session, FilterField::Week)?,
            "2" => prompt_filter(session, FilterField::Entity)?,
            "3" => prompt_filter(session, FilterField::Contract)?,
            "4" => prompt_sort(session)?,
            "5" => {
                session.reset();
                show(session)?;
            }
            "6" => prompt_export(session)?,
            "0" => break,
            _ => println!("Invalid choice. Please enter 0-6.\n"),
        }
    }
    println!("Exiting the program.");
    Ok(())
}

fn run(args: Args) -> Result<(), ReportError> {
    let config = args.config();
    config::init_logging(&config)?;

    let (records, load_report) = loader::load_records(&args.data)?;
    if load_report.parse_errors > 0 {
        eprintln!(
            "Note: {} rows skipped due to parse errors.",
            util::format_int(load_report.parse_errors, &util::number_locale(&config.locale))
        );
    }

    let store = RecordStore::new(records);
    if store.is_empty() {
        eprintln!("Note: {} contains no records.", args.data.display());
    }
    info!(records = store.len(), locale = %config.locale, "session started");
    let mut session = ViewSession::new(store, &config.locale);
    session.set_week(args.week.as_deref());
    session.set_entity(args.entity.as_deref());
    session.set_contract(args.contract.as_deref());
    for key in &args.sort {
        session.click_header(*key);
    }

    if args.interactive {
        return interactive(&mut session);
    }

    let snapshot = session.snapshot();
    match config.output {
        OutputFormat::Table => {
            let mut r = TerminalRenderer::new(io::stdout().lock(), *session.formatter());
            r.render_options(&session.options())?;
            render_snapshot(&mut r, &snapshot)?;
        }
        OutputFormat::Json => {
            let mut r = JsonRenderer::new(io::stdout().lock(), *session.formatter());
            r.render_options(&session.options())?;
            render_snapshot(&mut r, &snapshot)?;
            drop(r.finish()?);
        }
    }
    export(&session, args.export_csv.as_ref(), args.export_json.as_ref())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
