//! cellscope CLI - inspect spreadsheet cells, values and formulas

mod report;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cellscope::prelude::*;
use cellscope::CsvReadOptions;
use clap::{Parser, Subcommand, ValueEnum};

use report::{
    CheckReport, DiffReport, InfoReport, InspectReport, PreviewReport, Report, SheetInfo,
    SheetRef,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "cellscope")]
#[command(
    author,
    version,
    about = "Inspect spreadsheet cells: references, values, types and formulas"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Sheet to inspect instead of the workbook's active sheet
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Field delimiter for CSV input
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Keep CSV fields as text instead of detecting numbers and booleans
    #[arg(long, global = true)]
    no_type_detection: bool,

    /// More logging (-v debug, -vv trace); CELLSCOPE_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe every cell of the sheet, row by row
    Inspect {
        /// Input spreadsheet file (xlsx, xlsm, csv, tsv)
        input: PathBuf,
    },

    /// Show the first rows as value tuples
    Preview {
        /// Input spreadsheet file
        input: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 6)]
        rows: usize,
    },

    /// Report formulas with a missing or repeated `=` marker (exit 1 if any)
    Check {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Compare the cells of an original and a modified file
    Diff {
        /// Original spreadsheet
        original: PathBuf,

        /// Modified spreadsheet
        modified: PathBuf,

        /// Exit 1 when any cell changed
        #[arg(long)]
        fail_on_change: bool,
    },

    /// Show the sheets of a workbook
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = load_options(&cli)?;
    let failed = match &cli.command {
        Commands::Inspect { input } => emit(&inspect_file(input, &options)?, cli.format)?,
        Commands::Preview { input, rows } => {
            emit(&preview_file(input, &options, *rows)?, cli.format)?
        }
        Commands::Check { input } => emit(&check_file(input, &options)?, cli.format)?,
        Commands::Diff {
            original,
            modified,
            fail_on_change,
        } => {
            let mut report = diff_files(original, modified, &options)?;
            report.fail_on_change = *fail_on_change;
            emit(&report, cli.format)?
        }
        Commands::Info { input } => emit(&info_file(input, &options)?, cli.format)?,
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CELLSCOPE_LOG", default_filter))
        .format_timestamp(None)
        .init();
}

/// Map the global flags onto loader options
fn load_options(cli: &Cli) -> Result<LoadOptions> {
    let delimiter = match cli.delimiter {
        Some(delimiter) if !delimiter.is_ascii() => {
            bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
        }
        Some(delimiter) => Some(delimiter as u8),
        None => None,
    };

    Ok(LoadOptions {
        csv: CsvReadOptions {
            auto_detect_types: !cli.no_type_detection,
            ..CsvReadOptions::default()
        },
        sheet: cli.sheet.clone(),
        delimiter,
    })
}

/// Print the report and tell whether the command failed
fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<bool> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => report
            .write_text(&mut handle)
            .context("Failed to write to stdout")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, report)?;
            writeln!(handle)?;
        }
    }
    handle.flush()?;

    Ok(report.failed())
}

fn open(input: &Path, options: &LoadOptions) -> Result<Workbook> {
    cellscope::load_with_options(input, options)
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn active_sheet<'a>(workbook: &'a Workbook, input: &Path) -> Result<&'a Worksheet> {
    workbook
        .active_worksheet()
        .with_context(|| format!("No worksheet to inspect in '{}'", input.display()))
}

fn sheet_ref(input: &Path, sheet: &Worksheet) -> SheetRef {
    SheetRef {
        file: input.display().to_string(),
        sheet: sheet.name().to_string(),
        max_row: sheet.max_row(),
        max_column: sheet.max_column(),
    }
}

fn inspect_file(input: &Path, options: &LoadOptions) -> Result<InspectReport> {
    let workbook = open(input, options)?;
    let sheet = active_sheet(&workbook, input)?;

    let cells = inspect(sheet)
        .with_context(|| format!("Failed to inspect sheet '{}'", sheet.name()))?;
    Ok(InspectReport {
        source: sheet_ref(input, sheet),
        cells,
    })
}

fn preview_file(input: &Path, options: &LoadOptions, rows: usize) -> Result<PreviewReport> {
    let workbook = open(input, options)?;
    let sheet = active_sheet(&workbook, input)?;

    Ok(PreviewReport {
        source: sheet_ref(input, sheet),
        headers: headers(sheet)?,
        rows: preview_rows(sheet, rows)
            .with_context(|| format!("Failed to preview sheet '{}'", sheet.name()))?,
    })
}

fn check_file(input: &Path, options: &LoadOptions) -> Result<CheckReport> {
    let workbook = open(input, options)?;
    let sheet = active_sheet(&workbook, input)?;

    let cells = inspect(sheet)
        .with_context(|| format!("Failed to inspect sheet '{}'", sheet.name()))?;
    let formulas = cells.iter().filter(|c| c.formula.is_some()).count();
    let findings = check_formulas(&cells);
    for finding in &findings {
        log::debug!("flagged {}", finding);
    }

    Ok(CheckReport {
        source: sheet_ref(input, sheet),
        formulas,
        findings,
    })
}

fn diff_files(original: &Path, modified: &Path, options: &LoadOptions) -> Result<DiffReport> {
    let before = open(original, options)?;
    let after = open(modified, options)?;
    let before_sheet = active_sheet(&before, original)?;
    let after_sheet = active_sheet(&after, modified)?;

    let diff = diff_sheets(before_sheet, after_sheet).context("Failed to compare sheets")?;
    Ok(DiffReport::new(
        sheet_ref(original, before_sheet),
        sheet_ref(modified, after_sheet),
        diff,
    ))
}

fn info_file(input: &Path, options: &LoadOptions) -> Result<InfoReport> {
    let workbook = open(input, options)?;
    let active = workbook.active_sheet();

    let sheets = workbook
        .worksheets()
        .enumerate()
        .map(|(index, sheet)| SheetInfo {
            index,
            name: sheet.name().to_string(),
            active: index == active,
            max_row: sheet.max_row(),
            max_column: sheet.max_column(),
            formulas: sheet.formula_cells().count(),
        })
        .collect();

    Ok(InfoReport {
        file: input.display().to_string(),
        sheets,
    })
}
