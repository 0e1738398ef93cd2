//! Command reports, rendered as text or JSON

use std::io::{self, Write};

use cellscope::{
    row_lines, CellDescriptor, CellValue, ChangeKind, FormulaFinding, PreviewRow, SheetDiff,
};
use serde::Serialize;

/// A command result that can be printed for humans or serialized
pub trait Report: Serialize {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Whether the command should exit non-zero
    fn failed(&self) -> bool {
        false
    }
}

/// Where a sheet came from
#[derive(Debug, Serialize)]
pub struct SheetRef {
    pub file: String,
    pub sheet: String,
    pub max_row: u32,
    pub max_column: u32,
}

impl SheetRef {
    fn write_header(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "File: {}", self.file)?;
        writeln!(out, "Sheet: {}", self.sheet)?;
        writeln!(
            out,
            "Max row: {}, Max col: {}",
            self.max_row, self.max_column
        )
    }
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    #[serde(flatten)]
    pub source: SheetRef,
    pub cells: Vec<CellDescriptor>,
}

impl Report for InspectReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        self.source.write_header(out)?;
        if self.cells.is_empty() {
            return writeln!(out, "  (empty)");
        }
        for line in row_lines(&self.cells) {
            writeln!(out, "  {}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewReport {
    #[serde(flatten)]
    pub source: SheetRef,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Report for PreviewReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        self.source.write_header(out)?;
        if !self.headers.is_empty() {
            writeln!(out, "Headers: {}", self.headers.join(", "))?;
        }
        writeln!(out, "First {} rows:", self.rows.len())?;
        for row in &self.rows {
            writeln!(out, "  {}", PreviewRow(row))?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub source: SheetRef,
    pub formulas: usize,
    pub findings: Vec<FormulaFinding>,
}

impl Report for CheckReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        self.source.write_header(out)?;
        for finding in &self.findings {
            writeln!(out, "  {}", finding)?;
        }
        writeln!(
            out,
            "{} formulas checked, {} flagged",
            self.formulas,
            self.findings.len()
        )
    }

    fn failed(&self) -> bool {
        !self.findings.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct DiffCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub original: SheetRef,
    pub modified: SheetRef,
    pub counts: DiffCounts,
    #[serde(flatten)]
    pub diff: SheetDiff,
    #[serde(skip)]
    pub fail_on_change: bool,
}

impl DiffReport {
    pub fn new(original: SheetRef, modified: SheetRef, diff: SheetDiff) -> Self {
        let counts = DiffCounts {
            added: diff.count(ChangeKind::Added),
            removed: diff.count(ChangeKind::Removed),
            modified: diff.count(ChangeKind::Modified),
        };
        Self {
            original,
            modified,
            counts,
            diff,
            fail_on_change: false,
        }
    }
}

impl Report for DiffReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Sheet diff")?;
        for (label, side) in [("original", &self.original), ("modified", &self.modified)] {
            writeln!(
                out,
                "  {}: {} [{}] {} rows x {} columns",
                label, side.file, side.sheet, side.max_row, side.max_column
            )?;
        }
        writeln!(
            out,
            "  added: {}, removed: {}, modified: {}",
            self.counts.added, self.counts.removed, self.counts.modified
        )?;
        writeln!(out)?;

        if self.diff.is_empty() {
            return writeln!(out, "No differences.");
        }
        for change in &self.diff.changes {
            writeln!(out, "{}", change)?;
        }
        Ok(())
    }

    fn failed(&self) -> bool {
        self.fail_on_change && !self.diff.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct SheetInfo {
    pub index: usize,
    pub name: String,
    pub active: bool,
    pub max_row: u32,
    pub max_column: u32,
    pub formulas: usize,
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub file: String,
    pub sheets: Vec<SheetInfo>,
}

impl Report for InfoReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "File: {}", self.file)?;
        writeln!(out, "Sheets: {}", self.sheets.len())?;

        for sheet in &self.sheets {
            writeln!(out)?;
            let marker = if sheet.active { " (active)" } else { "" };
            writeln!(out, "  Sheet {}: \"{}\"{}", sheet.index, sheet.name, marker)?;
            if sheet.max_row == 0 || sheet.max_column == 0 {
                writeln!(out, "    Used range: empty")?;
            } else {
                writeln!(
                    out,
                    "    Used range: {} rows x {} columns",
                    sheet.max_row, sheet.max_column
                )?;
            }
            writeln!(out, "    Formulas: {}", sheet.formulas)?;
        }
        Ok(())
    }
}
