//! Cell-level comparison of two inspected sheets

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::Result;
use crate::inspect::{inspect, CellDescriptor, SheetSource};

/// How a cell differs between the original and the modified sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChangeKind {
    /// Blank or absent in the original, filled in the modified sheet
    Added,
    /// Filled in the original, blank or absent in the modified sheet
    Removed,
    /// Value, type or formula differs
    Modified,
}

impl ChangeKind {
    pub fn symbol(&self) -> char {
        match self {
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
            ChangeKind::Modified => '~',
        }
    }
}

/// One changed cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellChange {
    pub kind: ChangeKind,
    pub reference: String,
    pub row: u32,
    pub column: u32,
    pub original: Option<CellDescriptor>,
    pub modified: Option<CellDescriptor>,
}

impl fmt::Display for CellChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: ", self.kind.symbol(), self.reference)?;
        match (&self.original, &self.modified) {
            (Some(before), Some(after)) => {
                write!(f, "{} -> {}", Summary(before), Summary(after))
            }
            (Some(only), None) | (None, Some(only)) => write!(f, "{}", Summary(only)),
            (None, None) => Ok(()),
        }
    }
}

/// `val=.., type=..[, formula=..]` without the reference prefix
struct Summary<'a>(&'a CellDescriptor);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "val={}, type={}", self.0.value, self.0.type_tag)?;
        if let Some(formula) = &self.0.formula {
            write!(f, ", formula={}", formula)?;
        }
        Ok(())
    }
}

/// All changes between two sheets, in row-major order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetDiff {
    /// (max_row, max_column) of the original
    pub original_extent: (u32, u32),
    /// (max_row, max_column) of the modified sheet
    pub modified_extent: (u32, u32),
    pub changes: Vec<CellChange>,
}

impl SheetDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    pub fn extent_changed(&self) -> bool {
        self.original_extent != self.modified_extent
    }
}

fn extent(descriptors: &[CellDescriptor]) -> (u32, u32) {
    descriptors.iter().fold((0, 0), |(rows, cols), d| {
        (rows.max(d.row), cols.max(d.column))
    })
}

fn index_filled(descriptors: &[CellDescriptor]) -> BTreeMap<(u32, u32), CellDescriptor> {
    descriptors
        .iter()
        .filter(|d| !d.is_blank())
        .map(|d| ((d.row, d.column), d.clone()))
        .collect()
}

fn same_content(a: &CellDescriptor, b: &CellDescriptor) -> bool {
    a.type_tag == b.type_tag && a.value == b.value && a.formula == b.formula
}

/// Compare two descriptor sequences cell by cell
///
/// A blank cell and a missing cell are treated alike.
pub fn diff_descriptors(original: &[CellDescriptor], modified: &[CellDescriptor]) -> SheetDiff {
    let mut before = index_filled(original);
    let mut after = index_filled(modified);

    let positions: BTreeSet<(u32, u32)> = before.keys().chain(after.keys()).copied().collect();

    let mut changes = Vec::new();
    for (row, column) in positions {
        let old = before.remove(&(row, column));
        let new = after.remove(&(row, column));
        let kind = match (&old, &new) {
            (Some(a), Some(b)) if same_content(a, b) => continue,
            (Some(_), Some(_)) => ChangeKind::Modified,
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (None, None) => continue,
        };
        let reference = old
            .as_ref()
            .or(new.as_ref())
            .map(|d| d.reference.clone())
            .unwrap_or_default();
        changes.push(CellChange {
            kind,
            reference,
            row,
            column,
            original: old,
            modified: new,
        });
    }

    log::debug!("diff found {} changed cells", changes.len());
    SheetDiff {
        original_extent: extent(original),
        modified_extent: extent(modified),
        changes,
    }
}

/// Inspect both sheets and compare them
pub fn diff_sheets<A, B>(original: &A, modified: &B) -> Result<SheetDiff>
where
    A: SheetSource + ?Sized,
    B: SheetSource + ?Sized,
{
    Ok(diff_descriptors(&inspect(original)?, &inspect(modified)?))
}
