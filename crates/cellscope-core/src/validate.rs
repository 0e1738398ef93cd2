//! Formula marker validation
//!
//! A well-formed formula starts with exactly one `=`. Generators that prepend
//! a marker to text that already carries one produce `==SUM(...)`; such
//! formulas are reported here, never rewritten.

use std::fmt;

use crate::cell::FORMULA_MARKER;
use crate::inspect::CellDescriptor;

/// A problem with the leading marker of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FormulaMarkerAnomaly {
    /// More than one leading marker
    DuplicateMarker { markers: usize },
    /// No leading marker at all
    MissingMarker,
}

impl FormulaMarkerAnomaly {
    /// Check formula text; `None` means exactly one leading marker
    pub fn detect(text: &str) -> Option<Self> {
        match text.chars().take_while(|&c| c == FORMULA_MARKER).count() {
            0 => Some(FormulaMarkerAnomaly::MissingMarker),
            1 => None,
            markers => Some(FormulaMarkerAnomaly::DuplicateMarker { markers }),
        }
    }
}

impl fmt::Display for FormulaMarkerAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaMarkerAnomaly::DuplicateMarker { markers } => write!(
                f,
                "duplicate formula marker ({}x '{}')",
                markers, FORMULA_MARKER
            ),
            FormulaMarkerAnomaly::MissingMarker => {
                write!(f, "missing formula marker '{}'", FORMULA_MARKER)
            }
        }
    }
}

/// A formula cell with a marker problem
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormulaFinding {
    pub reference: String,
    pub formula: String,
    pub anomaly: FormulaMarkerAnomaly,
}

impl fmt::Display for FormulaFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} in {}", self.reference, self.anomaly, self.formula)
    }
}

/// Collect every flagged formula, in descriptor order
pub fn check_formulas(descriptors: &[CellDescriptor]) -> Vec<FormulaFinding> {
    descriptors
        .iter()
        .filter_map(|d| {
            let anomaly = d.anomaly?;
            let formula = d.formula.clone()?;
            Some(FormulaFinding {
                reference: d.reference.clone(),
                formula,
                anomaly,
            })
        })
        .collect()
}
