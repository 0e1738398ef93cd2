//! Stored cell content

use super::{CellValue, TypeTag};

/// The leading character marking stored content as a formula
pub const FORMULA_MARKER: char = '=';

/// What a loader stored in a cell
///
/// Loaders decide once, at read time, whether a cell holds a literal or a
/// formula. Nothing downstream re-derives that from the text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// A plain value
    Literal(CellValue),

    /// A formula with its last calculated result, if the file carried one
    Formula {
        /// Formula text as stored, including its marker (e.g. "=SUM(A1:A3)")
        text: String,
        /// Cached result
        cached: Option<CellValue>,
    },
}

impl CellContent {
    /// Create a formula without a cached result
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellContent::Formula {
            text: text.into(),
            cached: None,
        }
    }

    /// Check if the content is an empty literal
    pub fn is_null(&self) -> bool {
        matches!(self, CellContent::Literal(CellValue::Null))
    }

    /// Check if the content is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula { .. })
    }

    /// Type tag of the stored content
    pub fn type_tag(&self) -> TypeTag {
        match self {
            CellContent::Literal(value) => value.type_tag(),
            CellContent::Formula { .. } => TypeTag::Formula,
        }
    }

    /// The value a reader sees: the literal, or a formula's cached result
    pub fn value(&self) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        match self {
            CellContent::Literal(value) => value,
            CellContent::Formula {
                cached: Some(value),
                ..
            } => value,
            CellContent::Formula { cached: None, .. } => NULL,
        }
    }

    /// Formula text, if this is a formula with non-empty text
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellContent::Formula { text, .. } if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Literal(CellValue::Null)
    }
}

impl From<CellValue> for CellContent {
    fn from(value: CellValue) -> Self {
        CellContent::Literal(value)
    }
}

/// A cell as seen through a sheet accessor
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Literal value, or a formula's cached result
    pub value: CellValue,
    /// Type of the stored content
    pub type_tag: TypeTag,
    /// Formula text, present only for formula content with non-empty text
    pub formula: Option<String>,
}

impl Cell {
    /// An empty cell
    pub fn null() -> Self {
        Self {
            value: CellValue::Null,
            type_tag: TypeTag::Null,
            formula: None,
        }
    }
}

impl From<&CellContent> for Cell {
    fn from(content: &CellContent) -> Self {
        Self {
            value: content.value().clone(),
            type_tag: content.type_tag(),
            formula: content.formula_text().map(str::to_string),
        }
    }
}
