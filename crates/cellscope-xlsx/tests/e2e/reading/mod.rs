//! Reading tests: build a package, load it, assert on cells.

mod cell_types;
mod dimensions;
mod formulas;
