//! Layer 6: Data — in-memory column frames.
//!
//! ## Purpose
//!
//! This module provides [`Frame`], the tabular container models train on and
//! predict against: named columns of equal length, either numeric (NaN for
//! missing) or categorical (integer codes over a level table).
//!
//! ## Key concepts
//!
//! * **Categorical cast**: [`Frame::cast_categorical`] reinterprets a numeric
//!   or string column as a factor, which is how a 0/1 response column becomes
//!   a binary classification target.
//! * **Column input**: programmatic construction accepts anything implementing
//!   [`ColumnInput`](crate::input::ColumnInput) — slices, vectors, or 1-D
//!   `ndarray` views.
//!
//! ## Invariants
//!
//! * All columns have the same length.
//! * Column names are unique.
//! * Every categorical code indexes into the column's level table.
//!
//! ## Non-goals
//!
//! * No joins, group-bys, or other relational operations.
//! * No imputation; missing numeric values stay NaN.

/// CSV import for frames.
pub mod csv;

use crate::input::ColumnInput;
use crate::primitives::errors::GbmError;

/// A single named column of data.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating-point values; NaN marks a missing entry.
    Numeric(Vec<f64>),
    /// Factor values stored as codes into a level table.
    Categorical {
        /// Distinct level labels, sorted.
        levels: Vec<String>,
        /// Per-row index into `levels`.
        codes: Vec<u32>,
    },
}

impl Column {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical { codes, .. } => codes.len(),
        }
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the column as raw f64 values (codes for categoricals).
    pub fn as_f64(&self, out: &mut Vec<f64>) {
        out.clear();
        match self {
            Column::Numeric(v) => out.extend_from_slice(v),
            Column::Categorical { codes, .. } => {
                out.extend(codes.iter().map(|&c| c as f64));
            }
        }
    }
}

/// An in-memory table of named, equally sized columns.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (0 for an empty frame).
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over (name, column) pairs in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Append a numeric column from any supported input container.
    pub fn add_numeric<I>(&mut self, name: &str, values: &I) -> Result<(), GbmError>
    where
        I: ColumnInput<f64> + ?Sized,
    {
        let slice = values.as_column_slice()?;
        self.push_column(name, Column::Numeric(slice.to_vec()))
    }

    /// Append a categorical column from string labels.
    ///
    /// Levels are the sorted distinct labels.
    pub fn add_categorical(&mut self, name: &str, labels: &[&str]) -> Result<(), GbmError> {
        let mut levels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        levels.sort();
        levels.dedup();
        let codes = labels
            .iter()
            .map(|s| levels.iter().position(|l| l == s).unwrap_or(0) as u32)
            .collect();
        self.push_column(name, Column::Categorical { levels, codes })
    }

    /// Reinterpret a column as categorical (the `asfactor` cast).
    ///
    /// Numeric columns become factors over their distinct values; integral
    /// values are formatted without a fractional part. Casting a column that
    /// is already categorical is a no-op.
    pub fn cast_categorical(&mut self, name: &str) -> Result<(), GbmError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| GbmError::UnknownColumn(name.to_string()))?;
        let values = match &self.columns[idx] {
            Column::Categorical { .. } => return Ok(()),
            Column::Numeric(v) => v.clone(),
        };
        if values.iter().any(|v| v.is_nan()) {
            return Err(GbmError::InvalidInput(format!(
                "cannot cast column `{}` with missing values to categorical",
                name
            )));
        }

        let mut distinct = values.clone();
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        distinct.dedup();

        let levels: Vec<String> = distinct.iter().map(|v| format_level(*v)).collect();
        let codes = values
            .iter()
            .map(|v| {
                distinct
                    .iter()
                    .position(|d| d == v)
                    .unwrap_or(0) as u32
            })
            .collect();
        self.columns[idx] = Column::Categorical { levels, codes };
        Ok(())
    }

    fn push_column(&mut self, name: &str, column: Column) -> Result<(), GbmError> {
        if self.column_index(name).is_some() {
            return Err(GbmError::InvalidInput(format!(
                "duplicate column name `{}`",
                name
            )));
        }
        if !self.columns.is_empty() && column.len() != self.nrows() {
            return Err(GbmError::MismatchedLengths {
                expected: self.nrows(),
                actual: column.len(),
            });
        }
        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(())
    }
}

fn format_level(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_numeric_to_categorical() {
        let mut frame = Frame::new();
        frame
            .add_numeric("bad_loan", &vec![0.0, 1.0, 1.0, 0.0])
            .unwrap();
        frame.cast_categorical("bad_loan").unwrap();
        match frame.column("bad_loan").unwrap() {
            Column::Categorical { levels, codes } => {
                assert_eq!(levels, &["0", "1"]);
                assert_eq!(codes, &[0, 1, 1, 0]);
            }
            _ => panic!("expected categorical column"),
        }
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let mut frame = Frame::new();
        frame.add_numeric("a", &vec![1.0, 2.0]).unwrap();
        let err = frame.add_numeric("b", &vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            GbmError::MismatchedLengths {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut frame = Frame::new();
        frame.add_numeric("a", &vec![1.0]).unwrap();
        assert!(frame.add_numeric("a", &vec![2.0]).is_err());
    }
}
