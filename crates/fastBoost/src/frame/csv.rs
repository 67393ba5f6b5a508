//! CSV import for frames.
//!
//! ## Purpose
//!
//! This module reads a comma-separated file with a header row into a
//! [`Frame`], inferring one type per column: numeric if every non-empty cell
//! parses as a float, categorical otherwise.
//!
//! ## Design notes
//!
//! * **Two passes over cells, one over the file**: rows are buffered as
//!   strings, then each column is typed and materialized.
//! * **Missing values**: empty cells become NaN in numeric columns and the
//!   empty-string level in categorical columns.
//!
//! ## Invariants
//!
//! * Every data row must have exactly as many cells as the header.
//!
//! ## Non-goals
//!
//! * No quoting or escaping support; the lending fixture and test inputs are
//!   plain comma-separated values.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Column, Frame};
use crate::primitives::errors::GbmError;

impl Frame {
    /// Read a CSV file with a header row into a frame.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Frame, GbmError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GbmError::Import(format!("{}: {}", path.display(), e))
        })?;
        Frame::from_csv_reader(BufReader::new(file))
    }

    /// Read CSV data with a header row from any buffered reader.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<Frame, GbmError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(GbmError::Import("empty file".to_string())),
        };
        let names: Vec<String> = header.split(',').map(|s| s.trim().to_string()).collect();
        let ncols = names.len();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); ncols];
        for (lineno, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<&str> = line.split(',').map(str::trim).collect();
            if row.len() != ncols {
                return Err(GbmError::Import(format!(
                    "row {} has {} cells, header has {}",
                    lineno + 2,
                    row.len(),
                    ncols
                )));
            }
            for (col, cell) in row.into_iter().enumerate() {
                cells[col].push(cell.to_string());
            }
        }
        if cells[0].is_empty() {
            return Err(GbmError::Import("no data rows".to_string()));
        }

        let mut frame = Frame::new();
        for (name, raw) in names.iter().zip(cells.into_iter()) {
            frame_push_inferred(&mut frame, name, raw)?;
        }
        Ok(frame)
    }
}

fn frame_push_inferred(frame: &mut Frame, name: &str, raw: Vec<String>) -> Result<(), GbmError> {
    let numeric = raw
        .iter()
        .all(|cell| cell.is_empty() || cell.parse::<f64>().is_ok());
    let column = if numeric {
        let values = raw
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    f64::NAN
                } else {
                    // Parse cannot fail: checked above.
                    cell.parse::<f64>().unwrap_or(f64::NAN)
                }
            })
            .collect();
        Column::Numeric(values)
    } else {
        let mut levels: Vec<String> = raw.to_vec();
        levels.sort();
        levels.dedup();
        let codes = raw
            .iter()
            .map(|cell| levels.iter().position(|l| l == cell).unwrap_or(0) as u32)
            .collect();
        Column::Categorical { levels, codes }
    };
    frame.push_inferred(name, column)
}

impl Frame {
    fn push_inferred(&mut self, name: &str, column: Column) -> Result<(), GbmError> {
        // CSV columns share the header's uniqueness and row-count checks.
        if self.column_index(name).is_some() {
            return Err(GbmError::Import(format!("duplicate header `{}`", name)));
        }
        if !self.names().is_empty() && column.len() != self.nrows() {
            return Err(GbmError::MismatchedLengths {
                expected: self.nrows(),
                actual: column.len(),
            });
        }
        match column {
            Column::Numeric(v) => self.add_numeric(name, &v),
            Column::Categorical { levels, codes } => {
                let labels: Vec<&str> = codes
                    .iter()
                    .map(|&c| levels[c as usize].as_str())
                    .collect();
                self.add_categorical(name, &labels)
            }
        }
    }
}
