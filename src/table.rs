//! Row-oriented report tables
//!
//! A [`Table`] is an ordered list of named columns and rows of [`Cell`]s.
//! Dimension values are kept as text and metric values as `f64`; every
//! operation either preserves row order or states the order it produces.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::core::error::{Ga4Error, Result};

/// A single table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Ga4Error::Schema(format!(
                "row has {} values but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column, or a schema error naming the missing column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                Ga4Error::Schema(format!(
                    "column '{name}' not found (available: {})",
                    self.columns.join(", ")
                ))
            })
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column).ok()?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Rename columns according to a fixed `(from, to)` mapping.
    ///
    /// Every source column must exist and no target may collide with a
    /// column that is not itself renamed; the table is left untouched on error.
    pub fn rename_columns(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        let mut renamed = self.columns.clone();
        for (from, to) in mapping {
            let idx = self.column_index(from)?;
            renamed[idx] = (*to).to_string();
        }

        for (i, name) in renamed.iter().enumerate() {
            if renamed[..i].contains(name) {
                return Err(Ga4Error::Schema(format!(
                    "renaming produces duplicate column '{name}'"
                )));
            }
        }

        self.columns = renamed;
        Ok(())
    }

    /// Remove the row at `index`. Out of range is a no-op.
    pub fn drop_row(&mut self, index: usize) -> Option<Vec<Cell>> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    /// Keep only rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Stable sort on a text column.
    pub fn sort_by_text(&mut self, column: &str, order: SortOrder) -> Result<()> {
        let idx = self.column_index(column)?;
        self.rows.sort_by(|a, b| {
            let ord = a[idx].as_text().cmp(&b[idx].as_text());
            apply_order(ord, order)
        });
        Ok(())
    }

    /// Stable sort on a numeric column.
    pub fn sort_by_number(&mut self, column: &str, order: SortOrder) -> Result<()> {
        let idx = self.ensure_numeric(column)?;
        self.rows.sort_by(|a, b| {
            let ord = number_at(a, idx).total_cmp(&number_at(b, idx));
            apply_order(ord, order)
        });
        Ok(())
    }

    /// Replace every text cell equal to `from` in `column` with `to`.
    /// Returns the number of replaced cells.
    pub fn replace_text(&mut self, column: &str, from: &str, to: &str) -> Result<usize> {
        let idx = self.column_index(column)?;
        let mut replaced = 0;
        for row in &mut self.rows {
            if row[idx].as_text() == Some(from) {
                row[idx] = Cell::Text(to.to_string());
                replaced += 1;
            }
        }
        Ok(replaced)
    }

    /// Append a text column computed from each row.
    pub fn add_derived_text<F>(&mut self, name: &str, derive: F) -> Result<()>
    where
        F: Fn(&[Cell]) -> String,
    {
        if self.has_column(name) {
            return Err(Ga4Error::Schema(format!("column '{name}' already exists")));
        }
        for row in &mut self.rows {
            let value = derive(row);
            row.push(Cell::Text(value));
        }
        self.columns.push(name.to_string());
        Ok(())
    }

    /// Append a text column whose value joins the given columns with `separator`.
    pub fn add_joined_column(&mut self, name: &str, sources: &[&str], separator: &str) -> Result<()> {
        let indices = sources
            .iter()
            .map(|s| self.column_index(s))
            .collect::<Result<Vec<_>>>()?;

        self.add_derived_text(name, |row| {
            indices
                .iter()
                .map(|&i| row[i].to_string())
                .collect::<Vec<_>>()
                .join(separator)
        })
    }

    /// Rewrite a numeric column as display text. Used on display copies only.
    pub fn format_number_column<F>(&mut self, column: &str, format: F) -> Result<()>
    where
        F: Fn(f64) -> String,
    {
        let idx = self.ensure_numeric(column)?;
        for row in &mut self.rows {
            let value = number_at(row, idx);
            row[idx] = Cell::Text(format(value));
        }
        Ok(())
    }

    /// The `n` rows with the largest values in `column`, descending.
    /// The source table is left untouched.
    pub fn top_n(&self, column: &str, n: usize) -> Result<Table> {
        let mut ranked = self.clone();
        ranked.sort_by_number(column, SortOrder::Descending)?;
        ranked.rows.truncate(n);
        Ok(ranked)
    }

    /// The first `n` rows in current order.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn sum(&self, column: &str) -> Result<f64> {
        Ok(self.numbers(column)?.iter().sum())
    }

    /// Arithmetic mean, `None` for an empty table.
    pub fn mean(&self, column: &str) -> Result<Option<f64>> {
        let values = self.numbers(column)?;
        if values.is_empty() {
            Ok(None)
        } else {
            Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
        }
    }

    pub fn numbers(&self, column: &str) -> Result<Vec<f64>> {
        let idx = self.ensure_numeric(column)?;
        Ok(self.rows.iter().map(|row| number_at(row, idx)).collect())
    }

    /// Column values rendered as strings (numbers included).
    pub fn texts(&self, column: &str) -> Result<Vec<String>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| row[idx].to_string()).collect())
    }

    fn ensure_numeric(&self, column: &str) -> Result<usize> {
        let idx = self.column_index(column)?;
        if self.rows.iter().any(|row| row[idx].as_number().is_none()) {
            return Err(Ga4Error::Schema(format!("column '{column}' is not numeric")));
        }
        Ok(idx)
    }
}

fn number_at(row: &[Cell], idx: usize) -> f64 {
    row[idx].as_number().unwrap_or(f64::NAN)
}

fn apply_order(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}

/// Serializes as an array of `{column: value}` records.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Record {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct Record<'a> {
    columns: &'a [String],
    row: &'a [Cell],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.row) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
