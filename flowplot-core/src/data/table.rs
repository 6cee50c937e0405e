//! Header-keyed CSV table.
//!
//! Rows keep file order and header-declared column identity; values stay raw
//! strings until a typed loader parses the columns it needs.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::DataError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    headers: &'a [String],
    values: &'a [String],
    index: usize,
}

impl Table {
    /// Parse a headered CSV from any reader.
    ///
    /// Rows whose field count differs from the header fail with `DataError::Csv`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().enumerate().map(|(index, values)| TableRow {
            headers: &self.headers,
            values,
            index,
        })
    }
}

impl<'a> TableRow<'a> {
    /// Value under `column`. A repeated header resolves to its last occurrence.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().rposition(|h| h == column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Zero-based data row index (header excluded).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parse a required column; missing column and bad values are distinct errors.
    pub fn parse<T: FromStr>(&self, column: &str) -> Result<T, DataError> {
        let raw = self.get(column).ok_or_else(|| DataError::MissingField {
            field: column.to_string(),
        })?;
        raw.parse().map_err(|_| DataError::InvalidValue {
            column: column.to_string(),
            row: self.index,
            value: raw.to_string(),
        })
    }
}

/// Load a headered CSV file.
pub fn load_table(path: &Path) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|e| DataError::file_access(path, e))?;
    let table = Table::from_reader(file)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "loaded table"
    );
    Ok(table)
}
