//! Spreadsheet file access.
//!
//! This module wraps [`calamine`] behind a small API shaped for the MCP
//! tools: open a workbook, enumerate its sheets, and read one sheet into a
//! [`Table`] of JSON-compatible values.
//!
//! # Supported formats
//!
//! `.xlsx` (Office Open XML) and `.xls` (legacy binary). The extension is
//! checked before parsing so that a clear error is returned for e.g. CSV
//! files rather than a parser failure.
//!
//! # Cell value mapping
//!
//! Cells are converted to JSON primitives by [`cell_to_json`]:
//!
//! - empty cells become `null`
//! - floats with no fractional part become JSON integers
//! - date and time cells become ISO-8601 strings (`YYYY-MM-DDTHH:MM:SS`)
//! - formula error cells become their error literal (`#DIV/0!`, `#N/A`, ...)

mod error;

pub use error::{WorkbookError, WorkbookResult};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use serde_json::{Map, Value};

/// File extensions accepted by [`Workbook::open`], lowercase, without dot.
const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// An open spreadsheet file.
///
/// Holds the parsed workbook handle for the duration of one tool call; the
/// file handle is released when the value is dropped.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    /// Opens a spreadsheet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not an existing regular file, the
    /// extension is not `.xlsx`/`.xls`, the file cannot be parsed, or the
    /// workbook contains no sheets.
    pub fn open(path: &Path) -> WorkbookResult<Self> {
        if !path.is_file() {
            return Err(WorkbookError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(WorkbookError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: format!(".{extension}"),
            });
        }

        let sheets = open_workbook_auto(path).map_err(|e| WorkbookError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let sheet_names = sheets.sheet_names();
        if sheet_names.is_empty() {
            return Err(WorkbookError::NoSheets {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            sheet_names,
        })
    }

    /// Returns the path this workbook was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all sheet names in workbook order.
    #[must_use]
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Resolves an optional sheet name to a concrete one.
    ///
    /// `None` resolves to the first sheet.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbookError::SheetNotFound`] if a requested name is absent.
    pub fn resolve_sheet(&self, name: Option<&str>) -> WorkbookResult<String> {
        match name {
            Some(requested) => {
                if self.sheet_names.iter().any(|s| s == requested) {
                    Ok(requested.to_string())
                } else {
                    Err(WorkbookError::SheetNotFound {
                        requested: requested.to_string(),
                        available: self.sheet_names.clone(),
                    })
                }
            }
            // open() guarantees at least one sheet
            None => Ok(self.sheet_names[0].clone()),
        }
    }

    /// Reads one sheet into a [`Table`].
    ///
    /// `None` selects the first sheet. The first row of the used range is
    /// treated as the header row; remaining rows become data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet name is unknown or its data cannot be
    /// read.
    pub fn read_sheet(&mut self, name: Option<&str>) -> WorkbookResult<Table> {
        let sheet_name = self.resolve_sheet(name)?;

        let range = self
            .sheets
            .worksheet_range(&sheet_name)
            .map_err(|e| WorkbookError::SheetRead {
                name: sheet_name.clone(),
                source: e,
            })?;

        Ok(Table::from_range(sheet_name, &range))
    }
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}

/// One sheet read into a column-named tabular structure.
///
/// `rows` holds data rows only; the header row has already been consumed
/// into `columns`.
#[derive(Debug, Clone)]
pub struct Table {
    /// Name of the sheet this table was read from.
    pub sheet_name: String,
    /// Column names from the header row, deduplicated.
    pub columns: Vec<String>,
    /// Data rows, each the same length as `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table from a calamine cell range.
    ///
    /// An empty range produces a table with no columns and no rows.
    #[must_use]
    pub fn from_range(sheet_name: String, range: &Range<Data>) -> Self {
        let mut rows_iter = range.rows();

        let columns = rows_iter.next().map_or_else(Vec::new, header_names);

        let rows = rows_iter
            .map(|row| row.iter().map(cell_to_json).collect())
            .collect();

        Self {
            sheet_name,
            columns,
            rows,
        }
    }

    /// Number of data rows (header row excluded).
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn total_columns(&self) -> usize {
        self.columns.len()
    }

    /// Index of a column by name, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Converts one data row into a column-name → value map.
    #[must_use]
    pub fn row_record(&self, row: &[Value]) -> Map<String, Value> {
        self.columns
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect()
    }

    /// Returns the first `limit` data rows as records, in sheet order.
    #[must_use]
    pub fn records(&self, limit: usize) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| self.row_record(row))
            .collect()
    }
}

/// Converts a header row into unique column names.
///
/// Blank headers become `Unnamed: {index}`; repeated names get `.1`, `.2`,
/// ... suffixes so that records keyed by column name cannot collide.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {index}"),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {index}"),
                Data::String(s) => s.clone(),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Converts one cell value to a JSON primitive.
///
/// Floats that carry no fractional part are narrowed to JSON integers, so a
/// cell displaying `1` serialises as `1` rather than `1.0` regardless of how
/// the file stores it.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // fract() == 0.0 and range checked before the cast
pub fn cell_to_json(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Value::from(*f as i64)
            } else {
                Value::from(*f)
            }
        }
        Data::DateTime(dt) => dt.as_datetime().map_or_else(
            || Value::from(dt.as_f64()),
            |naive| Value::String(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn range_from(cells: Vec<((u32, u32), Data)>) -> Range<Data> {
        let mut range = Range::new(
            (0, 0),
            cells
                .iter()
                .map(|((r, c), _)| (*r, *c))
                .fold((0, 0), |(mr, mc), (r, c)| (mr.max(r), mc.max(c))),
        );
        for ((row, col), value) in cells {
            range.set_value((row, col), value);
        }
        range
    }

    #[test]
    fn open_missing_file() {
        let err = Workbook::open(Path::new("/nonexistent/book.xlsx")).unwrap_err();
        assert!(matches!(err, WorkbookError::NotFound { .. }));
    }

    #[test]
    fn open_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let err = Workbook::open(&path).unwrap_err();
        assert!(matches!(err, WorkbookError::UnsupportedExtension { .. }));
    }

    #[test]
    fn open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let err = Workbook::open(&path).unwrap_err();
        assert!(matches!(err, WorkbookError::Open { .. }));
    }

    #[test]
    fn cell_conversion_primitives() {
        assert_eq!(cell_to_json(&Data::Empty), Value::Null);
        assert_eq!(cell_to_json(&Data::String("x".into())), json!("x"));
        assert_eq!(cell_to_json(&Data::Bool(true)), json!(true));
        assert_eq!(cell_to_json(&Data::Int(7)), json!(7));
    }

    #[test]
    fn integral_float_narrows_to_integer() {
        assert_eq!(cell_to_json(&Data::Float(1.0)), json!(1));
        assert_eq!(cell_to_json(&Data::Float(-42.0)), json!(-42));
        assert_eq!(cell_to_json(&Data::Float(1.5)), json!(1.5));
    }

    #[test]
    fn non_finite_float_stays_float() {
        let value = cell_to_json(&Data::Float(f64::NAN));
        // serde_json cannot represent NaN; it becomes null
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn iso_strings_pass_through() {
        assert_eq!(
            cell_to_json(&Data::DateTimeIso("2024-03-01T09:30:00".into())),
            json!("2024-03-01T09:30:00")
        );
    }

    #[test]
    fn header_dedup_and_unnamed() {
        let header = vec![
            Data::String("a".into()),
            Data::Empty,
            Data::String("a".into()),
            Data::String("  ".into()),
            Data::Int(3),
        ];
        assert_eq!(
            header_names(&header),
            vec!["a", "Unnamed: 1", "a.1", "Unnamed: 3", "3"]
        );
    }

    #[test]
    fn table_from_range_splits_header() {
        let range = range_from(vec![
            ((0, 0), Data::String("a".into())),
            ((0, 1), Data::String("b".into())),
            ((1, 0), Data::Int(1)),
            ((1, 1), Data::Int(2)),
            ((2, 0), Data::Int(3)),
            ((2, 1), Data::Int(4)),
        ]);

        let table = Table::from_range("Sheet1".to_string(), &range);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.total_rows(), 2);
        assert_eq!(table.total_columns(), 2);

        let records = table.records(10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], json!(1));
        assert_eq!(records[1]["b"], json!(4));
    }

    #[test]
    fn records_respects_limit() {
        let range = range_from(vec![
            ((0, 0), Data::String("n".into())),
            ((1, 0), Data::Int(1)),
            ((2, 0), Data::Int(2)),
            ((3, 0), Data::Int(3)),
        ]);

        let table = Table::from_range("Sheet1".to_string(), &range);
        assert_eq!(table.total_rows(), 3);
        assert_eq!(table.records(2).len(), 2);
    }

    #[test]
    fn empty_range_yields_empty_table() {
        let range: Range<Data> = Range::empty();
        let table = Table::from_range("Empty".to_string(), &range);
        assert!(table.columns.is_empty());
        assert_eq!(table.total_rows(), 0);
    }
}
