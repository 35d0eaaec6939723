//! The `search_excel_data` tool: filter rows by a column value.
//!
//! Searches one column of one sheet for a value, either by typed equality
//! (`exact`) or case-insensitive substring over the stringified cell
//! (`contains`). The match count is computed over the whole sheet before the
//! result list is capped at `max_results`.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::tools::{ToolContext, ToolDefinition, ToolResponse};
use crate::workbook::{Workbook, WorkbookError, WorkbookResult};

/// Default number of returned rows when the caller omits `max_results`.
const DEFAULT_MAX_RESULTS: usize = 50;

/// How cell values are compared against the search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchType {
    /// Typed equality with numeric cross-type coercion.
    Exact,
    /// Case-insensitive substring over the stringified cell.
    Contains,
}

/// Returns the `tools/list` definition for this tool.
pub(crate) fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "search_excel_data".to_string(),
        description: Some(
            "Search one column of an Excel sheet and return the matching rows. \
             match_type 'exact' compares values (numbers match across integer/float), \
             'contains' does a case-insensitive substring match on the cell text. \
             Reports the total match count even when results are capped by max_results."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the Excel file (.xlsx or .xls)"
                },
                "column_name": {
                    "type": "string",
                    "description": "Name of the column to search"
                },
                "search_value": {
                    "description": "Value to search for (string, number, or boolean)"
                },
                "sheet_name": {
                    "type": "string",
                    "description": "Optional: sheet to search. Defaults to the first sheet"
                },
                "match_type": {
                    "type": "string",
                    "enum": ["exact", "contains"],
                    "description": "Optional: 'exact' (default) or 'contains'"
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 100,
                    "description": "Optional: maximum rows to return (default: 50, maximum: 100)"
                }
            },
            "required": ["file_path", "column_name", "search_value"]
        }),
    }
}

/// Handles a `search_excel_data` call.
#[allow(clippy::too_many_lines)]
pub(crate) fn handler(context: &ToolContext, arguments: &Value) -> ToolResponse {
    let Some(file_path) = arguments.get("file_path").and_then(Value::as_str) else {
        return ToolResponse::err("Missing required parameter: file_path");
    };
    let Some(column_name) = arguments.get("column_name").and_then(Value::as_str) else {
        return ToolResponse::err("Missing required parameter: column_name");
    };
    let search_value = match arguments.get("search_value") {
        Some(v @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => v.clone(),
        Some(other) => {
            return ToolResponse::err(format!(
                "search_value must be a string, number, or boolean, got: {other}"
            ));
        }
        None => return ToolResponse::err("Missing required parameter: search_value"),
    };
    let sheet_name = arguments.get("sheet_name").and_then(Value::as_str);

    let match_type = match arguments.get("match_type").and_then(Value::as_str) {
        None | Some("exact") => MatchType::Exact,
        Some("contains") => MatchType::Contains,
        Some(other) => {
            return ToolResponse::err(format!(
                "match_type must be 'exact' or 'contains', got: '{other}'"
            ));
        }
    };

    let max_results = match arguments.get("max_results") {
        None | Some(Value::Null) => DEFAULT_MAX_RESULTS,
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => {
                return ToolResponse::err(format!(
                    "max_results must be a positive integer, got: {value}"
                ));
            }
        },
    };
    if max_results > context.limits.max_search_results {
        return ToolResponse::err(format!(
            "max_results cannot exceed {}, got: {max_results}",
            context.limits.max_search_results
        ));
    }

    info!(
        file_path,
        column_name,
        search_value = %search_value,
        ?match_type,
        max_results,
        "search_excel_data called"
    );

    if let Err(message) = context.validate_path(file_path) {
        warn!(file_path, "path rejected");
        return ToolResponse::err(message);
    }

    match search(
        file_path,
        column_name,
        &search_value,
        sheet_name,
        match_type,
        max_results,
    ) {
        Ok(data) => ToolResponse::ok(data),
        Err(e) => {
            warn!(file_path, error = %e, "search_excel_data failed");
            ToolResponse::err(e.to_string())
        }
    }
}

/// Runs the search and builds the result payload.
fn search(
    file_path: &str,
    column_name: &str,
    search_value: &Value,
    sheet_name: Option<&str>,
    mut match_type: MatchType,
    max_results: usize,
) -> WorkbookResult<Value> {
    let mut workbook = Workbook::open(Path::new(file_path))?;
    let table = workbook.read_sheet(sheet_name)?;

    let Some(column_index) = table.column_index(column_name) else {
        return Err(WorkbookError::ColumnNotFound {
            requested: column_name.to_string(),
            available: table.columns.clone(),
        });
    };

    // Substring matching only makes sense for string needles
    if match_type == MatchType::Contains && !search_value.is_string() {
        warn!(
            search_value = %search_value,
            "contains match requested for non-string value, using exact match"
        );
        match_type = MatchType::Exact;
    }

    let mut total_matches = 0usize;
    let mut matched_rows = Vec::new();
    for row in &table.rows {
        let cell = &row[column_index];
        if matches(cell, search_value, match_type) {
            total_matches += 1;
            if matched_rows.len() < max_results {
                matched_rows.push(table.row_record(row));
            }
        }
    }

    info!(
        total_matches,
        returned = matched_rows.len(),
        "search_excel_data succeeded"
    );

    Ok(json!({
        "file_path": file_path,
        "sheet_name": table.sheet_name,
        "search_info": {
            "column_name": column_name,
            "search_value": search_value,
            "match_type": match match_type {
                MatchType::Exact => "exact",
                MatchType::Contains => "contains",
            },
            "total_matches": total_matches,
            "returned_results": matched_rows.len(),
        },
        "columns": table.columns,
        "matched_rows": matched_rows,
    }))
}

/// Tests one cell against the search value.
fn matches(cell: &Value, needle: &Value, match_type: MatchType) -> bool {
    match match_type {
        MatchType::Exact => values_equal(cell, needle),
        MatchType::Contains => {
            let Value::String(needle_text) = needle else {
                return values_equal(cell, needle);
            };
            cell_text(cell)
                .to_lowercase()
                .contains(&needle_text.to_lowercase())
        }
    }
}

/// Typed equality with numeric cross-type coercion (1 matches 1.0).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(fx), Some(fy)) if (fx - fy).abs() < f64::EPSILON)
        }
        _ => a == b,
    }
}

/// Stringifies a cell for substring matching.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
