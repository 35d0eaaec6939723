//! The `read_excel_file` tool: structured read of one sheet.
//!
//! Reads a workbook, resolves the requested sheet (first sheet by default),
//! and returns the header columns plus up to `max_rows` data rows as records.
//! Row and column totals are computed from the full sheet before truncation,
//! and `truncated` reports whether rows were dropped.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::tools::{ToolContext, ToolDefinition, ToolResponse};
use crate::workbook::{Workbook, WorkbookResult};

/// Returns the `tools/list` definition for this tool.
pub(crate) fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "read_excel_file".to_string(),
        description: Some(
            "Read an Excel file (.xlsx or .xls) and return its contents as structured \
             data: column names from the header row and one record per data row. \
             Returns the sheet's full row/column counts, the list of available sheets, \
             and whether the returned records were truncated. Date and time cells are \
             returned as ISO-8601 strings (YYYY-MM-DDTHH:MM:SS)."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the Excel file (.xlsx or .xls)"
                },
                "sheet_name": {
                    "type": "string",
                    "description": "Optional: sheet to read. Defaults to the first sheet"
                },
                "max_rows": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Optional: maximum number of data rows to return (default: 1000)"
                }
            },
            "required": ["file_path"]
        }),
    }
}

/// Handles a `read_excel_file` call.
pub(crate) fn handler(context: &ToolContext, arguments: &Value) -> ToolResponse {
    let Some(file_path) = arguments.get("file_path").and_then(Value::as_str) else {
        return ToolResponse::err("Missing required parameter: file_path");
    };
    let sheet_name = arguments.get("sheet_name").and_then(Value::as_str);

    let max_rows = match arguments.get("max_rows") {
        None | Some(Value::Null) => context.limits.default_max_rows,
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => {
                return ToolResponse::err(format!(
                    "max_rows must be a positive integer, got: {value}"
                ));
            }
        },
    };

    info!(file_path, ?sheet_name, max_rows, "read_excel_file called");

    if let Err(message) = context.validate_path(file_path) {
        warn!(file_path, "path rejected");
        return ToolResponse::err(message);
    }

    match read(file_path, sheet_name, max_rows) {
        Ok(data) => ToolResponse::ok(data),
        Err(e) => {
            warn!(file_path, error = %e, "read_excel_file failed");
            ToolResponse::err(e.to_string())
        }
    }
}

/// Reads the sheet and builds the result payload.
fn read(file_path: &str, sheet_name: Option<&str>, max_rows: usize) -> WorkbookResult<Value> {
    let mut workbook = Workbook::open(Path::new(file_path))?;
    let available_sheets = workbook.sheet_names().to_vec();

    let table = workbook.read_sheet(sheet_name)?;
    let total_rows = table.total_rows();
    let records = table.records(max_rows);

    info!(
        sheet = %table.sheet_name,
        total_rows,
        returned = records.len(),
        "read_excel_file succeeded"
    );

    Ok(json!({
        "file_path": file_path,
        "current_sheet": table.sheet_name,
        "available_sheets": available_sheets,
        "total_rows": total_rows,
        "total_columns": table.total_columns(),
        "columns": table.columns,
        "records": records,
        "max_rows_limit": max_rows,
        "truncated": total_rows > max_rows,
    }))
}
