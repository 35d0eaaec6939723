//! The `get_excel_summary` tool: workbook overview with a small preview.
//!
//! Reports per-sheet row/column counts for every sheet in the workbook plus
//! the first few rows of one sheet. A sheet that fails to load is reported
//! inline in `sheet_details` rather than failing the whole call, and an
//! unknown `target_sheet` falls back to the first sheet instead of erroring.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::tools::{ToolContext, ToolDefinition, ToolResponse};
use crate::workbook::{Workbook, WorkbookResult};

/// Default number of preview rows when the caller omits `preview_rows`.
const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Returns the `tools/list` definition for this tool.
pub(crate) fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_excel_summary".to_string(),
        description: Some(
            "Get an overview of an Excel file: sheet count, per-sheet row and column \
             counts, and a preview of the first rows of one sheet. Use this before \
             read_excel_file to orient on unfamiliar workbooks without reading bulk data."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the Excel file (.xlsx or .xls)"
                },
                "target_sheet": {
                    "type": "string",
                    "description": "Optional: sheet to preview. Defaults to the first sheet"
                },
                "preview_rows": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Optional: number of preview rows (default: 10, maximum: 20)"
                }
            },
            "required": ["file_path"]
        }),
    }
}

/// Handles a `get_excel_summary` call.
pub(crate) fn handler(context: &ToolContext, arguments: &Value) -> ToolResponse {
    let Some(file_path) = arguments.get("file_path").and_then(Value::as_str) else {
        return ToolResponse::err("Missing required parameter: file_path");
    };
    let target_sheet = arguments.get("target_sheet").and_then(Value::as_str);

    let preview_rows = match arguments.get("preview_rows") {
        None | Some(Value::Null) => DEFAULT_PREVIEW_ROWS,
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => {
                return ToolResponse::err(format!(
                    "preview_rows must be a positive integer, got: {value}"
                ));
            }
        },
    };
    if preview_rows > context.limits.max_preview_rows {
        return ToolResponse::err(format!(
            "preview_rows cannot exceed {}, got: {preview_rows}",
            context.limits.max_preview_rows
        ));
    }

    info!(file_path, ?target_sheet, preview_rows, "get_excel_summary called");

    if let Err(message) = context.validate_path(file_path) {
        warn!(file_path, "path rejected");
        return ToolResponse::err(message);
    }

    match summarise(file_path, target_sheet, preview_rows) {
        Ok(data) => ToolResponse::ok(data),
        Err(e) => {
            warn!(file_path, error = %e, "get_excel_summary failed");
            ToolResponse::err(e.to_string())
        }
    }
}

/// Builds the summary payload.
fn summarise(
    file_path: &str,
    target_sheet: Option<&str>,
    preview_rows: usize,
) -> WorkbookResult<Value> {
    let mut workbook = Workbook::open(Path::new(file_path))?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut sheet_details = Vec::with_capacity(sheet_names.len());
    let mut total_rows_all_sheets = 0usize;

    for name in &sheet_names {
        match workbook.read_sheet(Some(name)) {
            Ok(table) => {
                total_rows_all_sheets += table.total_rows();
                sheet_details.push(json!({
                    "sheet_name": name,
                    "total_rows": table.total_rows(),
                    "total_columns": table.total_columns(),
                }));
            }
            Err(e) => {
                warn!(sheet = %name, error = %e, "could not analyse sheet");
                sheet_details.push(json!({
                    "sheet_name": name,
                    "total_rows": 0,
                    "total_columns": 0,
                    "error": format!("Could not analyse sheet: {e}"),
                }));
            }
        }
    }

    // Unknown target sheets fall back to the first sheet rather than failing
    let preview_sheet = match target_sheet {
        Some(requested) if sheet_names.iter().any(|s| s == requested) => requested.to_string(),
        Some(requested) => {
            warn!(
                requested,
                fallback = %sheet_names[0],
                "target sheet not found, previewing first sheet"
            );
            sheet_names[0].clone()
        }
        None => sheet_names[0].clone(),
    };

    let preview_data = match workbook.read_sheet(Some(&preview_sheet)) {
        Ok(table) => {
            let records = table.records(preview_rows);
            json!({
                "sheet_name": preview_sheet,
                "columns": table.columns,
                "preview_rows": records.len(),
                "data": records,
            })
        }
        Err(e) => {
            warn!(sheet = %preview_sheet, error = %e, "could not generate preview");
            json!({
                "sheet_name": preview_sheet,
                "columns": [],
                "preview_rows": 0,
                "data": [],
                "error": format!("Could not generate preview: {e}"),
            })
        }
    };

    info!(
        total_sheets = sheet_names.len(),
        total_rows_all_sheets,
        "get_excel_summary succeeded"
    );

    Ok(json!({
        "file_path": file_path,
        "file_summary": {
            "total_sheets": sheet_names.len(),
            "total_rows_all_sheets": total_rows_all_sheets,
            "sheet_details": sheet_details,
        },
        "preview_data": preview_data,
        "settings": {
            "requested_preview_rows": preview_rows,
            "target_sheet": target_sheet,
            "actual_preview_sheet": preview_data["sheet_name"],
        },
    }))
}
