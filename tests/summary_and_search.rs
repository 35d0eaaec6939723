//! End-to-end tests for `get_excel_summary` and `search_excel_data`
//! against generated `.xlsx` fixtures.

mod common;

use excel_mcp_server::config::LimitsConfig;
use excel_mcp_server::tools::{ToolContext, ToolRegistry, ToolResponse};
use serde_json::{json, Value};

use common::{multi_sheet_workbook, numbered_workbook, path_str};

fn call(tool: &str, args: Value) -> ToolResponse {
    let registry = ToolRegistry::with_builtin_tools();
    let context = ToolContext::new(Vec::new(), LimitsConfig::default());
    registry
        .call(&context, tool, &args)
        .expect("tool is registered")
}

// ---------------------------------------------------------------------------
// get_excel_summary
// ---------------------------------------------------------------------------

#[test]
fn summary_counts_all_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call("get_excel_summary", json!({"file_path": path_str(&path)}));
    assert!(response.success, "error: {:?}", response.error);
    let data = response.data.unwrap();

    let summary = &data["file_summary"];
    assert_eq!(summary["total_sheets"], 3);
    // People: 3 rows, Scores: 4 rows, Blank: 0 rows
    assert_eq!(summary["total_rows_all_sheets"], 7);

    let details = summary["sheet_details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details[0]["sheet_name"], "People");
    assert_eq!(details[0]["total_rows"], 3);
    assert_eq!(details[0]["total_columns"], 2);
    assert_eq!(details[2]["sheet_name"], "Blank");
    assert_eq!(details[2]["total_rows"], 0);
}

#[test]
fn summary_previews_first_sheet_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call("get_excel_summary", json!({"file_path": path_str(&path)}));
    let data = response.data.unwrap();

    let preview = &data["preview_data"];
    assert_eq!(preview["sheet_name"], "People");
    assert_eq!(preview["columns"], json!(["name", "city"]));
    assert_eq!(preview["preview_rows"], 3);
    assert_eq!(preview["data"][0]["name"], json!("Alice"));

    assert_eq!(data["settings"]["requested_preview_rows"], 10);
    assert_eq!(data["settings"]["actual_preview_sheet"], "People");
    assert_eq!(data["settings"]["target_sheet"], Value::Null);
}

#[test]
fn summary_preview_rows_limits_preview_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = numbered_workbook(&dir, 25);

    let response = call(
        "get_excel_summary",
        json!({"file_path": path_str(&path), "preview_rows": 5}),
    );
    let data = response.data.unwrap();

    assert_eq!(data["preview_data"]["preview_rows"], 5);
    assert_eq!(data["preview_data"]["data"].as_array().unwrap().len(), 5);
    // Full counts are unaffected by the preview limit
    assert_eq!(data["file_summary"]["total_rows_all_sheets"], 25);
}

#[test]
fn summary_unknown_target_falls_back_to_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "get_excel_summary",
        json!({"file_path": path_str(&path), "target_sheet": "Missing"}),
    );
    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data["preview_data"]["sheet_name"], "People");
    assert_eq!(data["settings"]["target_sheet"], "Missing");
    assert_eq!(data["settings"]["actual_preview_sheet"], "People");
}

#[test]
fn summary_known_target_is_previewed() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "get_excel_summary",
        json!({"file_path": path_str(&path), "target_sheet": "Scores"}),
    );
    let data = response.data.unwrap();
    assert_eq!(data["preview_data"]["sheet_name"], "Scores");
    assert_eq!(data["preview_data"]["preview_rows"], 4);
}

#[test]
fn summary_rejects_oversized_preview() {
    let response = call(
        "get_excel_summary",
        json!({"file_path": "book.xlsx", "preview_rows": 50}),
    );
    assert!(!response.success);
    assert!(response.error.unwrap().contains("cannot exceed 20"));
}

// ---------------------------------------------------------------------------
// search_excel_data
// ---------------------------------------------------------------------------

#[test]
fn exact_string_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "city",
            "search_value": "Berlin"
        }),
    );
    assert!(response.success, "error: {:?}", response.error);
    let data = response.data.unwrap();

    assert_eq!(data["sheet_name"], "People");
    assert_eq!(data["search_info"]["total_matches"], 1);
    assert_eq!(data["search_info"]["match_type"], "exact");
    let rows = data["matched_rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], json!("Alice"));
}

#[test]
fn contains_search_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "city",
            "search_value": "berlin",
            "match_type": "contains"
        }),
    );
    let data = response.data.unwrap();
    // Matches both "Berlin" and "berlin"
    assert_eq!(data["search_info"]["total_matches"], 2);
}

#[test]
fn numeric_search_matches_float_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "score",
            "search_value": 10,
            "sheet_name": "Scores"
        }),
    );
    let data = response.data.unwrap();
    assert_eq!(data["search_info"]["total_matches"], 2);
    let rows = data["matched_rows"].as_array().unwrap();
    assert_eq!(rows[0]["player"], json!("a"));
    assert_eq!(rows[1]["player"], json!("c"));
}

#[test]
fn max_results_caps_rows_but_not_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = numbered_workbook(&dir, 30);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "name",
            "search_value": "row",
            "match_type": "contains",
            "max_results": 10
        }),
    );
    let data = response.data.unwrap();
    assert_eq!(data["search_info"]["total_matches"], 30);
    assert_eq!(data["search_info"]["returned_results"], 10);
    assert_eq!(data["matched_rows"].as_array().unwrap().len(), 10);
}

#[test]
fn unknown_column_lists_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "country",
            "search_value": "x"
        }),
    );
    assert!(!response.success);
    let error = response.error.unwrap();
    assert!(error.contains("'country'"));
    assert!(error.contains("name"));
    assert!(error.contains("city"));
}

#[test]
fn no_matches_is_success_with_empty_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = multi_sheet_workbook(&dir);

    let response = call(
        "search_excel_data",
        json!({
            "file_path": path_str(&path),
            "column_name": "city",
            "search_value": "Tokyo"
        }),
    );
    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data["search_info"]["total_matches"], 0);
    assert_eq!(data["matched_rows"], json!([]));
}

#[test]
fn search_missing_file_is_error_envelope() {
    let response = call(
        "search_excel_data",
        json!({
            "file_path": "/nonexistent/book.xlsx",
            "column_name": "a",
            "search_value": 1
        }),
    );
    assert!(!response.success);
    assert!(response.error.unwrap().contains("File not found"));
}
