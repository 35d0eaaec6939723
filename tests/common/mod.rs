//! Shared fixture builders for integration tests.
#![allow(dead_code)] // not every test target uses every fixture
//!
//! Real `.xlsx` files are generated with `rust_xlsxwriter` into a
//! per-test temporary directory and read back through the tool handlers.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

/// Creates a workbook with a single sheet `Sheet1`:
/// header `["a", "b"]` and data rows `[[1, 2], [3, 4]]`.
pub fn simple_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("simple.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    sheet.write_string(0, 0, "a").unwrap();
    sheet.write_string(0, 1, "b").unwrap();
    sheet.write_number(1, 0, 1).unwrap();
    sheet.write_number(1, 1, 2).unwrap();
    sheet.write_number(2, 0, 3).unwrap();
    sheet.write_number(2, 1, 4).unwrap();
    workbook.save(&path).unwrap();
    path
}

/// Creates a workbook whose first sheet has `rows` data rows under the
/// header `["n", "name"]`, with `n` counting from 1.
pub fn numbered_workbook(dir: &TempDir, rows: u32) -> PathBuf {
    let path = dir.path().join(format!("numbered_{rows}.xlsx"));
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data").unwrap();
    sheet.write_string(0, 0, "n").unwrap();
    sheet.write_string(0, 1, "name").unwrap();
    for i in 1..=rows {
        sheet.write_number(i, 0, f64::from(i)).unwrap();
        sheet.write_string(i, 1, format!("row{i}")).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

/// Creates a workbook with three sheets:
///
/// - `People`: header `["name", "city"]`, three rows
/// - `Scores`: header `["player", "score"]`, four rows
/// - `Blank`: no cells at all
pub fn multi_sheet_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("multi.xlsx");
    let mut workbook = Workbook::new();

    let people = workbook.add_worksheet();
    people.set_name("People").unwrap();
    people.write_string(0, 0, "name").unwrap();
    people.write_string(0, 1, "city").unwrap();
    for (i, (name, city)) in [
        ("Alice", "Berlin"),
        ("Bob", "Paris"),
        ("Carol", "berlin"),
    ]
    .iter()
    .enumerate()
    {
        let row = u32::try_from(i).unwrap() + 1;
        people.write_string(row, 0, *name).unwrap();
        people.write_string(row, 1, *city).unwrap();
    }

    let scores = workbook.add_worksheet();
    scores.set_name("Scores").unwrap();
    scores.write_string(0, 0, "player").unwrap();
    scores.write_string(0, 1, "score").unwrap();
    for (i, (player, score)) in [("a", 10.0), ("b", 20.5), ("c", 10.0), ("d", 30.0)]
        .iter()
        .enumerate()
    {
        let row = u32::try_from(i).unwrap() + 1;
        scores.write_string(row, 0, *player).unwrap();
        scores.write_number(row, 1, *score).unwrap();
    }

    let blank = workbook.add_worksheet();
    blank.set_name("Blank").unwrap();

    workbook.save(&path).unwrap();
    path
}

/// Creates a workbook with a single sheet `Log`: header `["day", "stamp"]`
/// and one row holding a date-only cell and a date-time cell.
pub fn dated_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("dated.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Log").unwrap();
    sheet.write_string(0, 0, "day").unwrap();
    sheet.write_string(0, 1, "stamp").unwrap();

    let day_format = Format::new().set_num_format("yyyy-mm-dd");
    let stamp_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let day = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
    let stamp = ExcelDateTime::from_ymd(2024, 3, 1)
        .unwrap()
        .and_hms(13, 30, 5)
        .unwrap();
    sheet.write_datetime_with_format(1, 0, &day, &day_format).unwrap();
    sheet
        .write_datetime_with_format(1, 1, &stamp, &stamp_format)
        .unwrap();

    workbook.save(&path).unwrap();
    path
}

/// Path as the string tools expect.
pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
