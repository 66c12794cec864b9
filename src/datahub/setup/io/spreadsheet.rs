use std::ffi::OsStr;
use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::datahub::setup::error::{Result, SetupError};
use crate::datahub::setup::model::{Document, Sheet};

/// Number of leading rows dropped from every workbook sheet before the
/// header row is read. The current spreadsheet template places the header
/// in the first row, so nothing is skipped today.
pub const LEADING_ROWS_SKIPPED: usize = 0;

/// Loads the spreadsheet at `path` into memory, dispatching purely on the
/// filename suffix: `.xlsx`/`.xls` are read as multi-sheet workbooks,
/// `.csv` as comma-separated and `.txt`/`.tsv` as tab-separated tables
/// with the first row as header. Any other suffix is rejected.
pub fn read_document(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" => read_workbook(path),
        "csv" => read_delimited(path, b','),
        "txt" | "tsv" => read_delimited(path, b'\t'),
        _ => Err(SetupError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_workbook(path: &Path) -> Result<Document> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .ok_or_else(|| SetupError::MissingSheet(name.clone()))?
            .map_err(SetupError::from)?;

        let mut rows = range.rows().skip(LEADING_ROWS_SKIPPED);
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(cell_to_string).collect())
            .unwrap_or_default();
        let data: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        sheets.push(Sheet::new(name, headers, data));
    }

    Ok(Document::from_sheets(sheets))
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Document> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("Sheet1")
        .to_string();
    Ok(Document::from_sheets(vec![Sheet::new(name, headers, rows)]))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
