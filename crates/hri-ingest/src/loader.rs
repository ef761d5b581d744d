//! File loading: extension dispatch, CSV parsing, workbook reading.
//!
//! Both paths produce the same shape: a header row of column names followed
//! by string cells, which are then run through per-column coercion.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::info;

use hri_model::{Cell, Column, LoadError, Table};

use crate::coerce::coerce_table;
use crate::decode::decode_text;

/// Cell values treated as missing at parse time.
const MISSING_SENTINELS: [&str; 5] = ["", "NA", "N/A", "null", "NULL"];

/// Supported input kinds, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Csv,
    Workbook,
}

/// Descriptive metadata about a loaded file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub size_bytes: u64,
    pub kind: FileKind,
    /// Encoding that accepted the bytes (CSV only).
    pub encoding: Option<String>,
    /// Sheet names (workbooks only); only the first sheet is consumed.
    pub sheet_names: Vec<String>,
}

/// A loaded, coerced table together with its file metadata.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub table: Table,
    pub info: FileInfo,
}

/// Determine the input kind from the file extension.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedExtension`] for anything that is not
/// `.csv`, `.xlsx` or `.xls`.
pub fn detect_kind(path: &Path) -> Result<FileKind, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(FileKind::Csv),
        "xlsx" | "xls" => Ok(FileKind::Workbook),
        _ => Err(LoadError::UnsupportedExtension { extension }),
    }
}

/// Load a tabular file and coerce its columns.
pub fn load_file(path: &Path) -> Result<LoadedFile, LoadError> {
    match detect_kind(path)? {
        FileKind::Csv => load_csv(path),
        FileKind::Workbook => load_workbook(path),
    }
}

fn load_csv(path: &Path) -> Result<LoadedFile, LoadError> {
    let bytes = fs::read(path)?;
    let (text, encoding) = decode_text(&bytes)?;
    let mut table = parse_csv_text(&text)?;
    coerce_table(&mut table);
    info!(
        path = %path.display(),
        encoding,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded csv file"
    );
    Ok(LoadedFile {
        table,
        info: FileInfo {
            filename: file_name(path),
            size_bytes: bytes.len() as u64,
            kind: FileKind::Csv,
            encoding: Some(encoding.to_string()),
            sheet_names: Vec::new(),
        },
    })
}

/// Parse decoded CSV text into an uncoerced table.
pub fn parse_csv_text(text: &str) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| LoadError::Parse(error.to_string()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let Some((header_row, data_rows)) = raw_rows.split_first() else {
        return Err(LoadError::Parse("file contains no rows".to_string()));
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    table_from_rows(headers, data_rows)
}

fn load_workbook(path: &Path) -> Result<LoadedFile, LoadError> {
    let size_bytes = fs::metadata(path)?.len();
    let mut workbook =
        open_workbook_auto(path).map_err(|error| LoadError::Parse(error.to_string()))?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| LoadError::Parse("workbook has no sheets".to_string()))?
        .clone();
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|error| LoadError::Parse(error.to_string()))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for row in range.rows() {
        let rendered: Vec<String> = row.iter().map(render_workbook_cell).collect();
        if rendered.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(rendered);
    }
    let Some((header_row, data_rows)) = raw_rows.split_first() else {
        return Err(LoadError::Parse("first sheet contains no rows".to_string()));
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let mut table = table_from_rows(headers, data_rows)?;
    coerce_table(&mut table);
    info!(
        path = %path.display(),
        sheet = %first_sheet,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded workbook"
    );
    Ok(LoadedFile {
        table,
        info: FileInfo {
            filename: file_name(path),
            size_bytes,
            kind: FileKind::Workbook,
            encoding: None,
            sheet_names,
        },
    })
}

fn render_workbook_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                datetime.date().format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Error(error) => format!("{error:?}"),
    }
}

/// Build a column-major table from a header row and data rows.
///
/// Short rows are padded with missing cells, long rows truncated to the
/// header width. Duplicate header names get a numeric suffix so the table's
/// unique-name invariant holds.
fn table_from_rows(headers: Vec<String>, rows: &[Vec<String>]) -> Result<Table, LoadError> {
    let headers = dedupe_headers(headers);
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
        .collect();
    for row in rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            let raw = row.get(idx).map(String::as_str).unwrap_or("");
            column.cells.push(parse_cell(raw));
        }
    }
    Table::from_columns(columns)
}

fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if MISSING_SENTINELS.contains(&trimmed) {
        Cell::Missing
    } else {
        Cell::Text(trimmed.to_string())
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    headers
        .into_iter()
        .map(|name| {
            let name = if name.is_empty() {
                "Unnamed".to_string()
            } else {
                name
            };
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                name
            } else {
                format!("{name}.{}", *count - 1)
            }
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
