use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw text table: one header line followed by data rows, all cells trimmed.
///
/// Excel sheets are read into the same shape; their `delimiter` is unused.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Convert to a DataFrame of string columns, in header order.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let values: Vec<String> = self
                .rows
                .iter()
                .map(|row| row.get(idx).cloned().unwrap_or_default())
                .collect();
            columns.push(Series::new(header.as_str().into(), values).into_column());
        }
        Ok(DataFrame::new(columns)?)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim()
        .trim_matches('\u{feff}')
        .to_string()
}

/// Headers must be unique to become DataFrame columns; blanks and repeats get
/// a positional suffix.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Pick `;` when the header line has more semicolons than commas.
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes
        .split(|b| *b == b'\n')
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or(&[]);
    let commas = first_line.iter().filter(|b| **b == b',').count();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    if semicolons > commas { b';' } else { b',' }
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv_bytes(&bytes, path)
}

/// Parse an in-memory CSV; `path` is only used in error messages.
pub fn parse_csv_bytes(bytes: &[u8], path: &Path) -> Result<CsvTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let delimiter = sniff_delimiter(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        let more = reader
            .read_byte_record(&mut record)
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if !more {
            break;
        }
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    assemble_table(raw_rows, delimiter).ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })
}

/// First non-blank row becomes the header; data rows are padded to its width.
///
/// `None` when there is no header row at all.
pub(crate) fn assemble_table(raw_rows: Vec<Vec<String>>, delimiter: u8) -> Option<CsvTable> {
    let mut rows = raw_rows.into_iter();
    let header_row = rows.next()?;
    let headers = dedupe_headers(header_row.iter().map(|h| normalize_header(h)).collect());
    let width = headers.len();
    let rows = rows
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();
    Some(CsvTable {
        headers,
        rows,
        delimiter,
    })
}
