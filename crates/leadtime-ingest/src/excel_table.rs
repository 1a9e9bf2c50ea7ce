//! Excel workbook input.
//!
//! The operator's export usually arrives as a workbook. Cells are rendered to
//! text so the rest of ingestion sees the same [`CsvTable`] a CSV file yields.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::csv_table::{CsvTable, assemble_table};
use crate::datetime::from_excel_serial;
use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;

/// Sheet read when the workbook has it; otherwise the first sheet is used.
pub const PREFERRED_SHEET: &str = "Prueba";

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` should be read as a workbook rather than CSV.
pub fn is_excel_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXCEL_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

pub fn pick_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| name.as_str() == PREFERRED_SHEET)
        .or_else(|| names.first())
        .map(String::as_str)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            text.trim().to_string()
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_numeric(*value),
        Data::Bool(value) => if *value { "SI" } else { "NO" }.to_string(),
        Data::DateTime(value) => {
            let serial = value.as_f64();
            from_excel_serial(serial).map_or_else(
                || format_numeric(serial),
                |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            )
        }
    }
}

/// Read the shipment sheet of a workbook.
pub fn read_excel_table(path: &Path) -> Result<CsvTable> {
    let excel_error = |message: String| IngestError::ExcelRead {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| excel_error(e.to_string()))?;
    let names = workbook.sheet_names();
    let Some(sheet) = pick_sheet(&names).map(str::to_string) else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| excel_error(format!("sheet '{sheet}': {e}")))?;
    let raw_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(String::is_empty))
        .collect();
    debug!(sheet = %sheet, rows = raw_rows.len(), "workbook sheet read");
    assemble_table(raw_rows, b',').ok_or_else(|| IngestError::EmptyWorkbook {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_workbook_extensions() {
        assert!(is_excel_path(Path::new("envios.xlsx")));
        assert!(is_excel_path(Path::new("/data/ENVIOS.XLS")));
        assert!(!is_excel_path(Path::new("envios.csv")));
        assert!(!is_excel_path(Path::new("envios")));
    }

    #[test]
    fn prefers_named_sheet_then_first() {
        let names = vec!["Resumen".to_string(), "Prueba".to_string()];
        assert_eq!(pick_sheet(&names), Some("Prueba"));
        let names = vec!["Hoja1".to_string(), "Hoja2".to_string()];
        assert_eq!(pick_sheet(&names), Some("Hoja1"));
        assert_eq!(pick_sheet(&[]), None);
    }

    #[test]
    fn renders_cells_as_text() {
        assert_eq!(cell_text(&Data::Float(1.0)), "1");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::String(" Entregada ".to_string())), "Entregada");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
