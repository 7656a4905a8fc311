//! Raw table readers.
//!
//! Every input table becomes a list of header → trimmed cell text records.
//! Fully blank rows are skipped. Typed parsing happens in the loader.
//!
//! | Source | Layout |
//! |--------|--------|
//! | `.xlsx` / `.xls` / `.ods` | one sheet per table, named after the table |
//! | directory | one `<table>.csv` per table |

use calamine::{open_workbook_auto, Data, DataType, Range, Reader, Sheets};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{RosterError, RosterResult};

/// One table row keyed by header.
pub type RawRecord = HashMap<String, String>;

/// A source of named input tables.
pub trait TableSource {
    /// Reads table `name`.
    fn read_table(&mut self, name: &str) -> RosterResult<Vec<RawRecord>>;

    /// Whether table `name` exists.
    fn has_table(&self, name: &str) -> bool;
}

/// Reads tables from `<dir>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    /// Opens a directory of CSV files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl TableSource for CsvDirectory {
    fn read_table(&mut self, name: &str) -> RosterResult<Vec<RawRecord>> {
        let path = self.table_path(name);
        if !path.exists() {
            return Err(RosterError::MissingTable(name.to_string()));
        }
        parse_csv(&path)
    }

    fn has_table(&self, name: &str) -> bool {
        self.table_path(name).exists()
    }
}

/// Parses one CSV file with a header row.
pub fn parse_csv(path: &Path) -> RosterResult<Vec<RawRecord>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();

        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row);
    }
    Ok(records)
}

/// Reads tables from the sheets of a workbook.
pub struct ExcelWorkbook {
    workbook: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl ExcelWorkbook {
    /// Opens a workbook; the format is picked from the extension.
    pub fn open(path: &Path) -> RosterResult<Self> {
        let workbook = open_workbook_auto(path).map_err(|e| RosterError::Excel(e.to_string()))?;
        let sheet_names = workbook.sheet_names();
        Ok(Self {
            workbook,
            sheet_names,
        })
    }
}

impl TableSource for ExcelWorkbook {
    fn read_table(&mut self, name: &str) -> RosterResult<Vec<RawRecord>> {
        if !self.has_table(name) {
            return Err(RosterError::MissingTable(name.to_string()));
        }
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| RosterError::Excel(e.to_string()))?;
        Ok(range_to_records(&range))
    }

    fn has_table(&self, name: &str) -> bool {
        self.sheet_names.iter().any(|s| s == name)
    }
}

fn range_to_records(range: &Range<Data>) -> Vec<RawRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(|c| cell_text(c).trim().to_string()).collect();

    let mut records = Vec::new();
    for data_row in rows {
        let row: RawRecord = headers
            .iter()
            .zip(data_row.iter())
            .map(|(h, cell)| (h.clone(), cell_text(cell).trim().to_string()))
            .collect();

        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row);
    }
    records
}

/// Cell text; date cells are rendered as ISO dates.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) => cell
            .as_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Opens a workbook or a CSV directory, depending on `path`.
pub fn open_source(path: &Path) -> RosterResult<Box<dyn TableSource>> {
    if path.is_dir() {
        return Ok(Box::new(CsvDirectory::new(path)));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => {
            if !path.exists() {
                return Err(RosterError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )));
            }
            Ok(Box::new(ExcelWorkbook::open(path)?))
        }
        _ => Err(RosterError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, lines: &[&str]) {
        let mut f = File::create(dir.join(name)).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
    }

    #[test]
    fn test_csv_trims_and_skips_blank_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "nurses.csv", &["nurse_id , night_ok", " A ,Y", ",", "B,N"]);

        let mut source = CsvDirectory::new(dir.path());
        assert!(source.has_table("nurses"));
        let records = source.read_table("nurses").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("nurse_id"), Some(&"A".to_string()));
        assert_eq!(records[1].get("night_ok"), Some(&"N".to_string()));
    }

    #[test]
    fn test_csv_short_rows_allowed() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "requests.csv", &["nurse_id,date,request_type,shift", "A,2025-01-01,OFF_REQUEST"]);

        let records = CsvDirectory::new(dir.path()).read_table("requests").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].get("shift").is_none());
    }

    #[test]
    fn test_missing_csv_table() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvDirectory::new(dir.path()).read_table("calendar").unwrap_err();
        assert!(matches!(err, RosterError::MissingTable(ref t) if t == "calendar"));
    }

    #[test]
    fn test_open_source_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_source(dir.path()).is_ok());

        let txt = dir.path().join("input.txt");
        File::create(&txt).unwrap();
        assert!(matches!(open_source(&txt), Err(RosterError::UnsupportedFormat(_))));

        assert!(open_source(&dir.path().join("missing.xlsx")).is_err());
    }

    #[test]
    fn test_excel_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("N".into())), "N");
        assert_eq!(cell_text(&Data::Int(3)), "3");
    }

    fn sheet(rows: &[Vec<Data>]) -> Range<Data> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn test_excel_sheet_rows() {
        // 45663 is the serial for 2025-01-06
        let date = Data::DateTime(ExcelDateTime::new(45663.0, ExcelDateTimeType::DateTime, false));
        let range = sheet(&[
            vec![
                Data::String("nurse_id".into()),
                Data::String(" date ".into()),
                Data::String("required".into()),
                Data::String("is_weekend".into()),
            ],
            vec![Data::Float(101.0), date, Data::Float(2.0), Data::Bool(false)],
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![Data::String(" B ".into()), Data::String("2025-01-07".into()), Data::Int(1), Data::Empty],
        ]);

        let records = range_to_records(&range);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.get("nurse_id").map(String::as_str), Some("101"));
        assert_eq!(first.get("date").map(String::as_str), Some("2025-01-06"));
        assert_eq!(first.get("required").map(String::as_str), Some("2"));
        assert_eq!(first.get("is_weekend").map(String::as_str), Some("false"));

        let second = &records[1];
        assert_eq!(second.get("nurse_id").map(String::as_str), Some("B"));
        assert_eq!(second.get("required").map(String::as_str), Some("1"));
        assert_eq!(second.get("is_weekend").map(String::as_str), Some(""));
    }

    #[test]
    fn test_excel_empty_sheet() {
        assert!(range_to_records(&Range::<Data>::empty()).is_empty());

        let header_only = sheet(&[vec![Data::String("nurse_id".into())]]);
        assert!(range_to_records(&header_only).is_empty());
    }
}
