//! 表ファイル読み込みモジュール
//!
//! CSVとスプレッドシート（先頭シート）を共通の RawTable に変換する。

use crate::error::{LookupError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use part_lookup_common::RawTable;
use std::path::Path;

const CSV_EXTENSIONS: &[&str] = &["csv"];
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 表ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Spreadsheet,
}

impl SourceKind {
    /// 拡張子から判定（大文字小文字は無視）
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceKind::Csv)
        } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceKind::Spreadsheet)
        } else {
            Err(LookupError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// 表ファイルを読み込む
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(LookupError::FileNotFound(path.display().to_string()));
    }

    let table = match SourceKind::from_path(path)? {
        SourceKind::Csv => {
            let content = std::fs::read_to_string(path)?;
            RawTable::from_csv_str(&content)?
        }
        SourceKind::Spreadsheet => read_spreadsheet(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        "table read"
    );
    Ok(table)
}

fn read_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LookupError::EmptyWorkbook(path.display().to_string()))??;

    let mut records = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers = records.next().unwrap_or_default();
    let rows = records
        .filter(|row| !row.iter().all(|c| c.trim().is_empty()))
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// セル値を文字列化
///
/// 整数値の浮動小数は `.0` を付けない（品番が数値セルで入っている場合）。
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_source_kind_from_extension() {
        assert_eq!(SourceKind::from_path(Path::new("map.CSV")).unwrap(), SourceKind::Csv);
        assert_eq!(SourceKind::from_path(Path::new("map.xlsx")).unwrap(), SourceKind::Spreadsheet);
        assert!(matches!(
            SourceKind::from_path(Path::new("map.json")),
            Err(LookupError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_table(Path::new("/nonexistent/path/mapping.csv"));
        assert!(matches!(result, Err(LookupError::FileNotFound(_))));
    }

    #[test]
    fn test_read_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        std::fs::write(&path, "Code\nA100\nB200\n").unwrap();
        let table = read_table(&path).unwrap();
        assert_eq!(table.headers(), &["Code"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_cell_to_string_numbers() {
        assert_eq!(cell_to_string(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("A-1".into())), "A-1");
    }
}
