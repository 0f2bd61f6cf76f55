//! 表形式データモジュール
//!
//! マッピング表・一括処理ファイルを「ヘッダー + 文字列セル」の形で扱う。
//! CSVの読み書きは csv-core で行い、引用符やフィールド内のカンマ・改行も処理する。

use crate::error::{Error, Result};
use csv_core::{ReadFieldResult, WriteResult};

/// ヘッダー付きの表データ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// ヘッダー名は前後の空白を除去して保持する
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// CSV文字列から読み込み（1行目をヘッダーとする）
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records = parse_csv(content)?.into_iter();
        let headers = records.next().unwrap_or_default();
        Ok(Self::new(headers, records.collect()))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名（大文字小文字を区別）から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 列名（大文字小文字を無視）から列番号を取得
    pub fn column_index_ignore_case(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.headers.iter().position(|h| h.to_lowercase() == name)
    }

    /// セル値を取得（列が足りない行は空文字）
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

/// CSV文字列をレコード単位に分割
///
/// 空行は読み飛ばす。
pub fn parse_csv(content: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv_core::Reader::new();
    let mut input = content.as_bytes();
    let mut output = [0u8; 1024];
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = Vec::new();

    loop {
        let (result, nin, nout) = reader.read_field(input, &mut output);
        input = &input[nin..];
        field.extend_from_slice(&output[..nout]);

        match result {
            // 入力が空になったら次の呼び出しでEOFとして確定する
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let text = String::from_utf8(std::mem::take(&mut field))
                    .map_err(|e| Error::Csv(format!("invalid UTF-8 in field: {}", e)))?;
                record.push(text);
                if record_end {
                    let record = std::mem::take(&mut record);
                    if !is_blank_record(&record) {
                        records.push(record);
                    }
                }
            }
            ReadFieldResult::End => break,
        }
    }

    Ok(records)
}

fn is_blank_record(record: &[String]) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

/// ヘッダーと行からCSVバイト列を生成
pub fn write_csv<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> Vec<u8> {
    let mut writer = csv_core::Writer::new();
    let mut buf = Vec::new();

    let header_cells: Vec<&str> = headers.iter().map(|h| h.as_ref()).collect();
    write_record(&mut writer, &mut buf, &header_cells);

    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_record(&mut writer, &mut buf, &cells);
    }

    buf
}

fn write_record(writer: &mut csv_core::Writer, buf: &mut Vec<u8>, cells: &[&str]) {
    let mut output = [0u8; 1024];

    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            let (_, nout) = writer.delimiter(&mut output);
            buf.extend_from_slice(&output[..nout]);
        }

        let mut data = cell.as_bytes();
        loop {
            let (result, nin, nout) = writer.field(data, &mut output);
            buf.extend_from_slice(&output[..nout]);
            data = &data[nin..];
            if result == WriteResult::InputEmpty {
                break;
            }
        }
    }

    let (_, nout) = writer.terminator(&mut output);
    buf.extend_from_slice(&output[..nout]);
}
