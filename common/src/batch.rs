//! 一括照合モジュール
//!
//! アップロードされたコード一覧を1件ずつ照合し、出力用の行にまとめる。
//! 1件の照合失敗で残りの処理を止めない。

use crate::duplicate;
use crate::error::{Error, Result};
use crate::lookup::LookupOptions;
use crate::mapping::MappingTable;
use crate::matcher;
use crate::table::{self, RawTable};
use crate::types::{BatchRow, MatchKind, EXACT_CONFIDENCE};
use std::collections::BTreeMap;

/// コード列として認識する列名（大文字小文字は無視）
pub const CODE_COLUMN_SYNONYMS: &[&str] = &[
    "Code",
    "Part Code",
    "Part Number",
    "Part No",
    "SKU",
    "Order Code",
    "Item Code",
    "Product Code",
];

/// 重複時の注意書き
pub const MULTIPLE_ADVISORY: &str = "multiple returned, use region specific";

/// コード列を探す
///
/// 見つからなければ実際の列名一覧を添えて `ColumnMissing` を返す。
pub fn find_code_column(raw: &RawTable) -> Result<usize> {
    CODE_COLUMN_SYNONYMS
        .iter()
        .find_map(|name| raw.column_index_ignore_case(name))
        .ok_or_else(|| Error::ColumnMissing {
            available: raw.headers().to_vec(),
        })
}

/// アップロード表からコード一覧を取り出す
pub fn extract_codes(raw: &RawTable) -> Result<Vec<String>> {
    let idx = find_code_column(raw)?;
    Ok(raw
        .rows()
        .iter()
        .map(|row| RawTable::cell(row, idx).trim().to_string())
        .collect())
}

/// 1コード分の出力行を作る
///
/// 重複集合があれば構成行ごとに1行、なければ完全一致 → 最良のあいまい一致 → 該当なし。
pub fn process_code(table: &MappingTable, code: &str, options: &LookupOptions) -> Result<Vec<BatchRow>> {
    let code = code.trim();

    if let Some(set) = duplicate::resolve(table, code, &options.reserved_prefix) {
        return Ok(set
            .iter()
            .map(|row| BatchRow {
                input_code: code.to_string(),
                match_type: MatchKind::Multiple,
                legacy_code: row.legacy_code.clone(),
                current_code: row.current_code.clone(),
                notes: row.note.clone(),
                confidence: EXACT_CONFIDENCE,
                advisory: MULTIPLE_ADVISORY.to_string(),
            })
            .collect());
    }

    if let Some(result) = matcher::exact(table, code) {
        return Ok(vec![BatchRow {
            input_code: code.to_string(),
            match_type: result.match_kind,
            legacy_code: result.legacy_code.unwrap_or_default(),
            current_code: result.current_code.unwrap_or_default(),
            notes: result.note,
            confidence: result.confidence,
            advisory: String::new(),
        }]);
    }

    if let Some(best) = matcher::best_fuzzy(table, code, options.batch_cutoff)? {
        return Ok(vec![BatchRow {
            input_code: code.to_string(),
            match_type: MatchKind::Fuzzy,
            legacy_code: best.result.legacy_code.unwrap_or_default(),
            current_code: best.result.current_code.unwrap_or_default(),
            notes: best.result.note,
            confidence: best.result.confidence,
            advisory: String::new(),
        }]);
    }

    Ok(vec![not_found_row(code)])
}

fn not_found_row(code: &str) -> BatchRow {
    BatchRow {
        input_code: code.to_string(),
        match_type: MatchKind::NotFound,
        legacy_code: String::new(),
        current_code: String::new(),
        notes: String::new(),
        confidence: 0,
        advisory: String::new(),
    }
}

/// コード一覧を順に照合する
///
/// 出力は入力順。重複集合は元の入力の位置に連続して並ぶ。
pub fn process_codes<S: AsRef<str>>(
    table: &MappingTable,
    codes: &[S],
    options: &LookupOptions,
) -> Result<Vec<BatchRow>> {
    process_codes_with(table, codes, options, |_| {})
}

/// `process_codes` と同じ。1コード処理するごとに `on_code` を呼ぶ（進捗表示用）
pub fn process_codes_with<S, F>(
    table: &MappingTable,
    codes: &[S],
    options: &LookupOptions,
    mut on_code: F,
) -> Result<Vec<BatchRow>>
where
    S: AsRef<str>,
    F: FnMut(&str),
{
    matcher::FuzzyOptions {
        limit: 1,
        cutoff: options.batch_cutoff,
    }
    .validate()?;

    let mut rows = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.as_ref();
        match process_code(table, code, options) {
            Ok(mut code_rows) => rows.append(&mut code_rows),
            Err(e) => {
                tracing::warn!(code, error = %e, "lookup failed, reporting as not found");
                rows.push(not_found_row(code.trim()));
            }
        }
        on_code(code);
    }
    Ok(rows)
}

/// アップロード表をそのまま処理する
pub fn process_table(table: &MappingTable, upload: &RawTable, options: &LookupOptions) -> Result<Vec<BatchRow>> {
    let codes = extract_codes(upload)?;
    process_codes(table, &codes, options)
}

/// 出力行をCSVバイト列に変換
pub fn to_csv(rows: &[BatchRow]) -> Vec<u8> {
    let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells().to_vec()).collect();
    table::write_csv(&BatchRow::HEADERS, &cells)
}

/// 一致種別ごとの件数
pub fn summarize(rows: &[BatchRow]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.match_type.label()).or_insert(0) += 1;
    }
    counts
}
