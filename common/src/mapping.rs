//! マッピング表モジュール
//!
//! 旧コード・新コード・備考の表を読み込み、正規化して照合用の行集合を作る。
//! 構築後の表は不変で、元データが変わったときだけ作り直す。

use crate::error::{Error, Result};
use crate::table::RawTable;
use crate::types::MappingRow;

/// 旧コード列
pub const LEGACY_COLUMN: &str = "Legacy Code";
/// 新コード列
pub const CURRENT_COLUMN: &str = "New Code";
/// 備考列（任意）
pub const NOTES_COLUMN: &str = "Notes";

/// 旧コード欄に書かれた備考の目印（小文字化後に判定）
const NOTE_MARKER: &str = "note:";

/// 正規化済みのマッピング表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    rows: Vec<MappingRow>,
}

impl MappingTable {
    /// 表データから構築
    ///
    /// 1. 列名の前後空白を除去（RawTable側で実施済み）
    /// 2. 旧・新コードを文字列として取得、備考列がなければ空
    /// 3. 旧コード欄が `note:` で始まる行は備考へ移し旧コードを空にする
    /// 4. 照合キーを小文字化して作成
    /// 5. 新コードが空の行は除外
    pub fn from_raw(raw: &RawTable) -> Result<Self> {
        let legacy_idx = raw.column_index(LEGACY_COLUMN);
        let current_idx = raw.column_index(CURRENT_COLUMN);

        let (legacy_idx, current_idx) = match (legacy_idx, current_idx) {
            (Some(l), Some(c)) => (l, c),
            _ => {
                let missing = [(LEGACY_COLUMN, legacy_idx), (CURRENT_COLUMN, current_idx)]
                    .iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                return Err(Error::MissingColumns {
                    missing,
                    available: raw.headers().to_vec(),
                });
            }
        };
        let notes_idx = raw.column_index(NOTES_COLUMN);

        let mut rows = Vec::with_capacity(raw.len());
        let mut dropped = 0usize;

        for record in raw.rows() {
            let legacy = RawTable::cell(record, legacy_idx).trim();
            let current = RawTable::cell(record, current_idx).trim();
            let note = notes_idx
                .map(|idx| RawTable::cell(record, idx).trim())
                .unwrap_or("");

            if current.is_empty() {
                dropped += 1;
                continue;
            }

            let (legacy, note) = split_note_marker(legacy, note);
            rows.push(MappingRow::new(legacy, current, note));
        }

        tracing::debug!(rows = rows.len(), dropped, "mapping table built");

        Ok(Self { rows })
    }

    /// CSV文字列から構築
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_raw(&RawTable::from_csv_str(content)?)
    }

    /// 行から直接構築（テスト・組み込み用）
    pub fn from_rows(rows: Vec<MappingRow>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|r| !r.current_code.is_empty())
            .collect();
        Self { rows }
    }

    /// 全行（表の順序）
    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// あいまい一致の候補キー
    ///
    /// 旧コードキー（表の順）→ 新コードキー（表の順）の順で、重複と空文字を除く。
    pub fn candidate_keys(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|r| r.legacy_key())
            .chain(self.rows.iter().map(|r| r.current_key()))
            .filter(|k| !k.is_empty() && seen.insert(*k))
            .collect()
    }

    /// キー（小文字化済み）に一致する最初の行
    pub fn first_row_for_key(&self, key: &str) -> Option<&MappingRow> {
        self.rows.iter().find(|r| r.matches_key(key))
    }
}

/// 旧コード欄の備考を分離する
///
/// 戻り値は (旧コード, 備考)。備考欄が既に埋まっていれば上書きしない。
fn split_note_marker(legacy: &str, note: &str) -> (String, String) {
    if legacy.to_lowercase().starts_with(NOTE_MARKER) {
        let note = if note.is_empty() { legacy } else { note };
        (String::new(), note.to_string())
    } else {
        (legacy.to_string(), note.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic_table() {
        let table = MappingTable::from_csv_str("Legacy Code,New Code,Notes\nA100,B200,\nA101,B201,check\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].note, "check");
        assert_eq!(table.rows()[0].legacy_key(), "a100");
    }

    #[test]
    fn test_missing_notes_column_defaults_to_empty() {
        let table = MappingTable::from_csv_str("Legacy Code,New Code\nA100,B200\n").unwrap();
        assert_eq!(table.rows()[0].note, "");
    }

    #[test]
    fn test_header_whitespace_is_ignored() {
        let table = MappingTable::from_csv_str("  Legacy Code  ,New Code \nA100,B200\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_required_columns() {
        let err = MappingTable::from_csv_str("Old,New Code\nA,B\n").unwrap_err();
        match err {
            Error::MissingColumns { missing, available } => {
                assert_eq!(missing, vec!["Legacy Code".to_string()]);
                assert_eq!(available, vec!["Old".to_string(), "New Code".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let err = MappingTable::from_csv_str("legacy code,new code\nA,B\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumns { ref missing, .. } if missing.len() == 2));
    }

    #[test]
    fn test_note_marker_moves_to_note() {
        let table = MappingTable::from_csv_str(
            "Legacy Code,New Code,Notes\nNote: superseded by X,X1,\n  NOTE: keep,X2,existing\n",
        )
        .unwrap();
        assert_eq!(table.rows()[0].legacy_code, "");
        assert_eq!(table.rows()[0].note, "Note: superseded by X");
        assert_eq!(table.rows()[1].legacy_code, "");
        assert_eq!(table.rows()[1].note, "existing");
    }

    #[test]
    fn test_rows_without_current_code_are_dropped() {
        let table = MappingTable::from_csv_str("Legacy Code,New Code\nA100,\n,B300\nA102,B302\n").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| !r.current_code.is_empty()));
        assert_eq!(table.rows()[0].legacy_code, "");
    }

    #[test]
    fn test_candidate_keys_order_and_dedup() {
        let table = MappingTable::from_rows(vec![
            MappingRow::new("A1", "B1", ""),
            MappingRow::new("", "B2", ""),
            MappingRow::new("a1", "B1", ""),
        ]);
        assert_eq!(table.candidate_keys(), vec!["a1", "b1", "b2"]);
    }

    #[test]
    fn test_from_csv_is_deterministic() {
        let content = "Legacy Code,New Code,Notes\nA100,B200,x\nA101,B201,\n";
        assert_eq!(
            MappingTable::from_csv_str(content).unwrap(),
            MappingTable::from_csv_str(content).unwrap()
        );
    }
}
