//! 照合結果の型定義
//!
//! CLIと共有される型:
//! - MappingRow: マッピング表の1行（旧コード・新コード・備考）
//! - MatchResult: 1コードの照合結果
//! - FuzzyMatch: あいまい一致の候補
//! - DuplicateSet: 地域別品番の重複候補
//! - BatchRow: 一括処理の出力行

use serde::{Deserialize, Serialize};

/// 完全一致時の信頼度
pub const EXACT_CONFIDENCE: u8 = 100;

/// あいまい一致時の信頼度（固定値）
pub const FUZZY_CONFIDENCE: u8 = 80;

/// マッピング表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    /// 旧コード（備考のみの行は空）
    pub legacy_code: String,
    /// 新コード（必須）
    pub current_code: String,
    /// 備考
    pub note: String,
    #[serde(skip)]
    legacy_key: String,
    #[serde(skip)]
    current_key: String,
}

impl MappingRow {
    pub fn new(
        legacy_code: impl Into<String>,
        current_code: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        let legacy_code = legacy_code.into();
        let current_code = current_code.into();
        Self {
            legacy_key: legacy_code.to_lowercase(),
            current_key: current_code.to_lowercase(),
            legacy_code,
            current_code,
            note: note.into(),
        }
    }

    /// 照合用の小文字化した旧コード
    pub fn legacy_key(&self) -> &str {
        &self.legacy_key
    }

    /// 照合用の小文字化した新コード
    pub fn current_key(&self) -> &str {
        &self.current_key
    }

    /// 入力キー（小文字化済み）が旧・新どちらかに一致するか
    pub fn matches_key(&self, key: &str) -> bool {
        self.legacy_key == key || self.current_key == key
    }
}

/// 一致の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Legacy,
    Current,
    Fuzzy,
    Multiple,
    #[serde(rename = "Not Found")]
    NotFound,
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Legacy => "Legacy",
            MatchKind::Current => "Current",
            MatchKind::Fuzzy => "Fuzzy",
            MatchKind::Multiple => "Multiple",
            MatchKind::NotFound => "Not Found",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 1コードの照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub legacy_code: Option<String>,
    pub current_code: Option<String>,
    pub match_kind: MatchKind,
    /// 0-100
    pub confidence: u8,
    #[serde(default)]
    pub note: String,
}

impl MatchResult {
    /// 行から結果を作成
    pub fn from_row(row: &MappingRow, match_kind: MatchKind, confidence: u8) -> Self {
        Self {
            legacy_code: Some(row.legacy_code.clone()),
            current_code: Some(row.current_code.clone()),
            match_kind,
            confidence,
            note: row.note.clone(),
        }
    }
}

/// あいまい一致の候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyMatch {
    /// 一致した側の表示用コード
    pub matched_code: String,
    /// kindは一致した側（Legacy/Current）
    pub result: MatchResult,
    /// 類似度 (0.0-1.0)
    pub similarity: f64,
}

/// 同一キーに複数行が該当し、地域別品番を含む集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSet {
    pub rows: Vec<MappingRow>,
}

impl DuplicateSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingRow> {
        self.rows.iter()
    }
}

/// 一括処理の出力行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    pub input_code: String,
    pub match_type: MatchKind,
    pub legacy_code: String,
    pub current_code: String,
    /// マッピング表の備考
    pub notes: String,
    pub confidence: u8,
    /// 処理上の注意（重複時のみ）
    pub advisory: String,
}

impl BatchRow {
    /// 出力列（順序固定）
    pub const HEADERS: [&'static str; 7] = [
        "Input Code",
        "Match Type",
        "Legacy Code",
        "Current Code",
        "Notes",
        "Confidence",
        "Note",
    ];

    /// 出力列順のセル値
    pub fn cells(&self) -> [String; 7] {
        [
            self.input_code.clone(),
            self.match_type.label().to_string(),
            self.legacy_code.clone(),
            self.current_code.clone(),
            self.notes.clone(),
            self.confidence.to_string(),
            self.advisory.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_row_keys_are_lowercase() {
        let row = MappingRow::new("AbC-1", "XyZ-9", "");
        assert_eq!(row.legacy_key(), "abc-1");
        assert_eq!(row.current_key(), "xyz-9");
        assert!(row.matches_key("xyz-9"));
        assert!(!row.matches_key("XYZ-9"));
    }

    #[test]
    fn test_match_kind_serializes_label() {
        let json = serde_json::to_string(&MatchKind::NotFound).unwrap();
        assert_eq!(json, "\"Not Found\"");
        assert_eq!(MatchKind::Legacy.to_string(), "Legacy");
    }

    #[test]
    fn test_batch_row_cells_follow_header_order() {
        let row = BatchRow {
            input_code: "a100".into(),
            match_type: MatchKind::Fuzzy,
            legacy_code: "A100".into(),
            current_code: "B200".into(),
            notes: "n".into(),
            confidence: 80,
            advisory: String::new(),
        };
        let cells = row.cells();
        assert_eq!(cells[0], "a100");
        assert_eq!(cells[1], "Fuzzy");
        assert_eq!(cells[5], "80");
        assert_eq!(cells.len(), BatchRow::HEADERS.len());
    }
}
