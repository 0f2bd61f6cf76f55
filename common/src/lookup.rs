//! 単一コード照合
//!
//! 重複検出 → 完全一致 → あいまい一致 の順に1コードを照合する。

use crate::duplicate::{self, DEFAULT_RESERVED_PREFIX};
use crate::error::Result;
use crate::mapping::MappingTable;
use crate::matcher::{self, FuzzyOptions};
use crate::types::{DuplicateSet, FuzzyMatch, MatchKind, MatchResult};
use serde::{Deserialize, Serialize};

/// 照合設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupOptions {
    /// 地域別品番ファミリーのプレフィックス
    pub reserved_prefix: String,
    /// 単一照合時の候補表示
    pub fuzzy: FuzzyOptions,
    /// 一括処理であいまい一致を採用する下限
    pub batch_cutoff: f64,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
            fuzzy: FuzzyOptions::default(),
            batch_cutoff: 0.6,
        }
    }
}

/// 単一照合の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "camelCase")]
pub enum LookupOutcome {
    /// 地域別の候補が複数ある
    Duplicates(DuplicateSet),
    /// 完全一致
    Exact(MatchResult),
    /// 完全一致なし、近い候補あり
    Suggestions(Vec<FuzzyMatch>),
    /// 該当なし
    NotFound,
}

/// 画面に出す案内の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    ExactLegacy,
    ExactCurrent,
    MultipleRegions,
    Suggestions,
    NoMatch,
}

impl LookupOutcome {
    pub fn banner(&self) -> Banner {
        match self {
            LookupOutcome::Duplicates(_) => Banner::MultipleRegions,
            LookupOutcome::Exact(result) if result.match_kind == MatchKind::Current => Banner::ExactCurrent,
            LookupOutcome::Exact(_) => Banner::ExactLegacy,
            LookupOutcome::Suggestions(_) => Banner::Suggestions,
            LookupOutcome::NotFound => Banner::NoMatch,
        }
    }
}

/// 1コードを照合する
pub fn lookup(table: &MappingTable, code: &str, options: &LookupOptions) -> Result<LookupOutcome> {
    if let Some(set) = duplicate::resolve(table, code, &options.reserved_prefix) {
        return Ok(LookupOutcome::Duplicates(set));
    }

    if let Some(result) = matcher::exact(table, code) {
        return Ok(LookupOutcome::Exact(result));
    }

    let suggestions = matcher::fuzzy(table, code, options.fuzzy)?;
    if suggestions.is_empty() {
        Ok(LookupOutcome::NotFound)
    } else {
        Ok(LookupOutcome::Suggestions(suggestions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MappingRow;

    fn example_table() -> MappingTable {
        MappingTable::from_rows(vec![
            MappingRow::new("A100", "B200", ""),
            MappingRow::new("A100", "MNP-5", ""),
        ])
    }

    #[test]
    fn test_duplicate_takes_precedence() {
        let outcome = lookup(&example_table(), "a100", &LookupOptions::default()).unwrap();
        match outcome {
            LookupOutcome::Duplicates(set) => assert_eq!(set.len(), 2),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_exact_current_lookup() {
        let outcome = lookup(&example_table(), "B200", &LookupOptions::default()).unwrap();
        assert_eq!(outcome.banner(), Banner::ExactCurrent);
        match outcome {
            LookupOutcome::Exact(result) => {
                assert_eq!(result.match_kind, MatchKind::Current);
                assert_eq!(result.confidence, 100);
                assert_eq!(result.legacy_code.as_deref(), Some("A100"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_lookup() {
        let outcome = lookup(&example_table(), "zzz", &LookupOptions::default()).unwrap();
        assert_eq!(outcome, LookupOutcome::NotFound);
        assert_eq!(outcome.banner(), Banner::NoMatch);
    }

    #[test]
    fn test_suggestions_lookup() {
        let outcome = lookup(&example_table(), "B201", &LookupOptions::default()).unwrap();
        assert_eq!(outcome.banner(), Banner::Suggestions);
    }

    #[test]
    fn test_custom_prefix_disables_duplicates() {
        let options = LookupOptions {
            reserved_prefix: "QQQ".into(),
            ..Default::default()
        };
        let outcome = lookup(&example_table(), "a100", &options).unwrap();
        assert_eq!(outcome.banner(), Banner::ExactLegacy);
    }
}
