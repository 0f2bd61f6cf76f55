//! コード照合モジュール
//!
//! - 完全一致: 旧コード → 新コードの順に大文字小文字を無視して照合
//! - あいまい一致: 全キーとの類似度で候補を並べる

use crate::error::{Error, Result};
use crate::mapping::MappingTable;
use crate::similarity;
use crate::types::{FuzzyMatch, MatchKind, MatchResult, EXACT_CONFIDENCE, FUZZY_CONFIDENCE};
use serde::{Deserialize, Serialize};

/// あいまい一致の設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// 最大件数
    pub limit: usize,
    /// 類似度の下限 (0.0-1.0)
    pub cutoff: f64,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            cutoff: 0.6,
        }
    }
}

impl FuzzyOptions {
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::InvalidArgument("fuzzy limit must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(Error::InvalidArgument(format!(
                "fuzzy cutoff must be in [0.0, 1.0], got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

/// 完全一致を探す
///
/// 旧コード側を全行見てから新コード側を見る。複数行が一致した場合は表の先頭側を返す。
pub fn exact(table: &MappingTable, code: &str) -> Option<MatchResult> {
    let key = code.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    if let Some(row) = table.rows().iter().find(|r| r.legacy_key() == key) {
        return Some(MatchResult::from_row(row, MatchKind::Legacy, EXACT_CONFIDENCE));
    }

    table
        .rows()
        .iter()
        .find(|r| r.current_key() == key)
        .map(|row| MatchResult::from_row(row, MatchKind::Current, EXACT_CONFIDENCE))
}

/// あいまい一致の候補を類似度の高い順に返す
///
/// 候補がなければ空のVec（呼び出し側で「見つからない」扱い）。
pub fn fuzzy(table: &MappingTable, code: &str, options: FuzzyOptions) -> Result<Vec<FuzzyMatch>> {
    options.validate()?;

    let key = code.trim().to_lowercase();
    let candidates = table.candidate_keys();
    let close = similarity::close_matches(&key, candidates, options.limit, options.cutoff);

    let matches = close
        .into_iter()
        .filter_map(|(candidate, score)| {
            let row = table.first_row_for_key(candidate)?;
            let (side, matched_code) = if row.legacy_key() == candidate {
                (MatchKind::Legacy, row.legacy_code.clone())
            } else {
                (MatchKind::Current, row.current_code.clone())
            };
            Some(FuzzyMatch {
                matched_code,
                result: MatchResult::from_row(row, side, FUZZY_CONFIDENCE),
                similarity: score,
            })
        })
        .collect();

    Ok(matches)
}

/// 最も近い1件だけを返す（一括処理用）
pub fn best_fuzzy(table: &MappingTable, code: &str, cutoff: f64) -> Result<Option<FuzzyMatch>> {
    let options = FuzzyOptions { limit: 1, cutoff };
    Ok(fuzzy(table, code, options)?.into_iter().next())
}
