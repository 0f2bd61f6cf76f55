//! 重複候補の検出
//!
//! 1つの旧コードが地域別の新コード群に分かれている場合、先頭行を黙って返さず
//! 利用者に地域を選ばせるため、該当行をまとめて返す。

use crate::mapping::MappingTable;
use crate::types::{DuplicateSet, MappingRow};

/// 地域別品番ファミリーの既定プレフィックス
pub const DEFAULT_RESERVED_PREFIX: &str = "MNP";

/// 入力コードに該当する行が複数あり、地域別品番を含むときだけ集合を返す
///
/// 行は表の順で、(旧コード, 新コード, 備考) が同じものは1つにまとめる。
pub fn resolve(table: &MappingTable, code: &str, reserved_prefix: &str) -> Option<DuplicateSet> {
    let key = code.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    let hits: Vec<&MappingRow> = table.rows().iter().filter(|r| r.matches_key(&key)).collect();
    if hits.len() < 2 {
        return None;
    }

    let prefix = reserved_prefix.to_uppercase();
    let has_family = hits
        .iter()
        .any(|r| r.current_code.to_uppercase().starts_with(&prefix));
    if !has_family {
        return None;
    }

    let mut rows: Vec<MappingRow> = Vec::with_capacity(hits.len());
    for row in hits {
        let seen = rows.iter().any(|r| {
            r.legacy_code == row.legacy_code && r.current_code == row.current_code && r.note == row.note
        });
        if !seen {
            rows.push(row.clone());
        }
    }

    tracing::debug!(code, rows = rows.len(), "region specific duplicates");
    Some(DuplicateSet { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str, &str)]) -> MappingTable {
        MappingTable::from_rows(rows.iter().map(|(l, c, n)| MappingRow::new(*l, *c, *n)).collect())
    }

    #[test]
    fn test_resolve_returns_set_with_reserved_prefix() {
        let t = table(&[("A100", "B200", ""), ("A100", "MNP-5", "")]);
        let set = resolve(&t, "a100", DEFAULT_RESERVED_PREFIX).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0].current_code, "B200");
        assert_eq!(set.rows[1].current_code, "MNP-5");
    }

    #[test]
    fn test_resolve_prefix_is_case_insensitive() {
        let t = table(&[("A100", "mnp-eu", ""), ("A100", "mnp-us", "")]);
        assert!(resolve(&t, "A100", "MNP").is_some());
        assert!(resolve(&t, "A100", "mnp").is_some());
    }

    #[test]
    fn test_resolve_single_row_is_none() {
        let t = table(&[("A100", "MNP-5", ""), ("A200", "B200", "")]);
        assert!(resolve(&t, "a100", DEFAULT_RESERVED_PREFIX).is_none());
    }

    #[test]
    fn test_resolve_without_prefix_is_none() {
        let t = table(&[("A100", "B200", ""), ("A100", "B201", "")]);
        assert!(resolve(&t, "a100", DEFAULT_RESERVED_PREFIX).is_none());
    }

    #[test]
    fn test_resolve_matches_current_side_too() {
        let t = table(&[("A100", "MNP-5", ""), ("A200", "mnp-5", "")]);
        let set = resolve(&t, "MNP-5", DEFAULT_RESERVED_PREFIX).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_resolve_deduplicates_identical_rows() {
        let t = table(&[
            ("A100", "MNP-5", ""),
            ("A100", "MNP-5", ""),
            ("A100", "MNP-6", "EU"),
        ]);
        let set = resolve(&t, "a100", DEFAULT_RESERVED_PREFIX).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_resolve_empty_input_is_none() {
        let t = table(&[("", "MNP-5", "Note: a"), ("", "MNP-6", "Note: b")]);
        assert!(resolve(&t, "", DEFAULT_RESERVED_PREFIX).is_none());
    }
}
