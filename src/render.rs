//! 表示モジュール
//!
//! 照合結果を端末向けの文字列にする（案内・コード表示・表）。

use part_lookup_common::{Banner, BatchRow, DuplicateSet, FuzzyMatch, LookupOutcome, MatchResult};
use std::collections::BTreeMap;

/// 案内文
pub fn banner_text(outcome: &LookupOutcome) -> String {
    match (outcome.banner(), outcome) {
        (Banner::ExactLegacy, LookupOutcome::Exact(r)) | (Banner::ExactCurrent, LookupOutcome::Exact(r)) => {
            format!("✔ 一致: {} コード (信頼度 {}%)", r.match_kind, r.confidence)
        }
        (Banner::MultipleRegions, LookupOutcome::Duplicates(set)) => format!(
            "⚠ 複数の新コードに該当しました ({}件)。地域別のコードを選んでください",
            set.len()
        ),
        (Banner::Suggestions, _) => "⚠ 完全一致なし。近い候補:".to_string(),
        _ => "✖ 類似するコードも見つかりません".to_string(),
    }
}

/// 単一照合の結果全体
pub fn format_outcome(outcome: &LookupOutcome) -> String {
    let mut out = banner_text(outcome);
    out.push('\n');

    match outcome {
        LookupOutcome::Exact(result) => out.push_str(&format_exact(result)),
        LookupOutcome::Duplicates(set) => out.push_str(&format_duplicates(set)),
        LookupOutcome::Suggestions(matches) => out.push_str(&format_suggestions(matches)),
        LookupOutcome::NotFound => {}
    }

    out
}

fn format_exact(result: &MatchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("  旧コード: `{}`\n", result.legacy_code.as_deref().unwrap_or("")));
    out.push_str(&format!("  新コード: `{}`\n", result.current_code.as_deref().unwrap_or("")));
    if !result.note.is_empty() {
        out.push_str(&format!("  備考: {}\n", result.note));
    }
    out
}

fn format_duplicates(set: &DuplicateSet) -> String {
    let rows: Vec<Vec<String>> = set
        .iter()
        .map(|r| vec![r.legacy_code.clone(), r.current_code.clone(), r.note.clone()])
        .collect();
    format_table(&["Legacy Code", "Current Code", "Notes"], &rows)
}

fn format_suggestions(matches: &[FuzzyMatch]) -> String {
    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|m| {
            vec![
                m.matched_code.clone(),
                m.result.legacy_code.clone().unwrap_or_default(),
                m.result.current_code.clone().unwrap_or_default(),
                m.result.match_kind.to_string(),
                format!("{:.2}", m.similarity),
            ]
        })
        .collect();
    format_table(
        &["Matched Code", "Legacy Code", "Current Code", "Match Type", "Similarity"],
        &rows,
    )
}

/// 一括照合のプレビュー（先頭 `max_rows` 行）
pub fn format_batch_preview(rows: &[BatchRow], max_rows: usize) -> String {
    let cells: Vec<Vec<String>> = rows.iter().take(max_rows).map(|r| r.cells().to_vec()).collect();
    let mut out = format_table(&BatchRow::HEADERS, &cells);
    if rows.len() > max_rows {
        out.push_str(&format!("  ... 他 {} 行\n", rows.len() - max_rows));
    }
    out
}

/// 一致種別ごとの件数
pub fn format_summary(counts: &BTreeMap<&'static str, usize>) -> String {
    counts
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// 列幅を揃えた簡易表
pub fn format_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        format!("  {}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.as_ref()).collect());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("-+-")));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}
