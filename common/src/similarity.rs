//! 文字列類似度モジュール
//!
//! 最長一致ブロック（Ratcliff/Obershelp）に基づく類似度。
//! 編集距離ではなく `2 * 一致文字数 / (両文字列の長さ合計)` で 0.0-1.0 を返す。

use std::collections::{HashMap, HashSet};

/// 第2系列がこの長さ以上のとき、出現頻度の高い文字を索引から外す
const AUTOJUNK_MIN_LEN: usize = 200;

/// 2系列の最長一致ブロックを求める照合器
///
/// `b` 側に索引を張るので、同じ入力に多数の候補を当てるときは
/// 入力を `b` にして使い回す。
pub struct SequenceMatcher {
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > ntest)
                .map(|(&c, _)| c)
                .collect();
            for c in popular {
                b2j.remove(&c);
            }
        }

        Self { b, b2j }
    }

    /// `a` との類似度
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let total = a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches = self.matching_characters(&a);
        2.0 * matches as f64 / total as f64
    }

    /// 一致ブロックの長さの合計
    fn matching_characters(&self, a: &[char]) -> usize {
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        let mut total = 0;

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    /// `a[alo..ahi]` と `b[blo..bhi]` の最長一致 (i, j, 長さ)
    ///
    /// 同じ長さなら `a` 側で最も早く始まるもの、その中で `b` 側で最も早いものを返す。
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(c) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 };
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // 索引から外した頻出文字の分を前後に伸ばす
        while besti > alo && bestj > blo && a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }
}

/// 2文字列の類似度 (0.0-1.0)
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}

/// 候補の中から `word` に近いものを類似度の高い順に最大 `limit` 件返す
///
/// `cutoff` 未満は除外する。同じ類似度の候補は文字列の降順に並べる。
pub fn close_matches<'a, I>(word: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = SequenceMatcher::new(word);
    let mut scored: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .map(|candidate| (candidate, matcher.ratio(candidate)))
        .filter(|(_, score)| *score >= cutoff)
        .collect();

    scored.sort_by(|x, y| y.1.total_cmp(&x.1).then_with(|| y.0.cmp(x.0)));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert!(approx(ratio("abc", "abc"), 1.0));
        assert!(approx(ratio("abc", "xyz"), 0.0));
        assert!(approx(ratio("", ""), 1.0));
        assert!(approx(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_ratio_known_values() {
        // "abcd" / "bcde": 一致 "bcd" = 3 → 6/8
        assert!(approx(ratio("abcd", "bcde"), 0.75));
        // "a100" / "a101": 一致 "a10" = 3 → 6/8
        assert!(approx(ratio("a100", "a101"), 0.75));
        // "apple" / "ape": "ap" + "e" = 3 → 6/8
        assert!(approx(ratio("apple", "ape"), 0.75));
    }

    #[test]
    fn test_ratio_counts_blocks_on_both_sides() {
        // "xab-cdy" / "ab_cd": "ab" + "cd" = 4 → 8/12
        assert!(approx(ratio("xab-cdy", "ab_cd"), 8.0 / 12.0));
    }

    #[test]
    fn test_close_matches_order_and_cutoff() {
        let candidates = ["apple", "ape", "peach", "puppy"];
        let matches = close_matches("appel", candidates.iter().copied(), 3, 0.6);
        let names: Vec<&str> = matches.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, vec!["apple", "ape"]);
        assert!(matches.iter().all(|(_, s)| *s >= 0.6));
    }

    #[test]
    fn test_close_matches_ties_prefer_larger_string() {
        let candidates = ["ab1", "ab2"];
        let matches = close_matches("ab", candidates.iter().copied(), 2, 0.5);
        let names: Vec<&str> = matches.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, vec!["ab2", "ab1"]);
    }

    #[test]
    fn test_close_matches_limit() {
        let candidates = ["code1", "code2", "code3", "code4"];
        let matches = close_matches("code", candidates.iter().copied(), 2, 0.0);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_long_sequences_use_popular_heuristic() {
        let long = "a".repeat(250);
        // 頻出文字は索引から外れても前後の伸長で一致が数えられる
        let r = ratio(&long, &long);
        assert!(r > 0.0);
    }
}
