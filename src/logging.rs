//! ログ初期化
//!
//! 利用者向けの進捗は標準出力、診断ログは tracing で標準エラーへ出す。

use tracing::Level;

/// `--verbose` の有無から出力レベルを決める
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// グローバルのsubscriberを設定（main で1度だけ呼ぶ）
pub fn init(verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("ログ初期化に失敗: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), Level::DEBUG);
        assert_eq!(level_for(false), Level::WARN);
    }
}
