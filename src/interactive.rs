//! 対話式照合モジュール
//!
//! コードを1件ずつ入力して結果を表示する。マッピング表はストア経由で共有し、
//! ファイルが更新されていれば次の照合で読み直す。

use crate::error::{LookupError, Result};
use crate::render;
use crate::store::MappingStore;
use dialoguer::Input;
use part_lookup_common::{lookup, LookupOptions};
use std::path::Path;

/// 対話アクション
#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    /// コードを照合
    Lookup(String),
    /// 表を読み直す
    Reload,
    /// 何もしない（空入力）
    Skip,
    /// 終了
    Quit,
}

/// 入力文字列をアクションに変換
pub fn parse_action(input: &str) -> PromptAction {
    match input.trim() {
        "" => PromptAction::Skip,
        ":q" | ":quit" => PromptAction::Quit,
        ":reload" => PromptAction::Reload,
        code => PromptAction::Lookup(code.to_string()),
    }
}

/// 対話式で照合を繰り返す
pub fn run_interactive(store: &mut MappingStore, mapping_path: &Path, options: &LookupOptions) -> Result<()> {
    let table = store.get(mapping_path)?;
    println!("✔ マッピング表: {} ({}行)", mapping_path.display(), table.len());
    println!("---");
    println!("操作: コードを入力して照合 [:reload]表を再読込 [:q]終了");
    println!("---\n");

    loop {
        let input: String = Input::new()
            .with_prompt("コード")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| LookupError::Interactive(e.to_string()))?;

        match parse_action(&input) {
            PromptAction::Skip => continue,
            PromptAction::Quit => {
                println!("終了します");
                break;
            }
            PromptAction::Reload => {
                store.invalidate();
                let table = store.get(mapping_path)?;
                println!("✔ 再読込しました ({}行)\n", table.len());
            }
            PromptAction::Lookup(code) => {
                let table = store.get(mapping_path)?;
                let outcome = lookup(&table, &code, options)?;
                println!("{}", render::format_outcome(&outcome));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("  "), PromptAction::Skip);
        assert_eq!(parse_action(":q"), PromptAction::Quit);
        assert_eq!(parse_action(":reload"), PromptAction::Reload);
        assert_eq!(parse_action(" a100 "), PromptAction::Lookup("a100".to_string()));
    }
}
