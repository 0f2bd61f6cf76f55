use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "part-lookup")]
#[command(about = "旧品番 ↔ 新品番 照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// マッピング表（csv/xlsx）。省略時は設定ファイルの値
    #[arg(short, long, global = true)]
    pub mapping: Option<PathBuf>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1コードを照合
    Lookup {
        /// 旧コードまたは新コード
        #[arg(required = true)]
        code: String,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的に照合を繰り返す
    Interactive,

    /// コード一覧ファイルを一括照合
    Batch {
        /// コード列（Code / Part Code / SKU 等）を含むcsv/xlsx
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: lookup_results.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// プレビュー行数
        #[arg(long, default_value = "20")]
        preview_rows: usize,

        /// 画面プレビューを省略
        #[arg(long)]
        no_preview: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のマッピング表を設定
        #[arg(long)]
        set_mapping: Option<PathBuf>,

        /// 地域別品番のプレフィックスを設定
        #[arg(long)]
        set_prefix: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
