use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use part_lookup::{cli, config, error, export, interactive, logging, render, source, store};
use part_lookup_common::{batch, lookup};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::PathBuf;
use store::MappingStore;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let mapping_path = config.resolve_mapping_path(cli.mapping.as_deref());
    let mut store = MappingStore::new();

    match cli.command {
        Commands::Lookup { code, json } => {
            let options = config.lookup_options()?;
            let table = store.get(&mapping_path)?;
            let outcome = lookup(&table, code.trim(), &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("🔍 {}\n", code.trim());
                println!("{}", render::format_outcome(&outcome));
            }
        }

        Commands::Interactive => {
            println!("🔁 part-lookup - 旧品番 ↔ 新品番 照合\n");
            let options = config.lookup_options()?;
            interactive::run_interactive(&mut store, &mapping_path, &options)?;
        }

        Commands::Batch { input, output, format, preview_rows, no_preview } => {
            println!("📄 part-lookup - 一括照合\n");
            let options = config.lookup_options()?;

            // 1. マッピング表
            println!("[1/3] マッピング表を読み込み中...");
            let table = store.get(&mapping_path)?;
            println!("✔ {}行を読み込み\n", table.len());

            // 2. 照合
            println!("[2/3] 照合中...");
            let upload = source::read_table(&input)?;
            let codes = batch::extract_codes(&upload)?;

            let progress = ProgressBar::new(codes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  {bar:40} {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let rows = batch::process_codes_with(&table, &codes, &options, |_| progress.inc(1))?;
            progress.finish_and_clear();
            println!("✔ {}件を照合 ({})\n", codes.len(), render::format_summary(&batch::summarize(&rows)));

            if !no_preview {
                println!("{}", render::format_batch_preview(&rows, preview_rows));
            }

            // 3. 出力
            println!("[3/3] 結果を保存中... (形式: {})", format);
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            for path in export::export_rows(&rows, &format, &output)? {
                println!("✔ 出力: {}", path.display());
            }

            println!("\n✅ 一括照合完了");
        }

        Commands::Config { set_mapping, set_prefix, show } => {
            let mut config = config;

            if let Some(path) = set_mapping {
                config.set_mapping_path(path)?;
                println!("✔ マッピング表を設定しました");
            }

            if let Some(prefix) = set_prefix {
                config.set_reserved_prefix(prefix)?;
                println!("✔ プレフィックスを設定しました");
            }

            if show {
                println!("設定:");
                println!("  マッピング表: {}", config.mapping_path.display());
                println!("  地域別プレフィックス: {}", config.reserved_prefix);
                println!("  候補数: {}", config.fuzzy_limit);
                println!("  類似度下限: {}", config.fuzzy_cutoff);
                println!("  一括照合の類似度下限: {}", config.batch_cutoff);
            }
        }
    }

    Ok(())
}
