//! 一括照合結果の出力（CSV / Excel）

use crate::cli::ExportFormat;
use crate::error::{LookupError, Result};
use part_lookup_common::batch;
use part_lookup_common::export::excel_core;
use part_lookup_common::BatchRow;
use std::path::{Path, PathBuf};

/// 既定の出力ファイル名（拡張子なし）
pub const DEFAULT_STEM: &str = "lookup_results";

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let csv_path = output.join(format!("{}.csv", stem));
        let excel_path = output.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        let csv_path = parent.join(format!("{}.csv", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    }
}

/// 照合結果をファイルに書き出し、書き出したパスを返す
pub fn export_rows(rows: &[BatchRow], format: &ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let written = match format {
        ExportFormat::Csv => {
            let path = output_path_for_format(output, DEFAULT_STEM, "csv");
            write_csv(rows, &path)?;
            vec![path]
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, DEFAULT_STEM, "xlsx");
            write_excel(rows, &path)?;
            vec![path]
        }
        ExportFormat::Both => {
            let (csv_path, excel_path) = output_paths_for_both(output, DEFAULT_STEM);
            write_csv(rows, &csv_path)?;
            write_excel(rows, &excel_path)?;
            vec![csv_path, excel_path]
        }
    };

    Ok(written)
}

fn write_csv(rows: &[BatchRow], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, batch::to_csv(rows))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(())
}

fn write_excel(rows: &[BatchRow], path: &Path) -> Result<()> {
    let buffer = excel_core::generate_results_excel_buffer(rows).map_err(LookupError::ExcelGeneration)?;
    ensure_parent(path)?;
    std::fs::write(path, buffer)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "xlsx written");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
