//! マッピング表ストア
//!
//! ファイル内容のSHA-256をキーにして構築済みの表を保持し、
//! 内容が変わらない限り再構築をスキップする。

use crate::error::{LookupError, Result};
use crate::source;
use part_lookup_common::MappingTable;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 構築済みの表とその元データの識別情報
#[derive(Debug, Clone)]
struct CachedTable {
    path: PathBuf,
    checksum: String,
    table: Arc<MappingTable>,
}

/// 1度だけ読み込むマッピング表のハンドル
///
/// 呼び出し側が保持して受け渡す。表は読み取り専用で共有する。
#[derive(Debug, Default)]
pub struct MappingStore {
    cached: Option<CachedTable>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表を取得（内容が同じならキャッシュを返す）
    pub fn get(&mut self, path: &Path) -> Result<Arc<MappingTable>> {
        if !path.exists() {
            return Err(LookupError::FileNotFound(path.display().to_string()));
        }

        let checksum = compute_checksum(path)?;

        if let Some(cached) = &self.cached {
            if cached.path == path && cached.checksum == checksum {
                tracing::debug!(path = %path.display(), "mapping cache hit");
                return Ok(Arc::clone(&cached.table));
            }
        }

        let raw = source::read_table(path)?;
        let table = Arc::new(MappingTable::from_raw(&raw)?);
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            checksum = &checksum[..12],
            "mapping table loaded"
        );

        self.cached = Some(CachedTable {
            path: path.to_path_buf(),
            checksum,
            table: Arc::clone(&table),
        });
        Ok(table)
    }

    /// キャッシュを破棄（次回の get で必ず読み直す）
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// 保持している表のチェックサム
    pub fn cached_checksum(&self) -> Option<&str> {
        self.cached.as_ref().map(|c| c.checksum.as_str())
    }
}

/// ファイル内容のSHA-256（16進）
pub fn compute_checksum(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}
