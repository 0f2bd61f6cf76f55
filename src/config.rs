use crate::error::{LookupError, Result};
use part_lookup_common::duplicate::DEFAULT_RESERVED_PREFIX;
use part_lookup_common::{FuzzyOptions, LookupOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定のマッピング表
pub const DEFAULT_MAPPING_FILE: &str = "mapping.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mapping_path: PathBuf,
    pub reserved_prefix: String,
    pub fuzzy_limit: usize,
    pub fuzzy_cutoff: f64,
    pub batch_cutoff: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapping_path: PathBuf::from(DEFAULT_MAPPING_FILE),
            reserved_prefix: DEFAULT_RESERVED_PREFIX.into(),
            fuzzy_limit: 5,
            fuzzy_cutoff: 0.6,
            batch_cutoff: 0.6,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（なければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("part-lookup").join("config.json"))
    }

    /// 照合設定に変換（値の範囲も検証）
    pub fn lookup_options(&self) -> Result<LookupOptions> {
        if self.reserved_prefix.trim().is_empty() {
            return Err(LookupError::Config("reserved_prefix が空です".into()));
        }

        let options = LookupOptions {
            reserved_prefix: self.reserved_prefix.trim().to_string(),
            fuzzy: FuzzyOptions {
                limit: self.fuzzy_limit,
                cutoff: self.fuzzy_cutoff,
            },
            batch_cutoff: self.batch_cutoff,
        };
        options.fuzzy.validate()?;
        FuzzyOptions { limit: 1, cutoff: options.batch_cutoff }.validate()?;
        Ok(options)
    }

    /// CLI指定があればそちらを優先
    pub fn resolve_mapping_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.mapping_path.clone())
    }

    pub fn set_mapping_path(&mut self, path: PathBuf) -> Result<()> {
        self.mapping_path = path;
        self.save()
    }

    pub fn set_reserved_prefix(&mut self, prefix: String) -> Result<()> {
        self.reserved_prefix = prefix;
        self.save()
    }
}
