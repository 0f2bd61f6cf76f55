//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// マッピング表に必須列がない（セッション全体で致命的）
    #[error("Mapping table is missing required columns: {} (available: {})", missing.join(", "), available.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// 一括処理ファイルにコード列がない（一括処理のみ中断）
    #[error("No code column found (available columns: {})", available.join(", "))]
    ColumnMissing { available: Vec<String> },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_columns() {
        let error = Error::MissingColumns {
            missing: vec!["New Code".to_string()],
            available: vec!["Legacy Code".to_string(), "Notes".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Mapping table is missing required columns: New Code (available: Legacy Code, Notes)"
        );
    }

    #[test]
    fn test_error_display_column_missing() {
        let error = Error::ColumnMissing {
            available: vec!["Qty".to_string(), "Description".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "No code column found (available columns: Qty, Description)"
        );
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let error = Error::InvalidArgument("fuzzy limit must be > 0".to_string());
        assert_eq!(error.to_string(), "Invalid argument: fuzzy limit must be > 0");
    }
}
