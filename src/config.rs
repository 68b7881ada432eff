//! 抽出しきい値の設定
//!
//! 既定値 → 設定ファイル(JSON) → 環境変数 の順に上書きする。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 環境変数名
const ENV_HEADER_FRACTION: &str = "PDF_TITLE_HEADER_FRACTION";
const ENV_MIN_LENGTH: &str = "PDF_TITLE_MIN_LENGTH";
const ENV_FONT_TOLERANCE: &str = "PDF_TITLE_FONT_TOLERANCE";
const ENV_LINE_TOLERANCE: &str = "PDF_TITLE_LINE_TOLERANCE";
const ENV_MAX_LENGTH: &str = "PDF_TITLE_MAX_LENGTH";

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイルを読み込めません: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("設定ファイルの形式が不正です: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{key} の値が不正です: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} は {expected} である必要があります")]
    OutOfRange {
        key: &'static str,
        expected: &'static str,
    },
}

/// タイトル抽出のしきい値
///
/// 抽出処理はこの値を読むだけで、呼び出し間で状態を持たない。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// ページ上部をヘッダーとみなす割合
    pub header_fraction: f64,
    /// タイトル候補とする最小文字数
    pub min_title_length: usize,
    /// 最大フォントと同じ大きさとみなす差（ポイント）
    pub font_size_tolerance: f64,
    /// 同じ行とみなす縦位置の差
    pub line_tolerance: f64,
    /// ファイル名に使うタイトルの最大文字数
    pub max_title_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            header_fraction: 0.08,
            min_title_length: 2,
            font_size_tolerance: 0.5,
            line_tolerance: 5.0,
            max_title_length: 100,
        }
    }
}

impl ExtractorConfig {
    /// 設定ファイル（任意）と環境変数から設定を構築
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// JSON設定ファイルを読み込む（未指定の項目は既定値）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()
    }

    /// 環境変数相当の値で上書き
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_HEADER_FRACTION) {
            self.header_fraction = parse_value(ENV_HEADER_FRACTION, &value)?;
        }
        if let Some(value) = lookup(ENV_MIN_LENGTH) {
            self.min_title_length = parse_value(ENV_MIN_LENGTH, &value)?;
        }
        if let Some(value) = lookup(ENV_FONT_TOLERANCE) {
            self.font_size_tolerance = parse_value(ENV_FONT_TOLERANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_LINE_TOLERANCE) {
            self.line_tolerance = parse_value(ENV_LINE_TOLERANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_LENGTH) {
            self.max_title_length = parse_value(ENV_MAX_LENGTH, &value)?;
        }
        self.validate()
    }

    /// 値の範囲チェック
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&self.header_fraction) {
            return Err(ConfigError::OutOfRange {
                key: "header_fraction",
                expected: "0以上1未満",
            });
        }
        if self.min_title_length == 0 {
            return Err(ConfigError::OutOfRange {
                key: "min_title_length",
                expected: "1以上",
            });
        }
        if !self.font_size_tolerance.is_finite() || self.font_size_tolerance < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "font_size_tolerance",
                expected: "0以上の有限値",
            });
        }
        if !self.line_tolerance.is_finite() || self.line_tolerance < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "line_tolerance",
                expected: "0以上の有限値",
            });
        }
        if self.max_title_length == 0 {
            return Err(ConfigError::OutOfRange {
                key: "max_title_length",
                expected: "1以上",
            });
        }
        Ok(self)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = ExtractorConfig::default();
        assert_eq!(config.header_fraction, 0.08);
        assert_eq!(config.min_title_length, 2);
        assert_eq!(config.font_size_tolerance, 0.5);
        assert_eq!(config.line_tolerance, 5.0);
        assert_eq!(config.max_title_length, 100);
    }

    #[test]
    fn overrides_replace_only_given_keys() {
        let config = ExtractorConfig::default()
            .with_overrides(lookup(&[
                ("PDF_TITLE_HEADER_FRACTION", "0.1"),
                ("PDF_TITLE_MAX_LENGTH", " 60 "),
            ]))
            .unwrap();
        assert_eq!(config.header_fraction, 0.1);
        assert_eq!(config.max_title_length, 60);
        assert_eq!(config.min_title_length, 2);
    }

    #[test]
    fn unparsable_override_is_rejected() {
        let err = ExtractorConfig::default()
            .with_overrides(lookup(&[("PDF_TITLE_MIN_LENGTH", "two")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "PDF_TITLE_MIN_LENGTH",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = ExtractorConfig::default()
            .with_overrides(lookup(&[("PDF_TITLE_HEADER_FRACTION", "1.5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "header_fraction", .. }));

        let err = ExtractorConfig::default()
            .with_overrides(lookup(&[("PDF_TITLE_FONT_TOLERANCE", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "font_size_tolerance", .. }));
    }

    #[test]
    fn zero_min_length_is_rejected() {
        let err = ExtractorConfig::default()
            .with_overrides(lookup(&[("PDF_TITLE_MIN_LENGTH", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "min_title_length", .. }));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "min_title_length": 0 }"#).unwrap();
        assert!(ExtractorConfig::from_file(&path).is_err());
    }

    #[test]
    fn partial_json_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "line_tolerance": 3.0 }"#).unwrap();

        let config = ExtractorConfig::from_file(&path).unwrap();
        assert_eq!(config.line_tolerance, 3.0);
        assert_eq!(config.header_fraction, 0.08);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ExtractorConfig::from_file(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.json"));
    }
}
