//! エラー定義

use std::path::PathBuf;
use thiserror::Error;

use crate::title::TitleCandidate;

/// タイトル抽出の失敗理由
///
/// 各エラーは [`ExtractionError::sentinel`] でフォントサイズ `0.0` の
/// 代替候補に変換できる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// PDFの読み込み・単語抽出に失敗
    #[error("processing error: {0}")]
    Processing(String),
    /// ページが存在しない
    #[error("PDF file has no pages")]
    NoPages,
    /// 1ページ目に単語が無い
    #[error("no title could be recognized")]
    NoText,
    /// ヘッダー・ノイズ除外後に単語が残らない
    #[error("no suitable title found")]
    NoSuitableTitle,
}

impl ExtractionError {
    /// 画面表示用の代替候補
    pub fn sentinel(&self) -> TitleCandidate {
        TitleCandidate::new(self.to_string(), 0.0)
    }
}

/// リネーム処理のエラー
#[derive(Debug, Error)]
pub enum RenameError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイル名を取得できません: {}", .0.display())]
    MissingFileName(PathBuf),
}

impl RenameError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_carries_message_and_zero_size() {
        let candidate = ExtractionError::Processing("broken xref".to_string()).sentinel();
        assert_eq!(candidate.text, "processing error: broken xref");
        assert_eq!(candidate.font_size, 0.0);
    }

    #[test]
    fn sentinel_messages_are_distinct() {
        let messages = [
            ExtractionError::NoPages.sentinel().text,
            ExtractionError::NoText.sentinel().text,
            ExtractionError::NoSuitableTitle.sentinel().text,
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
