//! タイトル抽出モジュール - フォントサイズと配置からタイトル候補を推定

mod cluster;
mod filter;
mod join;
mod lines;
mod rank;

pub use cluster::{FontCluster, largest_font_cluster};
pub use filter::filter_tokens;
pub use join::{is_western_char, join_tokens};
pub use lines::group_lines;
pub use rank::rank_candidates;

use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::pdf::{PageLayout, PageSource, PlumberSource, Token};
use crate::rename::sanitize;

/// タイトル候補
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleCandidate {
    pub text: String,
    pub font_size: f64,
}

impl TitleCandidate {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// タイトル抽出器
///
/// 保持するのは不変の設定と単語の取得元だけなので、`Arc` で共有して
/// 複数スレッドから同時に使える。
#[derive(Debug, Clone)]
pub struct TitleExtractor<S = PlumberSource> {
    source: S,
    config: ExtractorConfig,
}

impl TitleExtractor<PlumberSource> {
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_source(PlumberSource::new(), config)
    }
}

impl Default for TitleExtractor<PlumberSource> {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl<S: PageSource> TitleExtractor<S> {
    pub fn with_source(source: S, config: ExtractorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// PDFの1ページ目からタイトル候補を抽出
    pub fn extract(&self, path: &Path) -> Result<Vec<TitleCandidate>, ExtractionError> {
        // 解析ライブラリのパニックもエラーとして扱う
        let layout = panic::catch_unwind(AssertUnwindSafe(|| self.source.first_page(path)))
            .map_err(|_| ExtractionError::Processing("PDF解析中にパニックが発生".to_string()))?
            .map_err(|e| ExtractionError::Processing(format!("{e:#}")))?
            .ok_or(ExtractionError::NoPages)?;

        let result = candidates_from_layout(&layout, &self.config);
        match &result {
            Ok(candidates) => {
                tracing::debug!(path = %path.display(), count = candidates.len(), "タイトル候補を抽出");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "タイトルを抽出できません");
            }
        }
        result
    }

    /// 失敗時も代替候補を返す（常に1件以上）
    pub fn candidates(&self, path: &Path) -> Vec<TitleCandidate> {
        self.extract(path).unwrap_or_else(|e| vec![e.sentinel()])
    }

    /// タイトルと元のファイル名から新しいファイル名を生成
    pub fn process_filename(&self, title: &str, original_filename: &str) -> String {
        sanitize::process_filename_with_limit(
            title,
            original_filename,
            self.config.max_title_length,
        )
    }
}

/// レイアウトからタイトル候補を抽出（入出力なし）
pub fn candidates_from_layout(
    layout: &PageLayout,
    config: &ExtractorConfig,
) -> Result<Vec<TitleCandidate>, ExtractionError> {
    if layout.tokens.is_empty() {
        return Err(ExtractionError::NoText);
    }

    let filtered = filter_tokens(&layout.tokens, layout.height, config);
    if filtered.is_empty() {
        return Err(ExtractionError::NoSuitableTitle);
    }

    Ok(rank_candidates(&filtered, config))
}

/// 読み順（上→左）で並べ替え
pub(crate) fn sort_reading_order(tokens: &mut [Token]) {
    tokens.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));
}
