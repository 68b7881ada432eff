//! PDFタイトルリネーマー - 1ページ目のタイトルでPDFをリネームするツール
//!
//! # 機能
//! - 1ページ目の単語レイアウト（フォントサイズ・位置）からタイトル候補を抽出
//! - ヘッダー領域・ページ番号の除外
//! - 中国語・日本語・韓国語と英語の混在テキストの連結
//! - タイトルに基づくファイル名生成と一括リネーム

pub mod batch;
pub mod config;
pub mod error;
pub mod pdf;
pub mod rename;
pub mod title;

pub use config::ExtractorConfig;
pub use error::{ExtractionError, RenameError};
pub use pdf::{PageLayout, PageSource, PlumberSource, Token};
pub use rename::process_filename;
pub use title::{TitleCandidate, TitleExtractor};
