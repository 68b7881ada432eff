//! PDF処理モジュール - 1ページ目の単語レイアウト抽出

use anyhow::{Context, Result};
use pdfplumber::{Pdf, Word, WordOptions};
use std::path::Path;

/// 位置とフォント情報を持つ単語
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// テキスト
    pub text: String,
    /// フォントサイズ（ポイント）
    pub font_size: f64,
    /// ページ上端からの距離
    pub top: f64,
    /// ページ左端からの距離
    pub left: f64,
    /// フォント名
    pub font_name: String,
}

impl Token {
    pub fn new(text: impl Into<String>, font_size: f64, top: f64, left: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            top,
            left,
            font_name: String::new(),
        }
    }

    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }
}

/// 1ページ目のレイアウト（座標は左上原点、ページ高さと同じ単位）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub height: f64,
    pub tokens: Vec<Token>,
}

/// 単語レイアウトの取得元
///
/// 呼び出しごとに新しい `PageLayout` を返すこと。複数スレッドから
/// 同時に呼ばれるため、共有の可変バッファを持たないこと。
pub trait PageSource: Send + Sync {
    /// 1ページ目のレイアウトを返す。ページが無い場合は `Ok(None)`
    fn first_page(&self, path: &Path) -> Result<Option<PageLayout>>;
}

/// pdfplumber による単語抽出
#[derive(Debug, Clone)]
pub struct PlumberSource {
    x_tolerance: f64,
    y_tolerance: f64,
}

impl Default for PlumberSource {
    fn default() -> Self {
        // 同じ行・段落の文字をまとめやすいよう広めの許容差
        Self {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
        }
    }
}

impl PlumberSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn word_options(&self) -> WordOptions {
        WordOptions {
            x_tolerance: self.x_tolerance,
            y_tolerance: self.y_tolerance,
            keep_blank_chars: true,
            use_text_flow: true,
            ..WordOptions::default()
        }
    }
}

impl PageSource for PlumberSource {
    fn first_page(&self, path: &Path) -> Result<Option<PageLayout>> {
        let pdf = Pdf::open_file(path, None)
            .with_context(|| format!("PDFを開けません: {}", path.display()))?;

        if pdf.page_count() == 0 {
            return Ok(None);
        }

        let page = pdf.page(0).context("1ページ目の解析に失敗")?;
        let tokens: Vec<Token> = page
            .extract_words(&self.word_options())
            .into_iter()
            .filter_map(token_from_word)
            .collect();

        tracing::debug!(path = %path.display(), words = tokens.len(), "1ページ目の単語を抽出");

        Ok(Some(PageLayout {
            height: page.height(),
            tokens,
        }))
    }
}

/// 単語のフォント属性は先頭文字のものを使う（文字を持たない単語は除外）
fn token_from_word(word: Word) -> Option<Token> {
    let Some(first) = word.chars.first() else {
        tracing::debug!(text = %word.text, "文字情報の無い単語をスキップ");
        return None;
    };

    let token = Token::new(word.text, first.size, word.bbox.top, word.bbox.x0);
    Some(token.with_font_name(first.fontname.clone()))
}
