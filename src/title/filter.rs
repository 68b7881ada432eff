//! ヘッダー・ノイズ除外

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ExtractorConfig;
use crate::pdf::Token;

/// ページ番号（数字のみ）
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}+$").expect("valid page number pattern"));

/// ヘッダー領域・ページ番号・短すぎる単語を除外
pub fn filter_tokens(tokens: &[Token], page_height: f64, config: &ExtractorConfig) -> Vec<Token> {
    let header_height = page_height * config.header_fraction;

    tokens
        .iter()
        .filter(|token| {
            let text = token.text.trim();
            token.top >= header_height
                && !PAGE_NUMBER.is_match(text)
                && text.chars().count() >= config.min_title_length
        })
        .cloned()
        .collect()
}
