//! 最大フォントサイズの単語集合

use super::sort_reading_order;
use crate::pdf::Token;

/// 最大フォントサイズ付近の単語（読み順）
#[derive(Debug, Clone, PartialEq)]
pub struct FontCluster {
    pub max_size: f64,
    pub tokens: Vec<Token>,
}

/// 最大フォントサイズとの差が `tolerance` 以内の単語を集める
///
/// 単語が無い場合は `None`。
pub fn largest_font_cluster(tokens: &[Token], tolerance: f64) -> Option<FontCluster> {
    let max_size = tokens
        .iter()
        .map(|t| t.font_size)
        .reduce(f64::max)?;

    let mut large: Vec<Token> = tokens
        .iter()
        .filter(|t| max_size - t.font_size <= tolerance)
        .cloned()
        .collect();
    sort_reading_order(&mut large);

    Some(FontCluster {
        max_size,
        tokens: large,
    })
}
