//! 単語の連結 - 中日韓文字と欧文の混在を考慮

use regex::Regex;
use std::sync::LazyLock;

use crate::pdf::Token;

/// 欧文文字: 漢字以外の文字、句読点、数字
static WESTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\p{L}--\p{Han}]|\p{P}|\p{N})$")
        .expect("valid western char pattern")
});

/// 欧文文字かどうか（Unicode一般カテゴリ・文字体系で判定）
pub fn is_western_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WESTERN.is_match(c.encode_utf8(&mut buf))
}

/// 単語を順に連結する
///
/// 前の単語の末尾と次の単語の先頭がどちらも欧文文字の場合だけ
/// 空白を挟む。
pub fn join_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut result = String::new();
    let mut prev_last: Option<char> = None;

    for (i, token) in tokens.into_iter().enumerate() {
        if i > 0 {
            let needs_space = matches!(
                (prev_last, token.text.chars().next()),
                (Some(prev), Some(curr)) if is_western_char(prev) && is_western_char(curr)
            );
            if needs_space {
                result.push(' ');
            }
        }
        result.push_str(&token.text);
        prev_last = token.text.chars().last();
    }

    result.trim().to_string()
}
