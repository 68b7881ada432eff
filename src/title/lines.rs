//! 行グループ化

use crate::pdf::Token;

/// 単語を縦位置で行に分ける
///
/// 行の基準位置は行頭の単語の `top` に固定し、以降の単語の位置で
/// 更新しない。各行は左から順に並べ、行は上から順に返す。
pub fn group_lines(tokens: &[Token], tolerance: f64) -> Vec<Vec<&Token>> {
    let mut sorted: Vec<&Token> = tokens.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top));

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current_top = first.top;
    let mut current = vec![first];

    for token in iter {
        if (token.top - current_top).abs() <= tolerance {
            current.push(token);
        } else {
            lines.push(close_line(current));
            current_top = token.top;
            current = vec![token];
        }
    }
    lines.push(close_line(current));

    lines
}

fn close_line(mut line: Vec<&Token>) -> Vec<&Token> {
    line.sort_by(|a, b| a.left.total_cmp(&b.left));
    line
}
