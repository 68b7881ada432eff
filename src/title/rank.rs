//! タイトル候補の順位付け

use super::cluster::largest_font_cluster;
use super::join::join_tokens;
use super::lines::group_lines;
use super::{TitleCandidate, sort_reading_order};
use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::pdf::Token;

/// 除外済みの単語からタイトル候補を作る
///
/// 優先順位:
/// 1. 最大フォントの単語すべて（常に含む）
/// 2. 最大フォントの1行目（複数行で、1と異なる場合）
/// 3. 2番目に大きいフォントの単語（候補が2件未満の場合）
pub fn rank_candidates(filtered: &[Token], config: &ExtractorConfig) -> Vec<TitleCandidate> {
    let Some(cluster) = largest_font_cluster(filtered, config.font_size_tolerance) else {
        return vec![ExtractionError::NoSuitableTitle.sentinel()];
    };

    let mut candidates = Vec::with_capacity(2);

    // 1. 最大フォントのタイトル
    let max_font_title = join_tokens(&cluster.tokens);
    candidates.push(TitleCandidate::new(max_font_title.clone(), cluster.max_size));

    // 2. 複数行タイトルの場合は1行目
    let lines = group_lines(&cluster.tokens, config.line_tolerance);
    if lines.len() > 1 {
        let first_line = &lines[0];
        let first_line_title = join_tokens(first_line.iter().copied());
        if first_line_title != max_font_title {
            let avg_size =
                first_line.iter().map(|t| t.font_size).sum::<f64>() / first_line.len() as f64;
            candidates.push(TitleCandidate::new(first_line_title, avg_size));
        }
    }

    // 3. 2番目に大きいフォント
    if candidates.len() < 2 {
        if let Some(candidate) = second_size_candidate(filtered) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// 2番目に大きいフォントサイズの単語を連結
fn second_size_candidate(filtered: &[Token]) -> Option<TitleCandidate> {
    let mut sizes: Vec<f64> = filtered.iter().map(|t| t.font_size).collect();
    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes.dedup();
    let second_size = *sizes.get(1)?;

    let mut second: Vec<Token> = filtered
        .iter()
        .filter(|t| t.font_size == second_size)
        .cloned()
        .collect();
    sort_reading_order(&mut second);

    Some(TitleCandidate::new(join_tokens(&second), second_size))
}
