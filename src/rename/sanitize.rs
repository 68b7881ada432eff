//! ファイル名の整形

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// タイトルの既定最大文字数
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 100;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid illegal char pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static PERIOD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.+").expect("valid period pattern"));

/// タイトルと元のファイル名から新しいファイル名を生成
///
/// フォーマット: `[タイトル]_[元のファイル名].pdf`
pub fn process_filename(title: &str, original_filename: &str) -> String {
    process_filename_with_limit(title, original_filename, DEFAULT_MAX_TITLE_LENGTH)
}

/// タイトルの最大文字数を指定してファイル名を生成
pub fn process_filename_with_limit(
    title: &str,
    original_filename: &str,
    max_length: usize,
) -> String {
    let stem = Path::new(original_filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut clean_title = clean_filename(title);

    // 単語境界は考慮せず先頭から切り詰める
    if clean_title.chars().count() > max_length {
        clean_title = clean_title.chars().take(max_length).collect();
    }

    format!("{clean_title}_{stem}.pdf")
}

/// ファイル名に使用できない文字を削除
pub fn clean_filename(text: &str) -> String {
    let result = ILLEGAL_CHARS.replace_all(text, "");
    let result = WHITESPACE_RUN.replace_all(&result, " ");
    let result = PERIOD_RUN.replace_all(&result, ".");
    result.trim_matches(['.', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_illegal_characters() {
        assert_eq!(
            process_filename("Report: Q1/Q2", "orig.pdf"),
            "Report Q1Q2_orig.pdf"
        );
        assert_eq!(clean_filename(r#"a\b*c?d"e<f>g|h"#), "abcdefgh");
    }

    #[test]
    fn collapses_whitespace_and_periods() {
        assert_eq!(clean_filename("Title \t\n  with   gaps"), "Title with gaps");
        assert_eq!(clean_filename("v1...2....final"), "v1.2.final");
    }

    #[test]
    fn trims_leading_and_trailing_periods_and_spaces() {
        assert_eq!(clean_filename(" ..Hidden title.. "), "Hidden title");
    }

    #[test]
    fn keeps_cjk_titles() {
        assert_eq!(
            process_filename("2024年度报告：总结", "scan_001.PDF"),
            "2024年度报告：总结_scan_001.pdf"
        );
    }

    #[test]
    fn strips_only_last_extension() {
        assert_eq!(process_filename("Title", "archive.v2.pdf"), "Title_archive.v2.pdf");
        assert_eq!(process_filename("Title", "noext"), "Title_noext.pdf");
    }

    #[test]
    fn truncates_long_titles_to_prefix() {
        let title = "长".repeat(40) + &"word ".repeat(30);
        let cleaned = clean_filename(&title);
        let new_name = process_filename(&title, "orig.pdf");

        let title_part = new_name.strip_suffix("_orig.pdf").unwrap();
        assert_eq!(title_part.chars().count(), 100);
        assert!(cleaned.starts_with(title_part));
    }

    #[test]
    fn short_titles_are_not_truncated() {
        assert_eq!(process_filename("Short", "x.pdf"), "Short_x.pdf");
    }
}
