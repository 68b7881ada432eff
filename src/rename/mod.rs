//! リネーム処理 - ファイル名生成・重複回避・入力ファイル収集

pub mod sanitize;

pub use sanitize::{clean_filename, process_filename};

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenameError;
use crate::pdf::PageSource;
use crate::title::TitleExtractor;

/// リネーム計画
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlan {
    /// 元のファイル
    pub source: PathBuf,
    /// 採用したタイトル
    pub title: String,
    /// 新しいファイル名（重複回避前）
    pub new_name: String,
    /// リネーム先（重複回避前）
    pub target: PathBuf,
}

impl RenamePlan {
    /// タイトルからリネーム計画を作成
    pub fn new<S: PageSource>(
        extractor: &TitleExtractor<S>,
        source: &Path,
        title: &str,
    ) -> Result<Self, RenameError> {
        let original_name = file_name(source)?;
        let new_name = extractor.process_filename(title, &original_name);
        let target = source.with_file_name(&new_name);

        Ok(Self {
            source: source.to_path_buf(),
            title: title.to_string(),
            new_name,
            target,
        })
    }
}

/// タイトルを抽出してリネーム計画を作成
///
/// `custom_title` が空でなければ抽出結果より優先する。それ以外は
/// `candidate` 番目（0始まり）の候補を使い、候補数が足りなければ先頭に
/// 戻す。抽出に失敗したファイルは代替候補の文字列でリネームせずエラーを返す。
pub fn plan_rename<S: PageSource>(
    extractor: &TitleExtractor<S>,
    source: &Path,
    custom_title: Option<&str>,
    candidate: usize,
) -> Result<RenamePlan, RenameError> {
    let custom = custom_title.map(str::trim).filter(|t| !t.is_empty());

    let title = match custom {
        Some(title) => title.to_string(),
        None => {
            let candidates = extractor.extract(source)?;
            let index = if candidate < candidates.len() {
                candidate
            } else {
                tracing::debug!(
                    path = %source.display(),
                    requested = candidate + 1,
                    available = candidates.len(),
                    "指定の候補が無いため先頭の候補を使用"
                );
                0
            };
            // 候補は常に1件以上
            candidates
                .into_iter()
                .nth(index)
                .map(|c| c.text)
                .unwrap_or_default()
        }
    };

    RenamePlan::new(extractor, source, &title)
}

/// リネームを実行し、最終的なパスを返す
///
/// `overwrite` が偽の場合、同名ファイルがあれば連番を付ける。
pub fn apply(plan: &RenamePlan, overwrite: bool) -> Result<PathBuf, RenameError> {
    if plan.target == plan.source {
        return Ok(plan.target.clone());
    }

    let target = if overwrite {
        plan.target.clone()
    } else {
        let dir = plan.target.parent().unwrap_or(Path::new("."));
        unique_path(dir, &plan.new_name)
    };

    fs::rename(&plan.source, &target).map_err(|e| RenameError::io(&plan.source, e))?;
    tracing::info!(from = %plan.source.display(), to = %target.display(), "リネーム完了");

    Ok(target)
}

/// 重複しないパスを取得（同名ファイルがある場合は連番を付与）
pub fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let candidate = directory.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = directory.join(format!("{stem}_{counter}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// 入力パスからPDFファイルを収集（フォルダは再帰的に探索、重複は除外）
pub fn collect_pdfs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, RenameError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            walk_pdfs(input, &mut found)?;
            found.sort();
            for path in found {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        } else if is_pdf(input) {
            if seen.insert(input.clone()) {
                files.push(input.clone());
            }
        } else {
            tracing::warn!(path = %input.display(), "PDFファイルではないためスキップ");
        }
    }

    Ok(files)
}

fn walk_pdfs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenameError> {
    let entries = fs::read_dir(dir).map_err(|e| RenameError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| RenameError::io(dir, e))?.path();
        if path.is_dir() {
            walk_pdfs(&path, out)?;
        } else if is_pdf(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// 拡張子が .pdf（大文字小文字を区別しない）
pub fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// 一覧表示用のファイル情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size: String,
    pub modified: String,
}

impl FileEntry {
    pub fn read(path: &Path) -> Result<Self, RenameError> {
        let metadata = fs::metadata(path).map_err(|e| RenameError::io(path, e))?;
        let modified = metadata
            .modified()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        Ok(Self {
            name: file_name(path)?,
            size: format_size(metadata.len()),
            modified,
        })
    }
}

/// ファイルサイズを読みやすい形式に変換
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} {}", UNITS[UNITS.len() - 1])
}

fn file_name(path: &Path) -> Result<String, RenameError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| RenameError::MissingFileName(path.to_path_buf()))
}
