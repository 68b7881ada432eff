//! 一括処理 - タイトル抽出は並列、リネームは入力順に1件ずつ

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error::{ExtractionError, RenameError};
use crate::pdf::PageSource;
use crate::rename::{self, RenamePlan};
use crate::title::TitleExtractor;

/// 一括処理の設定
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// 全ファイル共通のタイトル（空なら抽出結果を使う）
    pub custom_title: Option<String>,
    /// 使用する候補の位置（0始まり）
    pub candidate: usize,
    /// リネームせず新しいファイル名だけを表示
    pub dry_run: bool,
    /// 同名ファイルを上書き
    pub overwrite: bool,
    /// 同時に抽出するファイル数
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            custom_title: None,
            candidate: 0,
            dry_run: false,
            overwrite: false,
            jobs: 4,
        }
    }
}

/// 一括処理の中止フラグ
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// ファイルごとの処理結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// リネーム済み
    Renamed { new_name: String },
    /// 予定（ドライラン）
    Planned { new_name: String },
    /// 失敗
    Failed { error: String },
    /// 中止によりスキップ
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub original_name: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// 件数の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub renamed: usize,
    pub planned: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut summary, outcome| {
                match outcome.status {
                    FileStatus::Renamed { .. } => summary.renamed += 1,
                    FileStatus::Planned { .. } => summary.planned += 1,
                    FileStatus::Failed { .. } => summary.failed += 1,
                    FileStatus::Skipped => summary.skipped += 1,
                }
                summary
            },
        )
    }
}

/// 複数ファイルを一括処理
///
/// タイトル抽出はブロッキングタスクで最大 `jobs` 件まで並列に行う。
/// リネームは重複回避の競合を防ぐため入力順に1件ずつ実行する。
pub async fn run_batch<S>(
    extractor: Arc<TitleExtractor<S>>,
    files: Vec<PathBuf>,
    options: &BatchOptions,
    stop: &StopHandle,
) -> Vec<FileOutcome>
where
    S: PageSource + 'static,
{
    let total = files.len();
    let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));

    let handles: Vec<JoinHandle<Option<Result<RenamePlan, RenameError>>>> = files
        .iter()
        .cloned()
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let semaphore = Arc::clone(&semaphore);
            let stop = stop.clone();
            let custom_title = options.custom_title.clone();
            let candidate = options.candidate;

            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return None;
                };
                if stop.is_stopped() {
                    return None;
                }
                let plan = tokio::task::spawn_blocking(move || {
                    rename::plan_rename(&extractor, &path, custom_title.as_deref(), candidate)
                })
                .await
                .unwrap_or_else(|e| {
                    Err(ExtractionError::Processing(format!("抽出タスクが異常終了: {e}")).into())
                });
                Some(plan)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(total);
    for (i, (source, handle)) in files.into_iter().zip(handles).enumerate() {
        let original_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        let status = if stop.is_stopped() {
            handle.abort();
            FileStatus::Skipped
        } else {
            match handle.await {
                Ok(Some(Ok(plan))) => finish(&plan, options),
                Ok(Some(Err(e))) => FileStatus::Failed {
                    error: e.to_string(),
                },
                Ok(None) => FileStatus::Skipped,
                Err(e) => FileStatus::Failed {
                    error: format!("処理タスクが異常終了: {e}"),
                },
            }
        };

        if let FileStatus::Failed { error } = &status {
            tracing::warn!(file = %original_name, %error, "処理に失敗");
        }
        tracing::info!("処理中: {}/{}", i + 1, total);

        outcomes.push(FileOutcome {
            source,
            original_name,
            status,
        });
    }

    if stop.is_stopped() {
        tracing::info!("処理を中止しました");
    }
    outcomes
}

fn finish(plan: &RenamePlan, options: &BatchOptions) -> FileStatus {
    if options.dry_run {
        return FileStatus::Planned {
            new_name: plan.new_name.clone(),
        };
    }

    match rename::apply(plan, options.overwrite) {
        Ok(path) => FileStatus::Renamed {
            new_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| plan.new_name.clone()),
        },
        Err(e) => FileStatus::Failed {
            error: e.to_string(),
        },
    }
}
