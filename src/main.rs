//! PDFタイトルリネーマー - メインエントリポイント

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use pdf_title_renamer::batch::{self, BatchOptions, BatchSummary, FileStatus, StopHandle};
use pdf_title_renamer::rename::{self, FileEntry};
use pdf_title_renamer::{ExtractorConfig, TitleCandidate, TitleExtractor};

/// 候補表示用
#[derive(Serialize)]
struct CandidateReport {
    path: PathBuf,
    file: Option<FileEntry>,
    candidates: Vec<TitleCandidate>,
    proposed_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ロギング初期化（RUST_LOG 優先）
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    let config = ExtractorConfig::load(cli.config.as_deref()).context("設定の読み込みに失敗")?;
    let extractor = Arc::new(TitleExtractor::new(config));
    tracing::debug!(config = ?extractor.config(), "抽出設定");

    match cli.command {
        Commands::Candidates { paths, json } => show_candidates(&extractor, &paths, json),
        Commands::Rename {
            paths,
            title,
            candidate,
            dry_run,
            overwrite,
            jobs,
            json,
        } => {
            let options = BatchOptions {
                custom_title: title,
                candidate: candidate.saturating_sub(1),
                dry_run,
                overwrite,
                jobs,
            };
            rename_files(extractor, &paths, &options, json).await
        }
    }
}

/// タイトル候補と変更後のファイル名を表示
fn show_candidates(extractor: &TitleExtractor, paths: &[PathBuf], json: bool) -> Result<()> {
    let files = rename::collect_pdfs(paths)?;
    if files.is_empty() {
        anyhow::bail!("PDFファイルが見つかりません");
    }

    let reports: Vec<CandidateReport> = files
        .into_iter()
        .map(|path| {
            let candidates = extractor.candidates(&path);
            let original = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let proposed_name = extractor.process_filename(&candidates[0].text, &original);
            CandidateReport {
                file: FileEntry::read(&path).ok(),
                path,
                candidates,
                proposed_name,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        match &report.file {
            Some(file) => println!("{}  ({}, {})", file.name, file.size, file.modified),
            None => println!("{}", report.path.display()),
        }
        for (i, candidate) in report.candidates.iter().enumerate() {
            println!("  {}. {} (サイズ: {:.1})", i + 1, candidate.text, candidate.font_size);
        }
        println!("  → {}", report.proposed_name);
    }
    Ok(())
}

/// 一括リネーム（Ctrl+C で残りを中止）
async fn rename_files(
    extractor: Arc<TitleExtractor>,
    paths: &[PathBuf],
    options: &BatchOptions,
    json: bool,
) -> Result<()> {
    let files = rename::collect_pdfs(paths)?;
    if files.is_empty() {
        anyhow::bail!("PDFファイルが見つかりません");
    }
    tracing::info!("{} 個のファイルを処理中...", files.len());

    let stop = StopHandle::default();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("中止要求を受け付けました");
                stop.stop();
            }
        });
    }

    let outcomes = batch::run_batch(extractor, files, options, &stop).await;
    let summary = BatchSummary::from_outcomes(&outcomes);

    if json {
        #[derive(Serialize)]
        struct Report<'a> {
            files: &'a [batch::FileOutcome],
            summary: BatchSummary,
        }
        let report = Report {
            files: &outcomes,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &outcomes {
            match &outcome.status {
                FileStatus::Renamed { new_name } | FileStatus::Planned { new_name } => {
                    println!("{} → {}", outcome.original_name, new_name);
                }
                FileStatus::Failed { error } => {
                    println!("{} ✗ {}", outcome.original_name, error);
                }
                FileStatus::Skipped => println!("{} (スキップ)", outcome.original_name),
            }
        }
        if options.dry_run {
            println!("プレビュー: {} 件", summary.planned);
        } else {
            println!(
                "完了: {} 件成功, {} 件失敗, {} 件スキップ",
                summary.renamed, summary.failed, summary.skipped
            );
        }
    }

    if summary.failed > 0 && !options.dry_run {
        std::process::exit(1);
    }
    Ok(())
}
