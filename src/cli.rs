//! コマンドライン引数

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PDFの1ページ目のタイトルでファイル名を変更する
#[derive(Debug, Parser)]
#[command(name = "pdf_title_renamer", about, version)]
pub struct Cli {
    /// 詳細ログを表示
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// しきい値の設定ファイル（JSON）
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// タイトル候補を表示
    Candidates {
        /// PDFファイルまたはフォルダ
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// タイトルでリネーム
    Rename {
        /// PDFファイルまたはフォルダ
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// 抽出結果の代わりに使うタイトル
        #[arg(long)]
        title: Option<String>,

        /// 使用する候補の番号（1始まり、候補が足りなければ先頭）
        #[arg(
            short,
            long,
            default_value_t = 1,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        candidate: usize,

        /// リネームせず新しいファイル名を表示
        #[arg(long)]
        dry_run: bool,

        /// 同名ファイルを上書き（既定は連番を付与）
        #[arg(long)]
        overwrite: bool,

        /// 同時に解析するファイル数
        #[arg(short, long, default_value_t = 4)]
        jobs: usize,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },
}
