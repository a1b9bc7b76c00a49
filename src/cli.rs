use crate::ai_provider::AiProvider;
use clap::{Parser, Subcommand};
use photo_guide_common::Genre;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-guide")]
#[command(about = "写真の構図採点・撮影コーチングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像またはフォルダを解析してJSONを出力
    Analyze {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// ジャンル (portrait/landscape/product)。未知の値は portrait
        #[arg(short, long)]
        genre: Option<Genre>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 1枚を解析してスコア・コーチガイド・エキスパートプロンプトを表示
    Guide {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// ジャンル (portrait/landscape/product)
        #[arg(short, long)]
        genre: Option<Genre>,
    },

    /// 外部AIにレタッチ提案を依頼
    Enhance {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 指示文（省略時は解析結果のエキスパートプロンプト）
        #[arg(short, long)]
        prompt: Option<String>,

        /// ジャンル (portrait/landscape/product)
        #[arg(short, long)]
        genre: Option<Genre>,

        /// スタイル (natural/vivid/dramatic)
        #[arg(long, default_value = "natural")]
        style: String,

        /// 調整の強さ (0.0-1.0)
        #[arg(long, default_value = "0.7")]
        strength: f64,

        /// AIプロバイダ (gemini/claude/codex)
        #[arg(long, value_enum, default_value = "gemini")]
        ai_provider: AiProvider,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
