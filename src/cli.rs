use clap::{Parser, Subcommand};
use plate_ai_common::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plate-ai")]
#[command(about = "ナンバープレート画像AI認識・一括エクスポートツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を認識して結果をエクスポート
    Run {
        /// 画像ファイルまたはフォルダ（複数可）
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (excel/zip/both/none)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 表示・Excel見出しの言語 (ar/en)
        #[arg(short, long)]
        lang: Option<Language>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 同時リクエスト数の上限（省略時は無制限）
        #[arg(long)]
        max_concurrent: Option<usize>,

        /// 全レコードをJSONで保存
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 画像1枚を認識してJSONを表示
    Recognize {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 既定の言語を設定 (ar/en)
        #[arg(long)]
        set_language: Option<Language>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Zip,
    #[default]
    Both,
    None,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "zip" => Ok(ExportFormat::Zip),
            "both" => Ok(ExportFormat::Both),
            "none" => Ok(ExportFormat::None),
            _ => Err(format!("Unknown format: {}. Use excel, zip, both, or none", s)),
        }
    }
}
