use clap::{Parser, Subcommand};
use plant_ai_common::{AnalysisMode, Language};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-ai")]
#[command(about = "植物写真AI解析（病害診断・植物同定）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を送信して病害診断・植物同定を行う
    Predict {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 解析モード (diagnosis/recognition)。省略時は設定ファイルの値
        #[arg(short, long)]
        mode: Option<AnalysisMode>,

        /// 応答言語 (en/ru/hi/ta/ml)。省略時は設定ファイルの値
        #[arg(short, long)]
        language: Option<Language>,

        /// 表示サイズ（例: 800x600）。病変部位をこのサイズに換算して出力
        #[arg(short, long)]
        display: Option<DisplaySize>,

        /// APIエンドポイント（環境変数・設定ファイルより優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// 結果をJSONで標準出力に出す
        #[arg(long)]
        json: bool,

        /// 結果JSONの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サーバーの稼働確認
    Health {
        /// APIエンドポイント
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIエンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 既定の応答言語を設定
        #[arg(long)]
        set_language: Option<Language>,

        /// 既定の解析モードを設定
        #[arg(long)]
        set_mode: Option<AnalysisMode>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 画像の表示サイズ（px）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl std::str::FromStr for DisplaySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .to_lowercase()
            .split_once('x')
            .map(|(w, h)| (w.trim().to_string(), h.trim().to_string()))
            .ok_or_else(|| format!("Invalid display size: {}. Use WIDTHxHEIGHT", s))?;

        let width: f64 = w.parse().map_err(|_| format!("Invalid width: {}", w))?;
        let height: f64 = h.parse().map_err(|_| format!("Invalid height: {}", h))?;

        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(format!("Display size must be positive: {}", s));
        }

        Ok(DisplaySize { width, height })
    }
}

impl std::fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
