//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// どのエラーも致命的ではなく、ユーザー操作（画像の再選択・再実行）で回復できる
#[derive(Error, Debug)]
pub enum Error {
    /// ドロップされたファイルが画像ではない
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 画像未選択のまま解析を要求した
    #[error("No image selected")]
    NoImageSelected,

    /// 2xx以外のHTTPレスポンス
    #[error("Server error {status}: {body}")]
    Http { status: u16, body: String },

    /// ネットワーク障害など、レスポンス自体が得られなかった
    #[error("Transport error: {0}")]
    Transport(String),

    /// レスポンスJSONが要求モードの必須フィールドを欠いている
    #[error("Interpretation error: {0}")]
    Interpretation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// トランスポート層の失敗か（HTTPエラー・通信失敗・不正なJSON）
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http { .. } | Error::Transport(_) | Error::Json(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
