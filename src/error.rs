use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("HTTPクライアントエラー: {0}")]
    HttpClient(String),

    #[error("解析に失敗しました: {0}")]
    Prediction(String),

    #[error("サーバーが応答しません: {0}")]
    Health(String),

    #[error(transparent)]
    Core(#[from] plant_ai_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlantAiError>;
