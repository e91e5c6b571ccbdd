use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`plate-ai config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像読み込みエラー: {0}")]
    Intake(String),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] plate_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, PlateAiError>;

/// 認識サービス呼び出しの失敗
///
/// 処理レコードには汎用メッセージだけを残し、詳細はログに出す。
#[derive(Error, Debug)]
pub enum RecognitionFailure {
    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("タイムアウト")]
    Timeout,

    #[error("APIエラー (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("レスポンスが空です")]
    EmptyResponse,

    #[error("レスポンスが不正です: {0}")]
    InvalidResponse(String),

    #[error("画像データが不正です: {0}")]
    InvalidImage(String),
}

impl From<reqwest::Error> for RecognitionFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecognitionFailure::Timeout
        } else {
            RecognitionFailure::Transport(err.to_string())
        }
    }
}

impl From<plate_ai_common::Error> for RecognitionFailure {
    fn from(err: plate_ai_common::Error) -> Self {
        RecognitionFailure::InvalidResponse(err.to_string())
    }
}
