//! 認識クライアント
//!
//! 画像1枚（Data URL）を受け取り、外部の認識サービスを1回だけ呼んで
//! 検証済みの RecognitionResult を返す。リトライはしない。

mod gemini;

pub use gemini::GeminiClient;

use crate::error::RecognitionFailure;
use async_trait::async_trait;
use plate_ai_common::RecognitionResult;

#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image_data: &str) -> Result<RecognitionResult, RecognitionFailure>;
}
