//! テスト用の共通ヘルパー

#![allow(dead_code)]

use async_trait::async_trait;
use plate_ai_rust::common::{decode_data_url, RecognitionResult, VehicleType};
use plate_ai_rust::error::RecognitionFailure;
use plate_ai_rust::recognizer::Recognizer;
use plate_ai_rust::scanner::ImageFile;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 画像の中身で挙動を決めるテスト用認識器
///
/// 画像バイト列は `<plate>|<letter>|<delay_ms>` 形式。`fail` で始まれば失敗する。
#[derive(Default)]
pub struct ScriptedRecognizer {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn recognize(&self, image_data: &str) -> Result<RecognitionResult, RecognitionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let bytes = decode_data_url(image_data)
            .map_err(|e| RecognitionFailure::InvalidImage(e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes).to_string();
        let mut fields = text.split('|');
        let plate = fields.next().unwrap_or_default().to_string();
        let letter = fields.next().unwrap_or_default().to_string();
        let delay_ms: u64 = fields.next().and_then(|d| d.parse().ok()).unwrap_or(0);

        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if plate.starts_with("fail") {
            return Err(RecognitionFailure::InvalidResponse("malformed response".to_string()));
        }

        Ok(RecognitionResult {
            plate_number: plate,
            letter,
            city: "Dubai".to_string(),
            vehicle_type: VehicleType::Private,
            country: "United Arab Emirates".to_string(),
            confidence: 0.875,
        })
    }
}

/// 一時ディレクトリに画像ファイルを作る
pub fn write_image(dir: &Path, file_name: &str, content: &str) -> ImageFile {
    let path = dir.join(file_name);
    std::fs::write(&path, content).expect("画像ファイル作成失敗");
    ImageFile {
        path,
        file_name: file_name.to_string(),
    }
}
