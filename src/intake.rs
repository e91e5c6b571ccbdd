//! 画像の受け付け
//!
//! ファイルごとに独立したタスクで「ID採番 → 非同期読み込み → Data URL化 →
//! pending で登録 → 処理」を行う。読み込みに失敗したファイルはレコードを作らず、
//! 他のファイルには影響しない。

use crate::error::{PlateAiError, Result};
use crate::processor::Processor;
use crate::scanner::ImageFile;
use plate_ai_common::{encode_data_url, mime_type_for_extension, ProcessingRecord};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// 新しいレコードID
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 投入したバッチのタスク群
pub struct Batch {
    handles: Vec<JoinHandle<()>>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// すべてのタスクの終了を待つ
    pub async fn wait(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                tracing::error!(error = %err, "intake task aborted");
            }
        }
    }
}

/// 画像を読み込み、pending のレコードを作る
async fn read_record(file: ImageFile) -> Result<ProcessingRecord> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| PlateAiError::Intake(format!("{}: {}", file.path.display(), e)))?;

    let mime_type = file
        .path
        .extension()
        .map(|ext| mime_type_for_extension(&ext.to_string_lossy()))
        .unwrap_or("image/jpeg");

    Ok(ProcessingRecord::new(
        new_record_id(),
        file.file_name,
        encode_data_url(&bytes, mime_type),
    ))
}

/// 画像1件を読み込んで登録し、処理まで行う
async fn intake_one(processor: Processor, file: ImageFile) {
    let record = match read_record(file).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(error = %err, "image intake failed");
            return;
        }
    };

    let id = record.id.clone();
    let image_data = record.image_data.clone();
    if !processor.store().insert(record) {
        return;
    }

    processor.process(&id, &image_data).await;
}

/// 画像のバッチを受け付ける（待たずに返る）
pub fn submit_batch(processor: &Processor, files: Vec<ImageFile>) -> Batch {
    let handles = files
        .into_iter()
        .map(|file| tokio::spawn(intake_one(processor.clone(), file)))
        .collect();

    Batch { handles }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_id_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[tokio::test]
    async fn test_read_record_pending_with_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.png");
        std::fs::write(&path, b"png-bytes").unwrap();

        let file = ImageFile { path, file_name: "plate.png".to_string() };
        let record = read_record(file).await.unwrap();
        assert_eq!(record.file_name, "plate.png");
        assert_eq!(record.status(), plate_ai_common::RecordStatus::Pending);
        assert!(record.image_data.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_read_record_missing_file() {
        let file = ImageFile {
            path: std::path::PathBuf::from("/nonexistent/plate.jpg"),
            file_name: "plate.jpg".to_string(),
        };
        let err = read_record(file).await.unwrap_err();
        assert!(matches!(err, PlateAiError::Intake(ref msg) if msg.contains("plate.jpg")));
    }
}
