//! 画像1枚分の処理
//!
//! processing に遷移 → 認識 → completed / error に遷移。
//! 失敗はここで止め、レコードの error 状態としてだけ外に出す。

use crate::recognizer::Recognizer;
use crate::store::ItemStore;
use plate_ai_common::RecordUpdate;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Clone)]
pub struct Processor {
    store: ItemStore,
    recognizer: Arc<dyn Recognizer>,
    failure_message: String,
    limiter: Option<Arc<Semaphore>>,
}

impl Processor {
    pub fn new(store: ItemStore, recognizer: Arc<dyn Recognizer>, failure_message: impl Into<String>) -> Self {
        Self {
            store,
            recognizer,
            failure_message: failure_message.into(),
            limiter: None,
        }
    }

    /// 同時に実行する認識呼び出しの上限（既定は無制限）
    pub fn with_max_concurrent(mut self, max: Option<usize>) -> Self {
        self.limiter = max.filter(|&n| n > 0).map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// 1件を処理する。削除済みIDへの更新はストア側で無視される
    pub async fn process(&self, id: &str, image_data: &str) {
        // 上限待ちの間は pending のまま
        let _permit = match &self.limiter {
            Some(limiter) => limiter.clone().acquire_owned().await.ok(),
            None => None,
        };

        self.store.update(id, RecordUpdate::Processing);

        match self.recognizer.recognize(image_data).await {
            Ok(result) => {
                tracing::debug!(id, plate = %result.plate_number, "recognition completed");
                self.store.update(id, RecordUpdate::Completed(result));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "recognition failed");
                self.store
                    .update(id, RecordUpdate::Failed(self.failure_message.clone()));
            }
        }
    }
}
