//! 処理レコードのストア
//!
//! セッション中のすべての ProcessingRecord を挿入順で保持する。
//! 変更はすべてここの操作を通し、各操作はロックを1回だけ取るので
//! 別IDへの操作の途中状態は外から見えない。

use plate_ai_common::{ProcessingRecord, RecognitionResult, RecordStatus, RecordUpdate};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// ステータス別件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub completed: usize,
    /// pending + processing
    pub in_flight: usize,
    pub failed: usize,
}

struct Inner {
    records: Mutex<Vec<ProcessingRecord>>,
    revision: watch::Sender<u64>,
}

/// ストアのハンドル（clone は同じストアを指す）
#[derive(Clone)]
pub struct ItemStore {
    inner: Arc<Inner>,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(Vec::new()),
                revision,
            }),
        }
    }

    fn records(&self) -> MutexGuard<'_, Vec<ProcessingRecord>> {
        // 他タスクのpanicでロックが汚染されても中身は常に整合している
        self.inner
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }

    /// 末尾に追加。同じIDが既にあれば追加せず false
    pub fn insert(&self, record: ProcessingRecord) -> bool {
        {
            let mut records = self.records();
            if records.iter().any(|r| r.id == record.id) {
                tracing::warn!(id = %record.id, "duplicate record id, insert skipped");
                return false;
            }
            records.push(record);
        }
        self.bump();
        true
    }

    /// 状態遷移を適用。IDが無ければ何もしない（削除済みレコードは復活させない）
    pub fn update(&self, id: &str, update: RecordUpdate) -> bool {
        let applied = {
            let mut records = self.records();
            match records.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    let applied = record.apply(update);
                    if !applied {
                        tracing::debug!(id, "update for finished record ignored");
                    }
                    applied
                }
                None => {
                    tracing::debug!(id, "update for missing record ignored");
                    false
                }
            }
        };

        if applied {
            self.bump();
        }
        applied
    }

    /// IDのレコードを削除。残りの順序は変えない
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut records = self.records();
            let before = records.len();
            records.retain(|r| r.id != id);
            records.len() != before
        };

        if removed {
            self.bump();
        }
        removed
    }

    pub fn clear(&self) {
        self.records().clear();
        self.bump();
    }

    /// 現時点の全レコードのコピー
    pub fn snapshot(&self) -> Vec<ProcessingRecord> {
        self.records().clone()
    }

    pub fn get(&self, id: &str) -> Option<ProcessingRecord> {
        self.records().iter().find(|r| r.id == id).cloned()
    }

    /// completed のレコードと結果の組（挿入順）
    pub fn completed(&self) -> Vec<(ProcessingRecord, RecognitionResult)> {
        self.records()
            .iter()
            .filter_map(|r| r.result().cloned().map(|result| (r.clone(), result)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let records = self.records();
        let mut stats = StoreStats {
            total: records.len(),
            ..Default::default()
        };
        for record in records.iter() {
            match record.status() {
                RecordStatus::Pending | RecordStatus::Processing => stats.in_flight += 1,
                RecordStatus::Completed => stats.completed += 1,
                RecordStatus::Error => stats.failed += 1,
            }
        }
        stats
    }

    /// 変更のたびに増えるリビジョン番号を購読（再描画トリガー）
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }
}
