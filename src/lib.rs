//! plate-ai: ナンバープレート画像のAI認識パイプライン
//!
//! 受け付け(intake) → ストア登録 → 認識(processor/recognizer) → ストア更新、
//! エクスポートはストアのスナップショットから行う。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod processor;
pub mod recognizer;
pub mod scanner;
pub mod store;

pub use plate_ai_common as common;
