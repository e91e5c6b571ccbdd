//! Export core modules shared across front-ends.
//!
//! 行データの組み立て（純粋関数）と、Excelバッファ生成。

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::labels::{vehicle_type_label, Language};
use crate::types::RecognitionResult;

/// 表の1行（列順は labels::column_headers と同じ）
pub type TableRow = [String; 6];

/// 認識結果1件を表の行に変換
pub fn table_row(result: &RecognitionResult, lang: Language) -> TableRow {
    [
        result.plate_number.clone(),
        result.letter.clone(),
        result.city.clone(),
        vehicle_type_label(lang, result.vehicle_type).to_string(),
        result.country.clone(),
        result.confidence_percent(),
    ]
}
