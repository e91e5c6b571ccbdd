//! APIレスポンスパーサー
//!
//! 認識サービスのレスポンス文字列からJSONオブジェクトを抽出し、
//! RecognitionResult のスキーマに照らして検証する

use crate::error::{Error, Result};
use crate::types::RecognitionResult;
use serde_json::error::Category;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use plate_ai_common::extract_json;
///
/// let response = "result: {\"plateNumber\": \"12345\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// 認識レスポンスをパースして検証
///
/// - 必須フィールドの欠落、vehicleType の範囲外、confidence が数値でない場合は Schema エラー
/// - confidence が [0, 1] の外（NaN含む）の場合も Schema エラー
/// - JSONとして壊れている場合は Parse エラー
pub fn parse_recognition_response(response: &str) -> Result<RecognitionResult> {
    if response.trim().is_empty() {
        return Err(Error::Parse("empty response".into()));
    }

    let json_str = extract_json(response)?;
    let result: RecognitionResult = serde_json::from_str(json_str.trim()).map_err(|e| {
        match e.classify() {
            Category::Data => Error::Schema(e.to_string()),
            _ => Error::Parse(e.to_string()),
        }
    })?;

    validate_recognition(&result)?;
    Ok(result)
}

/// 値域チェック
pub fn validate_recognition(result: &RecognitionResult) -> Result<()> {
    if !(0.0..=1.0).contains(&result.confidence) {
        return Err(Error::Schema(format!(
            "confidence out of range [0, 1]: {}",
            result.confidence
        )));
    }
    Ok(())
}
