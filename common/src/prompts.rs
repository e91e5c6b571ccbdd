//! プロンプト・レスポンススキーマ生成モジュール
//!
//! - build_system_instruction: 抽出タスクと分類ルールの指示文
//! - USER_PROMPT: 画像と一緒に送る短い依頼文
//! - response_schema: 構造化出力のJSONスキーマ

use crate::types::VehicleType;
use serde_json::{json, Value};

/// 画像と一緒に送る依頼文
pub const USER_PROMPT: &str =
    "Analyze this license plate and extract the details according to the rules above.";

/// 認識用のシステム指示を生成
///
/// # Arguments
/// * `home_country` - 国の分類で「自国」とみなす国名
pub fn build_system_instruction(home_country: &str) -> String {
    format!(
        r#"You are an expert in recognizing international vehicle license plates. Analyze the image and extract the following data precisely:
1. plateNumber: the main plate number (the digits).
2. letter: the plate code or letter, if any (empty string otherwise).
3. city: the city or emirate name written on the plate.
4. vehicleType: classify the vehicle using these rules:
   - "TAXI": the plate shows a small car icon (taxi logo) or says taxi/for hire.
   - "POLICE": the plate belongs to the police or a security agency.
   - "AMBULANCE": the vehicle is an ambulance or emergency medical vehicle.
   - "PRIVATE": ordinary civil plates.
   - "OTHER": any other classification.
5. country:
   - if the plate is from {home_country}, write "{home_country}".
   - if it is from any other country, write "Other country" (followed by the country name if possible).
6. confidence: your confidence score between 0 and 1.
The result must be JSON only."#
    )
}

/// responseSchema（Gemini OpenAPIサブセット形式）
pub fn response_schema() -> Value {
    let vehicle_types: Vec<&str> = VehicleType::ALL.iter().map(|v| v.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "plateNumber": { "type": "STRING" },
            "letter": { "type": "STRING" },
            "city": { "type": "STRING" },
            "vehicleType": { "type": "STRING", "enum": vehicle_types },
            "country": { "type": "STRING" },
            "confidence": { "type": "NUMBER" }
        },
        "required": ["plateNumber", "letter", "city", "vehicleType", "country", "confidence"]
    })
}
