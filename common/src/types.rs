//! 認識結果・処理レコードの型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - VehicleType: 車両区分（5種の列挙）
//! - RecognitionResult: 認識サービスの出力
//! - ProcessingRecord: 画像1枚ごとの処理レコード（状態機械）

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 車両区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Private,
    Taxi,
    Police,
    Ambulance,
    Other,
}

impl VehicleType {
    /// スキーマの enum 制約に使う全値（順序固定）
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Private,
        VehicleType::Taxi,
        VehicleType::Police,
        VehicleType::Ambulance,
        VehicleType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Private => "PRIVATE",
            VehicleType::Taxi => "TAXI",
            VehicleType::Police => "POLICE",
            VehicleType::Ambulance => "AMBULANCE",
            VehicleType::Other => "OTHER",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("Unknown vehicle type: {}", s))
    }
}

/// 認識結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    #[serde(deserialize_with = "string_or_number")]
    pub plate_number: String,     // ナンバー

    #[serde(deserialize_with = "string_or_number")]
    pub letter: String,           // 分類コード・文字（空文字可）

    #[serde(deserialize_with = "string_or_number")]
    pub city: String,             // 都市・首長国

    pub vehicle_type: VehicleType,

    #[serde(deserialize_with = "string_or_number")]
    pub country: String,          // 国の分類

    pub confidence: f64,          // 0.0-1.0
}

impl RecognitionResult {
    /// 信頼度をパーセント表記（小数1桁）に整形
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// モデルが文字列項目を数値で返すことがあるため文字列に寄せる
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string, found {}", other))),
    }
}

/// 処理ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl RecordStatus {
    /// 自動遷移が起きない状態か
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Completed | RecordStatus::Error)
    }
}

/// レコードの内部状態
///
/// 結果とエラーは状態に紐づくため、不整合な組み合わせは表現できない。
#[derive(Debug, Clone, PartialEq)]
enum RecordState {
    Pending,
    Processing,
    Completed(RecognitionResult),
    Error(String),
}

/// ストアに送る状態遷移
#[derive(Debug, Clone, PartialEq)]
pub enum RecordUpdate {
    Processing,
    Completed(RecognitionResult),
    Failed(String),
}

/// 画像1枚分の処理レコード
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingRecord {
    pub id: String,
    pub file_name: String,
    /// `data:<mime>;base64,<payload>` 形式
    pub image_data: String,
    state: RecordState,
}

impl ProcessingRecord {
    /// pending 状態で新規作成
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        image_data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            image_data: image_data.into(),
            state: RecordState::Pending,
        }
    }

    pub fn status(&self) -> RecordStatus {
        match self.state {
            RecordState::Pending => RecordStatus::Pending,
            RecordState::Processing => RecordStatus::Processing,
            RecordState::Completed(_) => RecordStatus::Completed,
            RecordState::Error(_) => RecordStatus::Error,
        }
    }

    pub fn result(&self) -> Option<&RecognitionResult> {
        match &self.state {
            RecordState::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RecordState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// 状態遷移を適用する。completed / error からは遷移しない（false を返す）
    pub fn apply(&mut self, update: RecordUpdate) -> bool {
        if self.status().is_terminal() {
            return false;
        }

        self.state = match update {
            RecordUpdate::Processing => RecordState::Processing,
            RecordUpdate::Completed(result) => RecordState::Completed(result),
            RecordUpdate::Failed(message) => RecordState::Error(message),
        };
        true
    }
}

/// JSON出力用（画像データは含めない）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordView<'a> {
    id: &'a str,
    file_name: &'a str,
    status: RecordStatus,
    result: Option<&'a RecognitionResult>,
    error: Option<&'a str>,
}

impl Serialize for ProcessingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordView {
            id: &self.id,
            file_name: &self.file_name,
            status: self.status(),
            result: self.result(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> RecognitionResult {
        RecognitionResult {
            plate_number: "12345".to_string(),
            letter: "A".to_string(),
            city: "Dubai".to_string(),
            vehicle_type: VehicleType::Taxi,
            country: "UAE".to_string(),
            confidence: 0.934,
        }
    }

    #[test]
    fn test_vehicle_type_from_str() {
        assert_eq!("POLICE".parse::<VehicleType>(), Ok(VehicleType::Police));
        assert!("BUS".parse::<VehicleType>().is_err());
        assert!("police".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_recognition_result_deserialize() {
        let json = r#"{
            "plateNumber": "12345",
            "letter": "A",
            "city": "Dubai",
            "vehicleType": "TAXI",
            "country": "UAE",
            "confidence": 0.934
        }"#;

        let result: RecognitionResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result, sample_result());
    }

    #[test]
    fn test_recognition_result_numeric_plate() {
        let json = r#"{"plateNumber": 67890, "letter": "", "city": "Abu Dhabi",
            "vehicleType": "PRIVATE", "country": "UAE", "confidence": 1}"#;

        let result: RecognitionResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.plate_number, "67890");
        assert_eq!(result.letter, "");
    }

    #[test]
    fn test_confidence_percent() {
        assert_eq!(sample_result().confidence_percent(), "93.4%");

        let mut result = sample_result();
        result.confidence = 1.0;
        assert_eq!(result.confidence_percent(), "100.0%");
    }

    #[test]
    fn test_record_starts_pending() {
        let record = ProcessingRecord::new("id1", "a.jpg", "data:image/jpeg;base64,AAAA");
        assert_eq!(record.status(), RecordStatus::Pending);
        assert!(record.result().is_none());
        assert!(record.error().is_none());
    }

    #[test]
    fn test_record_transitions_keep_fields_consistent() {
        let mut record = ProcessingRecord::new("id1", "a.jpg", "data:image/jpeg;base64,AAAA");

        record.apply(RecordUpdate::Processing);
        assert_eq!(record.status(), RecordStatus::Processing);
        assert!(record.result().is_none() && record.error().is_none());

        record.apply(RecordUpdate::Completed(sample_result()));
        assert_eq!(record.status(), RecordStatus::Completed);
        assert!(record.result().is_some() && record.error().is_none());

        let mut failed = ProcessingRecord::new("id2", "b.jpg", "data:image/png;base64,AAAA");
        failed.apply(RecordUpdate::Processing);
        failed.apply(RecordUpdate::Failed("failed".to_string()));
        assert_eq!(failed.status(), RecordStatus::Error);
        assert!(failed.result().is_none());
        assert_eq!(failed.error(), Some("failed"));
        assert!(failed.status().is_terminal());
    }

    #[test]
    fn test_terminal_record_ignores_updates() {
        let mut record = ProcessingRecord::new("id1", "a.jpg", "data:image/jpeg;base64,AAAA");
        assert!(record.apply(RecordUpdate::Processing));
        assert!(record.apply(RecordUpdate::Completed(sample_result())));

        assert!(!record.apply(RecordUpdate::Processing));
        assert!(!record.apply(RecordUpdate::Failed("late".to_string())));
        assert_eq!(record.status(), RecordStatus::Completed);
        assert_eq!(record.result(), Some(&sample_result()));

        let mut failed = ProcessingRecord::new("id2", "b.jpg", "data:image/jpeg;base64,AAAA");
        failed.apply(RecordUpdate::Failed("failed".to_string()));
        assert!(!failed.apply(RecordUpdate::Completed(sample_result())));
        assert_eq!(failed.error(), Some("failed"));
        assert!(failed.result().is_none());
    }

    #[test]
    fn test_recognition_result_numeric_city() {
        let json = r#"{"plateNumber": "1", "letter": 5, "city": 7,
            "vehicleType": "OTHER", "country": 971, "confidence": 0.5}"#;

        let result: RecognitionResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.letter, "5");
        assert_eq!(result.city, "7");
        assert_eq!(result.country, "971");
    }

    #[test]
    fn test_record_serialize_omits_image_data() {
        let mut record = ProcessingRecord::new("id1", "a.jpg", "data:image/jpeg;base64,SECRET");
        record.apply(RecordUpdate::Completed(sample_result()));

        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"fileName\":\"a.jpg\""));
        assert!(json.contains("\"status\":\"completed\""));
        assert!(json.contains("\"vehicleType\":\"TAXI\""));
        assert!(json.contains("\"error\":null"));
        assert!(!json.contains("SECRET"));
    }
}
