//! 表示ラベル（アラビア語・英語）
//!
//! エクスポートの見出しと車両区分の表示名。既定はアラビア語。

use crate::types::{RecordStatus, VehicleType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ar" | "arabic" => Ok(Language::Ar),
            "en" | "english" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}. Use ar or en", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Ar => write!(f, "ar"),
            Language::En => write!(f, "en"),
        }
    }
}

/// 表の列見出し（ナンバー, 文字, 都市, 車両区分, 国, 信頼度）
pub fn column_headers(lang: Language) -> [&'static str; 6] {
    match lang {
        Language::Ar => [
            "رقم اللوحة",
            "الفئة / الحرف",
            "الجهة / المدينة",
            "نوع المركبة",
            "تصنيف الدولة",
            "دقة التحليل",
        ],
        Language::En => [
            "Plate Number",
            "Category / Letter",
            "Region / City",
            "Vehicle Type",
            "Country Classification",
            "Confidence",
        ],
    }
}

pub fn vehicle_type_label(lang: Language, vehicle_type: VehicleType) -> &'static str {
    match (lang, vehicle_type) {
        (Language::Ar, VehicleType::Private) => "خصوصي (ملاكي)",
        (Language::Ar, VehicleType::Taxi) => "أجرة (تاكسي)",
        (Language::Ar, VehicleType::Police) => "شرطة / أمن",
        (Language::Ar, VehicleType::Ambulance) => "إسعاف / طوارئ",
        (Language::Ar, VehicleType::Other) => "أخرى",
        (Language::En, VehicleType::Private) => "Private",
        (Language::En, VehicleType::Taxi) => "Taxi",
        (Language::En, VehicleType::Police) => "Police",
        (Language::En, VehicleType::Ambulance) => "Ambulance",
        (Language::En, VehicleType::Other) => "Other",
    }
}

pub fn status_label(lang: Language, status: RecordStatus) -> &'static str {
    match (lang, status) {
        (Language::Ar, RecordStatus::Pending) => "في الانتظار",
        (Language::Ar, RecordStatus::Processing) => "جاري التحليل...",
        (Language::Ar, RecordStatus::Completed) => "تم التحليل",
        (Language::Ar, RecordStatus::Error) => "خطأ في المعالجة",
        (Language::En, RecordStatus::Pending) => "Pending",
        (Language::En, RecordStatus::Processing) => "Analyzing...",
        (Language::En, RecordStatus::Completed) => "Analyzed",
        (Language::En, RecordStatus::Error) => "Error",
    }
}

/// 認識失敗時にユーザーへ見せる汎用メッセージ
pub fn failure_message(lang: Language) -> &'static str {
    match lang {
        Language::Ar => "فشل في تحليل الصورة",
        Language::En => "Failed to analyze image",
    }
}

pub fn sheet_name(lang: Language) -> &'static str {
    match lang {
        Language::Ar => "النتائج",
        Language::En => "Results",
    }
}
