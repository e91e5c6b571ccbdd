use plate_ai_rust::common::{encode_data_url, VehicleType};
use plate_ai_rust::recognizer::{GeminiClient, Recognizer};
use std::time::Duration;

/// 実APIを叩く。GEMINI_API_KEY と PLATE_AI_TEST_IMAGE が無ければスキップ
#[tokio::test]
async fn gemini_recognize_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };
    let image_path = match std::env::var("PLATE_AI_TEST_IMAGE") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("PLATE_AI_TEST_IMAGE not set; skipping integration test");
            return;
        }
    };

    let bytes = std::fs::read(&image_path).expect("failed to read test image");
    let client = GeminiClient::new(
        api_key,
        "gemini-2.0-flash".to_string(),
        Duration::from_secs(60),
        "United Arab Emirates",
    )
    .expect("failed to build client");

    let result = client
        .recognize(&encode_data_url(&bytes, "image/jpeg"))
        .await
        .expect("recognition failed");

    assert!(VehicleType::ALL.contains(&result.vehicle_type));
    assert!((0.0..=1.0).contains(&result.confidence));
}
