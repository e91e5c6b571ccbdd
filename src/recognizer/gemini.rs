//! Gemini API連携
//!
//! generateContent に画像1枚とシステム指示を送り、
//! responseSchema 付きの JSON 出力を要求する。

use super::Recognizer;
use crate::config::Config;
use crate::error::{PlateAiError, RecognitionFailure, Result};
use async_trait::async_trait;
use plate_ai_common::{
    build_system_instruction, extract_base64_from_data_url, extract_mime_type_from_data_url,
    parse_recognition_response, response_schema, RecognitionResult, USER_PROMPT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    system_instruction: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration, home_country: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlateAiError::Config(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            system_instruction: build_system_instruction(home_country),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
            &config.home_country,
        )
    }

    /// エンドポイントを差し替える（プロキシ等）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, image_data: &str) -> std::result::Result<GeminiRequest, RecognitionFailure> {
        let base64_data = extract_base64_from_data_url(image_data)
            .filter(|data| !data.is_empty())
            .ok_or_else(|| RecognitionFailure::InvalidImage("Data URLではありません".into()))?;
        let mime_type = extract_mime_type_from_data_url(image_data);

        Ok(GeminiRequest {
            system_instruction: Content {
                parts: vec![Part::Text { text: self.system_instruction.clone() }],
            },
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data.to_string(),
                        },
                    },
                    Part::Text { text: USER_PROMPT.to_string() },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        })
    }
}

/// レスポンス本体から最初のテキストを取り出す
fn response_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .find(|t| !t.trim().is_empty())
}

#[async_trait]
impl Recognizer for GeminiClient {
    async fn recognize(&self, image_data: &str) -> std::result::Result<RecognitionResult, RecognitionFailure> {
        let request = self.build_request(image_data)?;

        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RecognitionFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Err(RecognitionFailure::EmptyResponse);
        }

        let response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| RecognitionFailure::InvalidResponse(e.to_string()))?;
        let text = response_text(response).ok_or(RecognitionFailure::EmptyResponse)?;

        tracing::debug!(model = %self.model, len = text.len(), "gemini response received");

        Ok(parse_recognition_response(&text)?)
    }
}
