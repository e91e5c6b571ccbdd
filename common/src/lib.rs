//! Plate AI Common Library
//!
//! ナンバープレート認識で共有される型とユーティリティ

pub mod types;
pub mod labels;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod data_url;
pub mod export;

pub use types::{ProcessingRecord, RecognitionResult, RecordStatus, RecordUpdate, VehicleType};
pub use labels::Language;
pub use error::{Error, Result};
pub use parser::{extract_json, parse_recognition_response, validate_recognition};
pub use prompts::{build_system_instruction, response_schema, USER_PROMPT};
pub use data_url::{
    decode_data_url, encode_data_url, extract_base64_from_data_url,
    extract_mime_type_from_data_url, mime_type_for_extension,
};
pub use export::{table_row, TableRow};
