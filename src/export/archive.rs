//! ZIP出力
//!
//! completed の画像を `license_images/<ナンバー>_<文字>_<ID>.<拡張子>` で格納する。

use super::timestamped_path;
use crate::error::{PlateAiError, Result};
use crate::store::ItemStore;
use lazy_static::lazy_static;
use plate_ai_common::{decode_data_url, ProcessingRecord, RecognitionResult};
use regex::Regex;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ARCHIVE_FOLDER: &str = "license_images";
const FILE_PREFIX: &str = "plates_backup";
const FALLBACK_EXTENSION: &str = "jpg";

lazy_static! {
    /// ファイル名に使えない文字
    static ref UNSAFE_CHARS: Regex = Regex::new(r#"[\\/:*?"<>|\x00-\x1F]"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

fn sanitize_segment(segment: &str) -> String {
    UNSAFE_CHARS.replace_all(segment.trim(), "_").into_owned()
}

/// 元ファイル名の拡張子（無ければ jpg）
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| sanitize_segment(&ext.to_string_lossy()))
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// `<ナンバー or unknown>_<文字>_<ID>.<拡張子>`
pub fn entry_name(record: &ProcessingRecord, result: &RecognitionResult) -> String {
    let plate = sanitize_segment(&result.plate_number);
    let plate = if plate.is_empty() { "unknown".to_string() } else { plate };

    format!(
        "{}_{}_{}.{}",
        plate,
        sanitize_segment(&result.letter),
        record.id,
        extension_of(&record.file_name)
    )
}

/// スナップショットからZIPエントリを作る（completed のみ、挿入順）
pub fn archive_entries(records: &[ProcessingRecord]) -> Vec<ArchiveEntry> {
    records
        .iter()
        .filter_map(|record| record.result().map(|result| (record, result)))
        .filter_map(|(record, result)| match decode_data_url(&record.image_data) {
            Ok(data) => Some(ArchiveEntry {
                name: entry_name(record, result),
                data,
            }),
            Err(err) => {
                tracing::warn!(id = %record.id, error = %err, "image data not decodable, skipped");
                None
            }
        })
        .collect()
}

/// ZIPをバッファに生成
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.add_directory(format!("{}/", ARCHIVE_FOLDER), options)
        .map_err(|e| PlateAiError::Export(format!("ZIPフォルダ作成エラー: {}", e)))?;

    for entry in entries {
        zip.start_file(format!("{}/{}", ARCHIVE_FOLDER, entry.name), options)
            .map_err(|e| PlateAiError::Export(format!("ZIPエントリ作成エラー: {}", e)))?;
        zip.write_all(&entry.data)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| PlateAiError::Export(format!("ZIP保存エラー: {}", e)))?;
    Ok(cursor.into_inner())
}

/// ZIPを書き出す。completed が無ければ None
pub fn export_archive(store: &ItemStore, output_dir: &Path) -> Result<Option<PathBuf>> {
    let snapshot = store.snapshot();
    if !snapshot.iter().any(|r| r.result().is_some()) {
        tracing::debug!("no completed records, archive export skipped");
        return Ok(None);
    }

    let entries = archive_entries(&snapshot);
    let buffer = build_archive(&entries)?;
    let output_path = timestamped_path(output_dir, FILE_PREFIX, "zip");
    std::fs::write(&output_path, buffer)?;

    tracing::info!(path = %output_path.display(), entries = entries.len(), "archive exported");
    Ok(Some(output_path))
}
