//! エクスポート
//!
//! どちらもストアのスナップショットから completed のものだけを使う。
//! 対象が0件なら何も書かずに `Ok(None)` を返す。

pub mod archive;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::store::ItemStore;
use plate_ai_common::Language;
use std::path::{Path, PathBuf};

/// `<prefix>_<unix-millis>.<ext>`。同名があれば連番を付ける
pub fn timestamped_path(output_dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stamp = chrono::Utc::now().timestamp_millis();
    let mut path = output_dir.join(format!("{}_{}.{}", prefix, stamp, extension));

    let mut n = 1;
    while path.exists() {
        path = output_dir.join(format!("{}_{}_{}.{}", prefix, stamp, n, extension));
        n += 1;
    }
    path
}

/// 書き出したファイル
#[derive(Debug, Default)]
pub struct ExportOutput {
    pub excel: Option<PathBuf>,
    pub archive: Option<PathBuf>,
}

pub fn export_results(
    store: &ItemStore,
    format: &ExportFormat,
    output_dir: &Path,
    lang: Language,
) -> Result<ExportOutput> {
    std::fs::create_dir_all(output_dir)?;

    let mut output = ExportOutput::default();

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        output.excel = excel::export_excel(store, output_dir, lang)?;
    }
    if matches!(format, ExportFormat::Zip | ExportFormat::Both) {
        output.archive = archive::export_archive(store, output_dir)?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_timestamped_path_unique() {
        let dir = tempdir().unwrap();
        let first = timestamped_path(dir.path(), "license_plates", "xlsx");
        std::fs::write(&first, b"x").unwrap();
        let second = timestamped_path(dir.path(), "license_plates", "xlsx");

        assert_ne!(first, second);
        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("license_plates_"));
        assert!(name.ends_with(".xlsx"));
    }
}
