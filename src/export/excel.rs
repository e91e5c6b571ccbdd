//! Excel出力
//!
//! completed 1件につき1行。信頼度は小数1桁のパーセント表記。

use super::timestamped_path;
use crate::error::Result;
use crate::store::ItemStore;
use plate_ai_common::export::excel_core::generate_excel_buffer;
use plate_ai_common::{table_row, Language, ProcessingRecord, TableRow};
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "license_plates";

/// スナップショットから表の行を作る（completed のみ、挿入順）
pub fn table_rows(records: &[ProcessingRecord], lang: Language) -> Vec<TableRow> {
    records
        .iter()
        .filter_map(|record| record.result())
        .map(|result| table_row(result, lang))
        .collect()
}

/// Excelを書き出す。completed が無ければ None
pub fn export_excel(store: &ItemStore, output_dir: &Path, lang: Language) -> Result<Option<PathBuf>> {
    let rows = table_rows(&store.snapshot(), lang);
    if rows.is_empty() {
        tracing::debug!("no completed records, excel export skipped");
        return Ok(None);
    }

    let buffer = generate_excel_buffer(&rows, lang)?;
    let output_path = timestamped_path(output_dir, FILE_PREFIX, "xlsx");
    std::fs::write(&output_path, buffer)?;

    tracing::info!(path = %output_path.display(), rows = rows.len(), "excel exported");
    Ok(Some(output_path))
}
