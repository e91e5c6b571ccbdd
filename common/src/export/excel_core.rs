//! Excel生成（共通ライブラリ）
//!
//! 1シート、見出し1行 + 認識結果1件につき1行の単純な表

use super::TableRow;
use crate::error::{Error, Result};
use crate::labels::{column_headers, sheet_name, Language};
use rust_xlsxwriter::*;

/// 列幅（文字数単位）
const COLUMN_WIDTHS: [f64; 6] = [16.0, 16.0, 20.0, 18.0, 24.0, 12.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 表の行データ
/// * `lang` - 見出し・シート名の言語
pub fn generate_excel_buffer(rows: &[TableRow], lang: Language) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(lang))
        .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

    if lang == Language::Ar {
        worksheet.set_right_to_left(true);
    }

    for (col, (header, width)) in column_headers(lang).iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(|e| Error::Excel(format!("列幅設定エラー: {}", e)))?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| Error::Excel(format!("見出し書き込みエラー: {}", e)))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string_with_format(row_num, col as u16, value, &value_format)
                .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(plate: &str) -> TableRow {
        [
            plate.to_string(),
            "A".to_string(),
            "Dubai".to_string(),
            "Taxi".to_string(),
            "UAE".to_string(),
            "90.0%".to_string(),
        ]
    }

    #[test]
    fn test_generate_excel_buffer_is_xlsx() {
        let buffer = generate_excel_buffer(&[row("12345"), row("67890")], Language::En).unwrap();
        // xlsx は ZIP コンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_arabic_headers() {
        let buffer = generate_excel_buffer(&[row("12345")], Language::Ar).unwrap();
        assert!(!buffer.is_empty());
    }
}
