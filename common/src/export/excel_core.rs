//! Excel生成（共通ライブラリ）
//!
//! 一括照合の結果を1シートの表としてxlsxに書き出す

use crate::types::BatchRow;
use rust_xlsxwriter::*;

/// シート名
pub const SHEET_NAME: &str = "Lookup Results";

/// 列幅（文字数）
const COLUMN_WIDTHS: [f64; 7] = [18.0, 12.0, 18.0, 18.0, 30.0, 11.0, 40.0];

/// Confidence列
const CONFIDENCE_COL: u16 = 5;

/// 照合結果のExcelをバッファに生成
///
/// 列順はCSVと同じ。信頼度は数値セルで書く。
pub fn generate_results_excel_buffer(rows: &[BatchRow]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let not_found_format = Format::new().set_font_color(Color::RGB(0xCC3333));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    for (col, header) in BatchRow::HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        let not_found = row.match_type == crate::types::MatchKind::NotFound;

        for (col, value) in row.cells().iter().enumerate() {
            let col = col as u16;
            let result = if col == CONFIDENCE_COL {
                worksheet.write_number(excel_row, col, f64::from(row.confidence))
            } else if not_found {
                worksheet.write_string_with_format(excel_row, col, value, &not_found_format)
            } else {
                worksheet.write_string(excel_row, col, value)
            };
            result.map_err(|e| format!("セル書き込みエラー: {}", e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    if !rows.is_empty() {
        worksheet
            .autofilter(0, 0, rows.len() as u32, (BatchRow::HEADERS.len() - 1) as u16)
            .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
