// ==========================================
// 订单管控系统 - 通用表格写出
// ==========================================
// 用途: 合并工具输出（单工作表）
// 规则: 形如数字的单元格按数字写出，其余按文本
// ==========================================

use crate::export::error::ExportResult;
use crate::importer::order_loader_trait::RawTable;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::info;

fn as_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // 保留前导零的编码（如 "0123"）按文本写出
    if trimmed.len() > 1 && trimmed.starts_with('0') && !trimmed.starts_with("0.") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 构建单工作表工作簿
fn build_workbook(table: &RawTable, sheet_name: &str) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (idx, record) in table.records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, header) in table.headers.iter().enumerate() {
            let Some(value) = record.get(header) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match as_number(value) {
                Some(n) => worksheet.write_number(row, col as u16, n)?,
                None => worksheet.write_string(row, col as u16, value)?,
            };
        }
    }

    Ok(workbook)
}

/// 写出到文件
pub fn write_table(table: &RawTable, sheet_name: &str, path: &Path) -> ExportResult<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path)?;
    info!(path = %path.display(), rows = table.len(), "表格已写出");
    Ok(())
}

/// 写出到内存
pub fn write_table_to_buffer(table: &RawTable, sheet_name: &str) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}
