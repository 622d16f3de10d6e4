// ==========================================
// 订单管控系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{LoadError, LoadResult};
use crate::importer::order_loader_trait::{FileParser, RawTable};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ==========================================
// 公共辅助
// ==========================================

/// 重复表头按出现次数追加 ".1"/".2"，与常见表格工具的去重规则一致
fn dedup_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .map(|h| {
            let count = seen.entry(h.clone()).or_insert(0);
            let name = if *count == 0 {
                h.clone()
            } else {
                format!("{}.{}", h, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn check_exists(path: &Path) -> LoadResult<()> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 根据表头行猜测分隔符（',' 或 ';'）
    fn sniff_delimiter(content: &str) -> u8 {
        let header_line = content.lines().next().unwrap_or("");
        let commas = header_line.matches(',').count();
        let semicolons = header_line.matches(';').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }
}

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path, _sheet: Option<&str>) -> LoadResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        check_exists(path)?;

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(LoadError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let content = fs::read_to_string(path)?;
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(Self::sniff_delimiter(content))
            .from_reader(content.as_bytes());

        // 读取表头
        let headers = dedup_headers(
            reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
        );

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(RawTable { headers, records })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 文本
    ///
    /// 日期单元格统一输出 "YYYY-MM-DD HH:MM:SS"，错误单元格视为空
    fn cell_to_text(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_datetime()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| cell.to_string().trim().to_string()),
            _ => cell.to_string().trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path, sheet: Option<&str>) -> LoadResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        check_exists(path)?;

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(LoadError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;

        // 选择工作表
        let sheet_names = workbook.sheet_names();
        let sheet_name = match sheet {
            Some(name) => sheet_names
                .iter()
                .find(|s| s.as_str() == name)
                .cloned()
                .ok_or_else(|| LoadError::SheetNotFound(name.to_string()))?,
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| LoadError::ExcelParseError("Excel 文件无工作表".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| LoadError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers = dedup_headers(header_row.iter().map(Self::cell_to_text).collect());

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_to_text(cell));
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(RawTable { headers, records })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_table(&self, file_path: &Path, sheet: Option<&str>) -> LoadResult<RawTable> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_table(file_path, sheet),
            "xlsx" | "xls" => ExcelParser.parse_table(file_path, sheet),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}
