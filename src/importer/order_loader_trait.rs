// ==========================================
// 订单管控系统 - 订单导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 表结构校验 → 字段映射 → 清洗 → 行过滤
// ==========================================

use crate::domain::order::{CoercionWarning, DropReason, OrderLine, RawOrderRecord};
use crate::importer::error::LoadResult;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawTable - 解析后的原始表
// ==========================================
// 保留表头顺序，合并工具与必需列校验都依赖它
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser
pub trait FileParser {
    /// 解析文件为原始表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名（仅 Excel 有效，None = 第一个工作表）
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录（HashMap<列名, 值>）
    /// - Err: 文件读取错误、格式错误
    fn parse_table(&self, file_path: &Path, sheet: Option<&str>) -> LoadResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 2）
// 实现者: OrderFieldMapper
pub trait FieldMapper {
    /// 将原始行记录映射为 RawOrderRecord（不做类型转换）
    fn map_to_raw_order(&self, row: &HashMap<String, String>, row_number: usize)
        -> RawOrderRecord;

    /// 返回表头中缺失的必需列
    fn missing_columns(&self, headers: &[String], required: &[String]) -> Vec<String>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 3）
// 红线: 坏单元格不阻断导入，替换为 0 / null 并记录告警
pub trait DataCleaner {
    /// 标准化订单号为文本（"4500.0" → "4500"）
    fn normalize_order_id(&self, value: Option<&str>) -> Option<String>;

    /// 解析金额/数量，失败时为 0
    fn parse_amount(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> f64;

    /// 解析可空数量，失败时为 None
    fn parse_optional_quantity(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<f64>;

    /// 解析日期时间，失败时为 None
    fn parse_datetime(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<NaiveDateTime>;

    /// 将映射后的记录清洗为订单行；订单号缺失时返回 None
    fn clean_record(
        &self,
        record: RawOrderRecord,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<OrderLine>;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 行过滤接口（阶段 4）
pub trait RowValidator {
    /// 判断记录是否应被剔除
    ///
    /// # 返回
    /// - Some(DropReason): 剔除原因
    /// - None: 保留
    fn drop_reason(&self, record: &RawOrderRecord) -> Option<DropReason>;
}
