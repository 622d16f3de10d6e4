// ==========================================
// 订单管控系统 - 数据清洗器实现
// ==========================================
// 职责: 订单号文本化 / 数值宽松解析 / 日期解析
// 红线: 坏单元格替换为 0 或 null 并记录告警，绝不中断导入
// ==========================================

use crate::domain::columns;
use crate::domain::order::{CoercionWarning, OrderLine, RawOrderRecord};
use crate::importer::order_loader_trait::DataCleaner as DataCleanerTrait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

// 支持的日期时间格式（依次尝试）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d", "%d-%m-%Y"];

pub struct DataCleaner;

impl DataCleaner {
    /// 解析数值文本，兼容 "1234.5" / "1.234,5" / "1234,5"
    pub fn parse_number(value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(v) = trimmed.parse::<f64>() {
            return v.is_finite().then_some(v);
        }

        // 巴西格式: 千分位 '.'，小数位 ','
        if trimmed.contains(',') {
            let normalized = trimmed.replace('.', "").replace(',', ".");
            if let Ok(v) = normalized.parse::<f64>() {
                return v.is_finite().then_some(v);
            }
        }

        None
    }

    /// Excel 序列号 → 日期时间（1899-12-30 起算）
    fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
        // 合理范围: 1900 年至 2200 年
        if !(1.0..=110_000.0).contains(&serial) {
            return None;
        }
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        let millis = (serial * 86_400_000.0).round() as i64;
        epoch.checked_add_signed(Duration::milliseconds(millis))
    }

    /// 解析日期时间文本
    pub fn parse_datetime_text(value: &str) -> Option<NaiveDateTime> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt);
            }
        }

        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        }

        // 纯数字按 Excel 序列号处理（YYYYMMDD 已在上面优先匹配）
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Self::from_excel_serial)
    }

    fn warn(
        warnings: &mut Vec<CoercionWarning>,
        row_number: usize,
        field: &str,
        raw: &str,
        substituted: &str,
    ) {
        debug!(row_number, field, raw_value = raw, substituted, "单元格类型转换失败");
        warnings.push(CoercionWarning {
            row_number,
            field: field.to_string(),
            raw_value: raw.to_string(),
            substituted: substituted.to_string(),
        });
    }
}

impl DataCleanerTrait for DataCleaner {
    fn normalize_order_id(&self, value: Option<&str>) -> Option<String> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            return None;
        }

        // 数值列转文本的遗留形态: "4500.0" → "4500"
        if let Some(integer) = trimmed.strip_suffix(".0") {
            if !integer.is_empty() && integer.chars().all(|c| c.is_ascii_digit()) {
                return Some(integer.to_string());
            }
        }

        Some(trimmed.to_string())
    }

    fn parse_amount(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> f64 {
        match value {
            None => 0.0,
            Some(raw) => match Self::parse_number(raw) {
                Some(v) => v,
                None => {
                    Self::warn(warnings, row_number, field, raw, "0");
                    0.0
                }
            },
        }
    }

    fn parse_optional_quantity(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<f64> {
        let raw = value?;
        let parsed = Self::parse_number(raw);
        if parsed.is_none() {
            Self::warn(warnings, row_number, field, raw, "null");
        }
        parsed
    }

    fn parse_datetime(
        &self,
        value: Option<&str>,
        field: &str,
        row_number: usize,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<NaiveDateTime> {
        let raw = value?;
        let parsed = Self::parse_datetime_text(raw);
        if parsed.is_none() {
            Self::warn(warnings, row_number, field, raw, "null");
        }
        parsed
    }

    fn clean_record(
        &self,
        record: RawOrderRecord,
        warnings: &mut Vec<CoercionWarning>,
    ) -> Option<OrderLine> {
        let row = record.row_number;
        let order_id = self.normalize_order_id(record.order_id.as_deref())?;

        Some(OrderLine {
            order_id,
            customer_order_ref: record.customer_order_ref.unwrap_or_default(),
            customer_display_name: record.customer_display_name.unwrap_or_default(),
            product_code: record.product_code.unwrap_or_default(),
            model_code: record.model_code.unwrap_or_default(),
            order_date: self.parse_datetime(
                record.order_date.as_deref(),
                columns::ORDER_DATE,
                row,
                warnings,
            ),
            invoice_date: self.parse_datetime(
                record.invoice_date.as_deref(),
                columns::INVOICE_DATE,
                row,
                warnings,
            ),
            expected_delivery_date: self.parse_datetime(
                record.expected_delivery_date.as_deref(),
                columns::EXPECTED_DELIVERY_DATE,
                row,
                warnings,
            ),
            quantity: self.parse_amount(record.quantity.as_deref(), columns::QUANTITY, row, warnings),
            unit_price: self.parse_amount(
                record.unit_price.as_deref(),
                columns::UNIT_PRICE,
                row,
                warnings,
            ),
            quantity_to_produce: self.parse_optional_quantity(
                record.quantity_to_produce.as_deref(),
                columns::QUANTITY_TO_PRODUCE,
                row,
                warnings,
            ),
            quantity_produced: self.parse_optional_quantity(
                record.quantity_produced.as_deref(),
                columns::QUANTITY_PRODUCED,
                row,
                warnings,
            ),
            quantity_to_release: self.parse_optional_quantity(
                record.quantity_to_release.as_deref(),
                columns::QUANTITY_TO_RELEASE,
                row,
                warnings,
            ),
            origin: record.origin,
            split: None,
            row_number: row,
        })
    }
}
