// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成订单表格夹具（xlsx / csv）、构造订单行、固定时间
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use order_control::domain::columns;
use order_control::OrderLine;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 夹具表头（必需列 + Origem）
pub const FIXTURE_HEADERS: [&str; 15] = [
    columns::ORDER_ID,
    columns::CUSTOMER_ORDER_REF,
    columns::ORDER_DATE,
    columns::CUSTOMER_DISPLAY_NAME,
    columns::PRODUCT_CODE,
    columns::MODEL_CODE,
    columns::QUANTITY,
    columns::UNIT_PRICE,
    columns::TOTAL_VALUE,
    columns::QUANTITY_TO_PRODUCE,
    columns::QUANTITY_PRODUCED,
    columns::QUANTITY_TO_RELEASE,
    columns::EXPECTED_DELIVERY_DATE,
    columns::INVOICE_DATE,
    columns::ORIGIN,
];

const NUMERIC_COLUMNS: [&str; 6] = [
    columns::QUANTITY,
    columns::UNIT_PRICE,
    columns::TOTAL_VALUE,
    columns::QUANTITY_TO_PRODUCE,
    columns::QUANTITY_PRODUCED,
    columns::QUANTITY_TO_RELEASE,
];

const DATE_COLUMNS: [&str; 3] = [
    columns::ORDER_DATE,
    columns::EXPECTED_DELIVERY_DATE,
    columns::INVOICE_DATE,
];

/// 固定的"当前时间"
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

// ==========================================
// FixtureRow - 表格中的一行（全部按文本描述）
// ==========================================
#[derive(Debug, Clone)]
pub struct FixtureRow {
    cells: Vec<(&'static str, String)>,
}

impl FixtureRow {
    pub fn new(order_id: &str) -> Self {
        let mut row = Self { cells: Vec::new() };
        row.set(columns::ORDER_ID, order_id)
            .set(columns::CUSTOMER_ORDER_REF, &format!("PC-{}", order_id))
            .set(columns::ORDER_DATE, "2024-10-01")
            .set(columns::CUSTOMER_DISPLAY_NAME, "ACME")
            .set(columns::PRODUCT_CODE, "P100")
            .set(columns::MODEL_CODE, "M1")
            .set(columns::QUANTITY, "10")
            .set(columns::UNIT_PRICE, "2.5")
            .set(columns::TOTAL_VALUE, "999");
        row
    }

    pub fn set(&mut self, column: &'static str, value: &str) -> &mut Self {
        self.cells.retain(|(c, _)| *c != column);
        self.cells.push((column, value.to_string()));
        self
    }

    pub fn with(mut self, column: &'static str, value: &str) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> &str {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// 写出订单 xlsx（数字列写数字，日期列写真实 Excel 日期）
pub fn write_orders_xlsx(
    rows: &[FixtureRow],
    sheet_name: &str,
) -> Result<NamedTempFile, Box<dyn Error>> {
    let file = Builder::new().suffix(".xlsx").tempfile()?;

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in FIXTURE_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, header) in FIXTURE_HEADERS.iter().enumerate() {
            let value = row.get(header);
            if value.is_empty() {
                continue;
            }
            let c = col as u16;
            if NUMERIC_COLUMNS.contains(header) {
                match value.parse::<f64>() {
                    Ok(n) => worksheet.write_number(r, c, n)?,
                    Err(_) => worksheet.write_string(r, c, value)?,
                };
            } else if DATE_COLUMNS.contains(header) {
                match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                    Ok(d) => {
                        use chrono::Datelike;
                        let date =
                            ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
                        worksheet.write_datetime_with_format(r, c, &date, &date_format)?;
                    }
                    Err(_) => {
                        worksheet.write_string(r, c, value)?;
                    }
                }
            } else {
                worksheet.write_string(r, c, value)?;
            }
        }
    }

    workbook.save(file.path())?;
    Ok(file)
}

/// 写出订单 csv（';' 分隔，巴西数字格式原样保留）
pub fn write_orders_csv(rows: &[FixtureRow]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(".csv").tempfile()?;
    writeln!(file, "{}", FIXTURE_HEADERS.join(";"))?;
    for row in rows {
        let line: Vec<&str> = FIXTURE_HEADERS.iter().map(|h| row.get(h)).collect();
        writeln!(file, "{}", line.join(";"))?;
    }
    file.flush()?;
    Ok(file)
}

/// 构造放行子单
pub fn release_line(
    order_id: &str,
    produced: Option<f64>,
    to_produce: Option<f64>,
    to_release: Option<f64>,
) -> OrderLine {
    let mut line = OrderLine::new(order_id);
    line.quantity = 10.0;
    line.unit_price = 2.0;
    line.quantity_produced = produced;
    line.quantity_to_produce = to_produce;
    line.quantity_to_release = to_release;
    line
}
