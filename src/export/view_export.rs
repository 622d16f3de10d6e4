// ==========================================
// 订单管控系统 - 看板视图导出
// ==========================================
// 职责: 把筛选后的视图写成内存中的 xlsx 快照
// 输出: 单个工作表 "Relatorio"，只含展示列子集
// ==========================================

use crate::dashboard::views::DashboardView;
use crate::domain::columns;
use crate::domain::order::ClassifiedOrder;
use crate::domain::types::Stage;
use crate::export::error::{ExportError, ExportResult};
use crate::i18n;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::{info, instrument};

/// 导出工作表名
pub const REPORT_SHEET_NAME: &str = "Relatorio";

/// 导出日期格式（加载器可直接读回）
const DATE_FORMAT: &str = "%d/%m/%Y";

/// 单元格取值
#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

fn date_cell(value: Option<NaiveDateTime>) -> CellValue {
    value
        .map(|d| CellValue::Text(d.format(DATE_FORMAT).to_string()))
        .unwrap_or(CellValue::Empty)
}

fn optional_number(value: Option<f64>) -> CellValue {
    value.map(CellValue::Number).unwrap_or(CellValue::Empty)
}

/// 视图默认导出文件名
pub fn default_file_name(view: DashboardView) -> &'static str {
    match view {
        DashboardView::Portfolio => "relatorio_dataframe.xlsx",
        DashboardView::Stage(stage) => match stage {
            Stage::Separation => "separacao.xlsx",
            Stage::Purchasing => "itens_compras.xlsx",
            Stage::Packaging => "itens_embalagem.xlsx",
            Stage::Shipping => "itens_expedicao.xlsx",
            Stage::NoWorkOrder => "nao_gerado_oe.xlsx",
        },
    }
}

// ==========================================
// ViewExporter - 视图导出器
// ==========================================
#[derive(Debug, Clone)]
pub struct ViewExporter {
    columns: Vec<String>,
    locale: String,
}

impl ViewExporter {
    /// # 参数
    /// - columns: 导出列（按顺序）
    /// - locale: 工序/状态标签所用语言
    pub fn new(columns: Vec<String>, locale: impl Into<String>) -> Self {
        Self {
            columns,
            locale: locale.into(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn resolve_column(name: &str) -> Option<&'static str> {
        const KNOWN: [&str; 17] = [
            columns::STAGE,
            columns::STATUS,
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
        let wanted = name.trim().to_lowercase();
        KNOWN.iter().copied().find(|c| c.to_lowercase() == wanted)
    }

    fn cell_value(&self, row: &ClassifiedOrder, column: &str) -> CellValue {
        let line = &row.line;
        match column {
            columns::STAGE => CellValue::Text(i18n::stage_label_in(row.stage, &self.locale)),
            columns::STATUS => CellValue::Text(i18n::status_label_in(row.status, &self.locale)),
            columns::ORDER_ID => CellValue::Text(line.order_id.clone()),
            columns::CUSTOMER_ORDER_REF => CellValue::Text(line.customer_order_ref.clone()),
            columns::CUSTOMER_DISPLAY_NAME => CellValue::Text(line.customer_display_name.clone()),
            columns::PRODUCT_CODE => CellValue::Text(line.product_code.clone()),
            columns::MODEL_CODE => CellValue::Text(line.model_code.clone()),
            columns::ORDER_DATE => date_cell(line.order_date),
            columns::EXPECTED_DELIVERY_DATE => date_cell(line.expected_delivery_date),
            columns::INVOICE_DATE => date_cell(line.invoice_date),
            columns::QUANTITY => CellValue::Number(line.quantity),
            columns::UNIT_PRICE => CellValue::Number(line.unit_price),
            columns::TOTAL_VALUE => CellValue::Number(line.total_value()),
            columns::QUANTITY_TO_PRODUCE => optional_number(line.quantity_to_produce),
            columns::QUANTITY_PRODUCED => optional_number(line.quantity_produced),
            columns::QUANTITY_TO_RELEASE => optional_number(line.quantity_to_release),
            columns::ORIGIN => line
                .origin
                .clone()
                .map(CellValue::Text)
                .unwrap_or(CellValue::Empty),
            _ => CellValue::Empty,
        }
    }

    fn write_cell(ws: &mut Worksheet, row: u32, col: u16, value: CellValue) -> ExportResult<()> {
        match value {
            CellValue::Text(s) => {
                ws.write_string(row, col, s)?;
            }
            CellValue::Number(n) => {
                ws.write_number(row, col, n)?;
            }
            CellValue::Empty => {}
        }
        Ok(())
    }

    /// 导出视图为 xlsx 字节
    #[instrument(skip(self, rows))]
    pub fn export<'a, I>(&self, rows: I) -> ExportResult<Vec<u8>>
    where
        I: IntoIterator<Item = &'a ClassifiedOrder>,
    {
        if self.columns.is_empty() {
            return Err(ExportError::NoColumns);
        }

        let resolved = self
            .columns
            .iter()
            .map(|c| Self::resolve_column(c).ok_or_else(|| ExportError::UnknownColumn(c.clone())))
            .collect::<ExportResult<Vec<&'static str>>>()?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(REPORT_SHEET_NAME)?;

        for (col, name) in resolved.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }

        let mut written = 0u32;
        for row in rows {
            written += 1;
            for (col, name) in resolved.iter().enumerate() {
                Self::write_cell(worksheet, written, col as u16, self.cell_value(row, name))?;
            }
        }

        let buffer = workbook.save_to_buffer()?;
        info!(rows = written, bytes = buffer.len(), "视图导出完成");
        Ok(buffer)
    }
}

/// 按默认列与语言导出
pub fn export_view<'a, I>(rows: I) -> ExportResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a ClassifiedOrder>,
{
    ViewExporter::new(columns::default_export_columns(), i18n::DEFAULT_LOCALE).export(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderLine;
    use crate::domain::types::{DeliveryStatus, StageRule};
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn classified() -> ClassifiedOrder {
        let mut line = OrderLine::new("4500");
        line.customer_order_ref = "PC-1".to_string();
        line.quantity = 3.0;
        line.unit_price = 2.5;
        ClassifiedOrder {
            line,
            stage: Stage::Separation,
            stage_rule: StageRule::ParentWithoutRelease,
            status: DeliveryStatus::Pending,
        }
    }

    #[test]
    fn test_export_view_reads_back() {
        let row = classified();
        let bytes = export_view([&row]).unwrap();

        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(REPORT_SHEET_NAME).unwrap();

        assert_eq!(range.get((0, 0)), Some(&Data::String("Setor".to_string())));
        assert_eq!(range.get((1, 0)), Some(&Data::String("Separação".to_string())));
        assert_eq!(range.get((1, 8)), Some(&Data::Float(7.5)));
        assert_eq!(range.get((1, 14)), Some(&Data::String("4500".to_string())));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let row = classified();
        let exporter = ViewExporter::new(vec!["Coluna X".to_string()], "pt-BR");

        assert!(matches!(
            exporter.export([&row]),
            Err(ExportError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(
            default_file_name(DashboardView::Stage(Stage::Separation)),
            "separacao.xlsx"
        );
        assert_eq!(
            default_file_name(DashboardView::Portfolio),
            "relatorio_dataframe.xlsx"
        );
    }
}
