// ==========================================
// 订单管控系统 - 订单加载器实现
// ==========================================
// 职责: 整合导入流程，从文件到订单行工作集
// 流程: 解析 → 表结构校验 → 映射 → 行过滤 → 清洗
// 红线: 失败不越过边界，返回空表 + 错误，由界面提示
// ==========================================

use crate::config::LoaderConfigReader;
use crate::domain::order::{DroppedRow, LoadReport, OrderLine};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::field_mapper::OrderFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::order_loader_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper, FileParser, RowValidator as RowValidatorTrait,
};
use crate::importer::row_validator::RowValidator;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// LoadOutcome - 加载结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub rows: Vec<OrderLine>,
    pub report: LoadReport,
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    /// 失败结果: 空表 + 错误
    pub fn failed(error: LoadError) -> Self {
        Self {
            rows: Vec::new(),
            report: LoadReport::default(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ==========================================
// OrderLoader - 订单加载器
// ==========================================
pub struct OrderLoader<C>
where
    C: LoaderConfigReader,
{
    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleanerTrait>,
    row_validator: Box<dyn RowValidatorTrait>,
}

impl<C> OrderLoader<C>
where
    C: LoaderConfigReader,
{
    /// 使用默认组件创建加载器
    pub fn new(config: C) -> Self {
        let row_validator = RowValidator::new(
            config.excluded_customer_refs(),
            config.drop_missing_customer_ref(),
        )
        .with_excluded_names(config.excluded_customer_names());

        Self::with_components(
            config,
            Box::new(UniversalFileParser),
            Box::new(OrderFieldMapper::default()),
            Box::new(DataCleaner),
            Box::new(row_validator),
        )
    }

    /// 注入自定义组件
    pub fn with_components(
        config: C,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleanerTrait>,
        row_validator: Box<dyn RowValidatorTrait>,
    ) -> Self {
        Self {
            config,
            file_parser,
            field_mapper,
            data_cleaner,
            row_validator,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 按配置中的必需列加载
    pub fn load(&self, file_path: &Path) -> LoadOutcome {
        let required = self.config.required_columns();
        self.load_with_columns(file_path, &required)
    }

    /// 加载订单表格（不返回 Err）
    ///
    /// # 参数
    /// - file_path: 表格路径（.xlsx/.xls/.csv）
    /// - required: 必需列
    ///
    /// # 返回
    /// - LoadOutcome: 失败时 rows 为空且 error 有值
    pub fn load_with_columns(&self, file_path: &Path, required: &[String]) -> LoadOutcome {
        match self.try_load(file_path, required) {
            Ok((rows, report)) => LoadOutcome {
                rows,
                report,
                error: None,
            },
            Err(e) => {
                error!(file_path = %file_path.display(), error = %e, "订单表格加载失败");
                LoadOutcome::failed(e)
            }
        }
    }

    /// 加载订单表格（返回 Err，供批处理使用）
    #[instrument(skip(self, required), fields(file_path = %file_path.display()))]
    pub fn try_load(
        &self,
        file_path: &Path,
        required: &[String],
    ) -> LoadResult<(Vec<OrderLine>, LoadReport)> {
        let start_time = Instant::now();
        info!("开始加载订单表格");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let sheet = self.config.sheet_name();
        let table = self.file_parser.parse_table(file_path, sheet.as_deref())?;
        info!(total_rows = table.len(), "文件解析完成");

        // === 步骤 2: 表结构校验 ===
        debug!("步骤 2: 必需列校验");
        let missing = self.field_mapper.missing_columns(&table.headers, required);
        if !missing.is_empty() {
            warn!(missing = ?missing, "缺少必需列");
            return Err(LoadError::MissingColumns(missing));
        }

        let mut report = LoadReport {
            total_rows: table.len(),
            ..Default::default()
        };
        let mut rows = Vec::with_capacity(table.len());

        for (idx, raw_row) in table.records.iter().enumerate() {
            // 表头占第 1 行，数据从第 2 行开始
            let row_number = idx + 2;

            // === 步骤 3: 字段映射 ===
            let record = self.field_mapper.map_to_raw_order(raw_row, row_number);

            // === 步骤 4: 行过滤 ===
            if let Some(reason) = self.row_validator.drop_reason(&record) {
                debug!(row_number, reason = ?reason, "行已剔除");
                report.dropped.push(DroppedRow {
                    row_number,
                    order_id: record.order_id.clone(),
                    reason,
                });
                continue;
            }

            // === 步骤 5: 清洗 ===
            match self.data_cleaner.clean_record(record, &mut report.warnings) {
                Some(line) => rows.push(line),
                None => report.dropped.push(DroppedRow {
                    row_number,
                    order_id: None,
                    reason: crate::domain::order::DropReason::MissingOrderId,
                }),
            }
        }

        report.loaded_rows = rows.len();
        info!(
            loaded = report.loaded_rows,
            dropped = report.dropped.len(),
            warnings = report.warnings.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "订单表格加载完成"
        );

        Ok((rows, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::domain::order::DropReason;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_missing_file_yields_empty_table() {
        let loader = OrderLoader::new(ConfigManager::default());
        let outcome = loader.load(Path::new("/nonexistent/pedidos.xlsx"));

        assert!(outcome.rows.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_missing_columns_reported() {
        let file = write_csv(&["Nr.pedido,Qtd.", "4500,1"]);
        let loader = OrderLoader::new(ConfigManager::default());

        let outcome = loader.load(file.path());

        assert!(outcome.rows.is_empty());
        match outcome.error {
            Some(LoadError::MissingColumns(cols)) => assert!(cols.contains(&"Fantasia".to_string())),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_load_with_custom_columns() {
        let file = write_csv(&[
            "Nr.pedido,Ped. Cliente,Qtd.,Valor Unit.",
            "4500,PC-1,2,10",
            "nan,PC-2,1,1",
            ",PC-3,1,1",
            "4501,TUMELERO,1,1",
            "4502,PC-4,x,3",
        ]);
        let loader = OrderLoader::new(ConfigManager::default());
        let required = vec!["Nr.pedido".to_string(), "Qtd.".to_string()];

        let outcome = loader.load_with_columns(file.path(), &required);

        assert!(outcome.is_ok());
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].total_value(), 20.0);
        assert_eq!(outcome.rows[1].quantity, 0.0);
        assert_eq!(outcome.report.total_rows, 5);
        assert_eq!(outcome.report.dropped_count(DropReason::NanOrderId), 1);
        assert_eq!(outcome.report.dropped_count(DropReason::MissingOrderId), 1);
        assert_eq!(outcome.report.dropped_count(DropReason::ExcludedCustomerRef), 1);
        assert_eq!(outcome.report.warnings.len(), 1);
        assert_eq!(outcome.report.warnings[0].row_number, 6);
    }
}
