// ==========================================
// 订单管控系统 - 看板 API
// ==========================================
// 职责: 每次交互整体重算 加载 → 拆分 → 判定 → 状态 → 筛选 → 汇总
// 架构: API 层 → 导入层 (OrderLoader + LoadCache) → 引擎层 (pipeline)
// 红线: 加载失败不抛出，快照带空表与错误
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, LoaderConfigReader};
use crate::dashboard::{
    filter_options, select_view, stage_notifications, DashboardMetrics, DashboardView,
    FilterOptions, StageNotifications, ViewFilter,
};
use crate::domain::order::{ClassifiedOrder, LoadReport};
use crate::engine::{classify_and_score, ClassifiedRows, PipelineOptions};
use crate::export::ViewExporter;
use crate::importer::{LoadCache, LoadError, OrderLoader};
use crate::merge::{run_merge, MergeSummary};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

// ==========================================
// DashboardSnapshot - 单次交互的完整数据
// ==========================================
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub source: PathBuf,
    pub rows: ClassifiedRows,
    pub report: LoadReport,
    pub error: Option<LoadError>,
    pub generated_at: NaiveDateTime,
}

impl DashboardSnapshot {
    pub fn view(&self, view: DashboardView, filter: &ViewFilter) -> Vec<&ClassifiedOrder> {
        select_view(&self.rows, view, filter)
    }

    pub fn filter_options(&self, view: DashboardView) -> FilterOptions {
        filter_options(&self.rows, view)
    }

    /// 总览视图的指标（受筛选条件影响）
    pub fn metrics(&self, filter: &ViewFilter) -> DashboardMetrics {
        DashboardMetrics::compute(self.view(DashboardView::Portfolio, filter))
    }
}

// ==========================================
// OrderApi
// ==========================================
pub struct OrderApi {
    loader: OrderLoader<ConfigManager>,
    cache: LoadCache,
}

impl OrderApi {
    pub fn new(config: ConfigManager) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs());
        Self {
            loader: OrderLoader::new(config),
            cache: LoadCache::new(ttl),
        }
    }

    pub fn config(&self) -> &ConfigManager {
        self.loader.config()
    }

    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::from_config(self.config())
    }

    /// 按配置中的表格路径生成快照
    pub fn snapshot(&mut self, now: NaiveDateTime, force_refresh: bool) -> ApiResult<DashboardSnapshot> {
        let path = self
            .config()
            .config()
            .input_path
            .clone()
            .ok_or(ApiError::NoInputConfigured)?;
        Ok(self.snapshot_from(&path, now, force_refresh))
    }

    /// 从指定表格生成快照
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn snapshot_from(
        &mut self,
        path: &Path,
        now: NaiveDateTime,
        force_refresh: bool,
    ) -> DashboardSnapshot {
        let required = self.config().required_columns();
        let loader = &self.loader;
        let outcome = self
            .cache
            .get_or_load(path, &required, force_refresh, || loader.load_with_columns(path, &required));

        if let Some(e) = &outcome.error {
            warn!(error = %e, "快照使用空表");
        }

        let rows = classify_and_score(outcome.rows, now, &self.pipeline_options());
        info!(rows = rows.len(), "快照生成完成");

        DashboardSnapshot {
            source: path.to_path_buf(),
            rows,
            report: outcome.report,
            error: outcome.error,
            generated_at: now,
        }
    }

    /// 各工序提醒
    pub fn notifications(&self, snapshot: &DashboardSnapshot) -> Vec<StageNotifications> {
        let deriver = self.pipeline_options().status_deriver();
        stage_notifications(&snapshot.rows, &deriver, snapshot.generated_at)
    }

    /// 导出视图（按配置列与语言）
    pub fn export_view(
        &self,
        snapshot: &DashboardSnapshot,
        view: DashboardView,
        filter: &ViewFilter,
    ) -> ApiResult<Vec<u8>> {
        let app = self.config().config();
        let exporter = ViewExporter::new(app.export_columns.clone(), app.locale.clone());
        Ok(exporter.export(snapshot.view(view, filter))?)
    }

    /// 合并订单表与补货表
    pub fn merge(
        &self,
        orders: &Path,
        fulfillment: &Path,
        output: &Path,
    ) -> ApiResult<MergeSummary> {
        Ok(run_merge(&self.config().config().merge, orders, fulfillment, output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_snapshot_without_input_path() {
        let mut api = OrderApi::new(ConfigManager::from_config(AppConfig::default()));
        assert!(matches!(api.snapshot(now(), false), Err(ApiError::NoInputConfigured)));
    }

    #[test]
    fn test_snapshot_of_missing_file_is_empty() {
        let mut api = OrderApi::new(ConfigManager::default());
        let snapshot = api.snapshot_from(Path::new("/nonexistent/pedidos.xlsx"), now(), false);

        assert!(snapshot.rows.is_empty());
        assert!(matches!(snapshot.error, Some(LoadError::FileNotFound(_))));
        assert_eq!(snapshot.metrics(&ViewFilter::default()).item_count, 0);
        assert_eq!(api.notifications(&snapshot).len(), 5);
    }
}
