// ==========================================
// 订单管控系统 - 加载缓存
// ==========================================
// 职责: 按 (文件路径, 必需列) 记忆加载结果，降低交互延迟
// 失效: 文件修改时间变化 / 超过有效期 / 强制刷新
// 红线: 缓存只影响延迟，不影响正确性；失败结果不缓存
// ==========================================

use crate::importer::order_loader::LoadOutcome;
use moka::sync::Cache;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// 默认最多缓存的 (文件, 必需列) 组合数
pub const DEFAULT_MAX_ENTRIES: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    required: Vec<String>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: LoadOutcome,
    modified: Option<SystemTime>,
}

// ==========================================
// LoadCache - 读穿缓存（moka，容量 + TTL 双重淘汰）
// ==========================================
pub struct LoadCache {
    ttl: Duration,
    entries: Cache<CacheKey, CacheEntry>,
}

impl LoadCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// # 参数
    /// - ttl: 条目有效期（0 = 不缓存）
    /// - max_entries: 最大条目数
    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { ttl, entries }
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// 读穿加载
    ///
    /// # 参数
    /// - path: 表格路径
    /// - required: 必需列（参与缓存键）
    /// - force_refresh: 为 true 时忽略缓存并替换
    /// - load: 实际加载函数
    pub fn get_or_load<F>(
        &self,
        path: &Path,
        required: &[String],
        force_refresh: bool,
        load: F,
    ) -> LoadOutcome
    where
        F: FnOnce() -> LoadOutcome,
    {
        if self.ttl.is_zero() {
            return load();
        }

        let key = CacheKey {
            path: path.to_path_buf(),
            required: required.to_vec(),
        };
        let modified = Self::modified_time(path);

        if !force_refresh {
            if let Some(entry) = self.entries.get(&key) {
                if entry.modified == modified {
                    debug!(path = %path.display(), "命中加载缓存");
                    return entry.outcome;
                }
                debug!(path = %path.display(), "文件已修改，缓存失效");
            }
        }

        let outcome = load();
        if outcome.is_ok() {
            self.entries.insert(
                key,
                CacheEntry {
                    outcome: outcome.clone(),
                    modified,
                },
            );
        } else {
            self.entries.invalidate(&key);
        }
        outcome
    }

    /// 清空缓存
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for LoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderLine;
    use crate::importer::error::LoadError;
    use std::cell::Cell;
    use std::fs::File;
    use tempfile::NamedTempFile;

    fn outcome_with(order_id: &str) -> LoadOutcome {
        LoadOutcome {
            rows: vec![OrderLine::new(order_id)],
            ..Default::default()
        }
    }

    #[test]
    fn test_cache_hit_within_ttl() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::from_secs(3600));
        let calls = Cell::new(0);

        for _ in 0..3 {
            let outcome = cache.get_or_load(file.path(), &[], false, || {
                calls.set(calls.get() + 1);
                outcome_with("4500")
            });
            assert_eq!(outcome.rows[0].order_id, "4500");
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_always_reloads() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::ZERO);
        let calls = Cell::new(0);

        for _ in 0..2 {
            cache.get_or_load(file.path(), &[], false, || {
                calls.set(calls.get() + 1);
                outcome_with("4500")
            });
        }

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_force_refresh_replaces_entry() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::from_secs(3600));

        cache.get_or_load(file.path(), &[], false, || outcome_with("1"));
        let refreshed = cache.get_or_load(file.path(), &[], true, || outcome_with("2"));
        let cached = cache.get_or_load(file.path(), &[], false, || outcome_with("3"));

        assert_eq!(refreshed.rows[0].order_id, "2");
        assert_eq!(cached.rows[0].order_id, "2");
    }

    #[test]
    fn test_modified_file_invalidates_entry() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::from_secs(3600));

        cache.get_or_load(file.path(), &[], false, || outcome_with("old"));

        let handle = File::options().write(true).open(file.path()).unwrap();
        handle
            .set_modified(SystemTime::now() + Duration::from_secs(120))
            .unwrap();

        let outcome = cache.get_or_load(file.path(), &[], false, || outcome_with("new"));
        assert_eq!(outcome.rows[0].order_id, "new");
    }

    #[test]
    fn test_required_columns_are_part_of_key() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::from_secs(3600));

        cache.get_or_load(file.path(), &["A".to_string()], false, || outcome_with("a"));
        let other = cache.get_or_load(file.path(), &["B".to_string()], false, || outcome_with("b"));

        assert_eq!(other.rows[0].order_id, "b");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_bounds_entries() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::with_capacity(Duration::from_secs(3600), 2);

        for name in ["A", "B", "C", "D"] {
            cache.get_or_load(file.path(), &[name.to_string()], false, || outcome_with(name));
        }

        assert!(cache.len() <= 2);
    }

    #[test]
    fn test_invalidate_all_forces_reload() {
        let file = NamedTempFile::new().unwrap();
        let cache = LoadCache::new(Duration::from_secs(3600));

        cache.get_or_load(file.path(), &[], false, || outcome_with("1"));
        cache.invalidate_all();
        let outcome = cache.get_or_load(file.path(), &[], false, || outcome_with("2"));

        assert_eq!(outcome.rows[0].order_id, "2");
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = LoadCache::new(Duration::from_secs(3600));
        let path = Path::new("/nonexistent/pedidos.xlsx");

        cache.get_or_load(path, &[], false, || {
            LoadOutcome::failed(LoadError::FileNotFound("x".to_string()))
        });

        assert!(cache.is_empty());
    }
}
