// ==========================================
// 订单管控系统 - 表格合并实现
// ==========================================
// 规则:
//   1. 订单号含 '-' 的订单行与补货表按键列做全外连接
//   2. 非键同名列加后缀（默认 _pedidos / _abastecidos）
//   3. 连接结果按键排序，多对多按键做笛卡尔积
//   4. 订单号不含 '-' 的行原样追加在后面
//   5. 输出表头 = 各部分列按首次出现顺序取并集
// ==========================================

use crate::config::MergeConfig;
use crate::domain::columns;
use crate::export::table_writer::write_table;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::order_loader_trait::{FileParser, RawTable};
use crate::merge::error::{MergeError, MergeResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{info, instrument};

type Record = HashMap<String, String>;

/// 合并统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub joined_rows: usize,
    pub passthrough_rows: usize,
    pub matched_keys: usize,
    pub orders_only_keys: usize,
    pub fulfillment_only_keys: usize,
}

impl MergeSummary {
    pub fn total_rows(&self) -> usize {
        self.joined_rows + self.passthrough_rows
    }
}

fn find_header<'a>(headers: &'a [String], wanted: &str) -> Option<&'a str> {
    let wanted = wanted.trim().to_lowercase();
    headers
        .iter()
        .find(|h| h.trim().to_lowercase() == wanted)
        .map(|h| h.as_str())
}

fn resolve_keys(table: &RawTable, keys: &[String], name: &str) -> MergeResult<Vec<String>> {
    let mut resolved = Vec::with_capacity(keys.len());
    let mut missing = Vec::new();
    for key in keys {
        match find_header(&table.headers, key) {
            Some(h) => resolved.push(h.to_string()),
            None => missing.push(key.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(MergeError::MissingKeyColumns {
            table: name.to_string(),
            columns: missing,
        });
    }
    Ok(resolved)
}

fn key_of(record: &Record, key_headers: &[String]) -> Vec<String> {
    key_headers
        .iter()
        .map(|h| record.get(h).cloned().unwrap_or_default())
        .collect()
}

// ==========================================
// DatasetMerger
// ==========================================
#[derive(Debug, Clone)]
pub struct DatasetMerger {
    keys: Vec<String>,
    orders_suffix: String,
    fulfillment_suffix: String,
}

impl DatasetMerger {
    pub fn new(config: &MergeConfig) -> Self {
        Self {
            keys: config.key_columns.clone(),
            orders_suffix: config.orders_suffix.clone(),
            fulfillment_suffix: config.fulfillment_suffix.clone(),
        }
    }

    /// 合并两张表
    #[instrument(skip_all, fields(orders = orders.len(), fulfillment = fulfillment.len()))]
    pub fn merge(
        &self,
        orders: &RawTable,
        fulfillment: &RawTable,
    ) -> MergeResult<(RawTable, MergeSummary)> {
        let left_keys = resolve_keys(orders, &self.keys, "订单表")?;
        let right_keys = resolve_keys(fulfillment, &self.keys, "补货表")?;
        let order_id_header = find_header(&orders.headers, columns::ORDER_ID)
            .map(str::to_string)
            .ok_or_else(|| MergeError::MissingKeyColumns {
                table: "订单表".to_string(),
                columns: vec![columns::ORDER_ID.to_string()],
            })?;

        // === 列布局 ===
        let left_key_set: HashSet<&str> = left_keys.iter().map(String::as_str).collect();
        let right_key_set: HashSet<&str> = right_keys.iter().map(String::as_str).collect();
        let right_values: Vec<&String> = fulfillment
            .headers
            .iter()
            .filter(|h| !right_key_set.contains(h.as_str()))
            .collect();
        let right_value_set: HashSet<&str> = right_values.iter().map(|h| h.as_str()).collect();

        // (输出列名, 来源列名)
        let mut left_layout: Vec<(String, String)> = Vec::new();
        for h in &orders.headers {
            let out = if left_key_set.contains(h.as_str()) || !right_value_set.contains(h.as_str()) {
                h.clone()
            } else {
                format!("{}{}", h, self.orders_suffix)
            };
            left_layout.push((out, h.clone()));
        }
        let left_value_set: HashSet<&str> = orders
            .headers
            .iter()
            .filter(|h| !left_key_set.contains(h.as_str()))
            .map(String::as_str)
            .collect();
        let right_layout: Vec<(String, String)> = right_values
            .iter()
            .map(|h| {
                let out = if left_value_set.contains(h.as_str()) {
                    format!("{}{}", h, self.fulfillment_suffix)
                } else {
                    (*h).clone()
                };
                (out, (*h).clone())
            })
            .collect();

        // === 分区 ===
        let (with_release, passthrough): (Vec<&Record>, Vec<&Record>) =
            orders.records.iter().partition(|r| {
                r.get(&order_id_header)
                    .map(|id| id.contains('-'))
                    .unwrap_or(false)
            });

        // === 按键分组（BTreeMap 保证键有序） ===
        let mut groups: BTreeMap<Vec<String>, (Vec<&Record>, Vec<&Record>)> = BTreeMap::new();
        for record in &with_release {
            groups
                .entry(key_of(record, &left_keys))
                .or_default()
                .0
                .push(record);
        }
        for record in &fulfillment.records {
            groups
                .entry(key_of(record, &right_keys))
                .or_default()
                .1
                .push(record);
        }

        let mut summary = MergeSummary::default();
        let mut records: Vec<Record> = Vec::new();
        for (key, (lefts, rights)) in &groups {
            match (lefts.is_empty(), rights.is_empty()) {
                (false, false) => summary.matched_keys += 1,
                (false, true) => summary.orders_only_keys += 1,
                (true, false) => summary.fulfillment_only_keys += 1,
                (true, true) => continue,
            }

            let left_side: Vec<Option<&Record>> = if lefts.is_empty() {
                vec![None]
            } else {
                lefts.iter().map(|r| Some(*r)).collect()
            };
            let right_side: Vec<Option<&Record>> = if rights.is_empty() {
                vec![None]
            } else {
                rights.iter().map(|r| Some(*r)).collect()
            };

            for left in &left_side {
                for right in &right_side {
                    records.push(self.join_row(
                        key,
                        *left,
                        *right,
                        &left_keys,
                        &left_layout,
                        &right_layout,
                    ));
                }
            }
        }
        summary.joined_rows = records.len();

        records.extend(passthrough.iter().map(|r| (*r).clone()));
        summary.passthrough_rows = passthrough.len();

        // === 表头并集 ===
        let mut headers: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let candidates = left_layout
            .iter()
            .map(|(out, _)| out)
            .chain(right_layout.iter().map(|(out, _)| out))
            .chain(orders.headers.iter());
        for h in candidates {
            if seen.insert(h.clone()) {
                headers.push(h.clone());
            }
        }

        info!(
            joined = summary.joined_rows,
            passthrough = summary.passthrough_rows,
            matched_keys = summary.matched_keys,
            "表格合并完成"
        );

        Ok((RawTable { headers, records }, summary))
    }

    fn join_row(
        &self,
        key: &[String],
        left: Option<&Record>,
        right: Option<&Record>,
        left_keys: &[String],
        left_layout: &[(String, String)],
        right_layout: &[(String, String)],
    ) -> Record {
        let mut row = Record::new();

        for (out, source) in left_layout {
            let value = match left_keys.iter().position(|k| k == source) {
                Some(idx) => key[idx].clone(),
                None => left
                    .and_then(|r| r.get(source))
                    .cloned()
                    .unwrap_or_default(),
            };
            row.insert(out.clone(), value);
        }

        for (out, source) in right_layout {
            let value = right
                .and_then(|r| r.get(source))
                .cloned()
                .unwrap_or_default();
            row.insert(out.clone(), value);
        }

        row
    }
}

/// 合并批处理入口: 读取两张表 → 合并 → 写出单工作表 xlsx
#[instrument(skip(config))]
pub fn run_merge(
    config: &MergeConfig,
    orders_path: &Path,
    fulfillment_path: &Path,
    output_path: &Path,
) -> MergeResult<MergeSummary> {
    let parser = UniversalFileParser;
    let orders = parser
        .parse_table(orders_path, config.orders_sheet.as_deref())
        .map_err(|source| MergeError::Load {
            table: orders_path.display().to_string(),
            source,
        })?;
    let fulfillment = parser
        .parse_table(fulfillment_path, config.fulfillment_sheet.as_deref())
        .map_err(|source| MergeError::Load {
            table: fulfillment_path.display().to_string(),
            source,
        })?;

    let (merged, summary) = DatasetMerger::new(config).merge(&orders, &fulfillment)?;
    write_table(&merged, &config.output_sheet, output_path)?;
    Ok(summary)
}
