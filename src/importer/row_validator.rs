// ==========================================
// 订单管控系统 - 行过滤器实现
// ==========================================
// 职责: 剔除无效订单号 / 排除名单中的内部客户订单号与客户简称
// ==========================================

use crate::domain::order::{DropReason, RawOrderRecord};
use crate::importer::order_loader_trait::RowValidator as RowValidatorTrait;
use std::collections::HashSet;

pub struct RowValidator {
    excluded_refs: HashSet<String>, // 排除名单（非销售行）
    excluded_names: HashSet<String>, // 客户简称排除名单（小写）
    drop_missing_customer_ref: bool, // 客户订单号为空时剔除
}

impl RowValidator {
    pub fn new<I, S>(excluded_refs: I, drop_missing_customer_ref: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_refs: excluded_refs
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
            excluded_names: HashSet::new(),
            drop_missing_customer_ref,
        }
    }

    /// 追加客户简称排除名单（不区分大小写）
    pub fn with_excluded_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_names = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn is_excluded_name(&self, customer_display_name: &str) -> bool {
        self.excluded_names
            .contains(&customer_display_name.trim().to_lowercase())
    }

    pub fn is_excluded(&self, customer_order_ref: &str) -> bool {
        self.excluded_refs.contains(customer_order_ref.trim())
    }
}

impl RowValidatorTrait for RowValidator {
    fn drop_reason(&self, record: &RawOrderRecord) -> Option<DropReason> {
        // 订单号缺失
        let order_id = match record.order_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Some(DropReason::MissingOrderId),
        };

        // 数值转文本遗留的 "nan"
        if order_id.eq_ignore_ascii_case("nan") {
            return Some(DropReason::NanOrderId);
        }

        if let Some(name) = record.customer_display_name.as_deref() {
            if self.is_excluded_name(name) {
                return Some(DropReason::ExcludedCustomerName);
            }
        }

        match record.customer_order_ref.as_deref() {
            Some(r) if self.is_excluded(r) => Some(DropReason::ExcludedCustomerRef),
            None if self.drop_missing_customer_ref => Some(DropReason::MissingCustomerRef),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(order_id: Option<&str>, customer_ref: Option<&str>) -> RawOrderRecord {
        RawOrderRecord {
            order_id: order_id.map(str::to_string),
            customer_order_ref: customer_ref.map(str::to_string),
            row_number: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_drop_missing_and_nan_order_id() {
        let validator = RowValidator::new(Vec::<String>::new(), false);

        assert_eq!(
            validator.drop_reason(&record(None, Some("PC-1"))),
            Some(DropReason::MissingOrderId)
        );
        assert_eq!(
            validator.drop_reason(&record(Some("nan"), Some("PC-1"))),
            Some(DropReason::NanOrderId)
        );
        assert_eq!(validator.drop_reason(&record(Some("4500"), Some("PC-1"))), None);
    }

    #[test]
    fn test_drop_excluded_customer_ref() {
        let validator = RowValidator::new(["TUMELERO", "ESTOQUE FOX"], true);

        assert_eq!(
            validator.drop_reason(&record(Some("4500"), Some("ESTOQUE FOX"))),
            Some(DropReason::ExcludedCustomerRef)
        );
        assert_eq!(validator.drop_reason(&record(Some("4500"), Some("TUMELERO 3"))), None);
    }

    #[test]
    fn test_drop_excluded_customer_name_ignores_case() {
        let validator =
            RowValidator::new(Vec::<String>::new(), true).with_excluded_names(["prime", "Frexco"]);

        let mut internal = record(Some("4500"), Some("PC-1"));
        internal.customer_display_name = Some("PRIME".to_string());
        assert_eq!(
            validator.drop_reason(&internal),
            Some(DropReason::ExcludedCustomerName)
        );

        internal.customer_display_name = Some(" frexco ".to_string());
        assert_eq!(
            validator.drop_reason(&internal),
            Some(DropReason::ExcludedCustomerName)
        );

        internal.customer_display_name = Some("PRIME FOODS".to_string());
        assert_eq!(validator.drop_reason(&internal), None);
    }

    #[test]
    fn test_drop_missing_customer_ref_is_configurable() {
        let strict = RowValidator::new(Vec::<String>::new(), true);
        let lenient = RowValidator::new(Vec::<String>::new(), false);

        assert_eq!(
            strict.drop_reason(&record(Some("4500"), None)),
            Some(DropReason::MissingCustomerRef)
        );
        assert_eq!(lenient.drop_reason(&record(Some("4500"), None)), None);
    }
}
