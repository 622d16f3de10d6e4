// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{DeliveryStatus, Stage};

/// 默认语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use order_control::i18n::t;
/// let msg = t("stage.separation");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use order_control::i18n::t_with_args;
/// let msg = t_with_args("load.failed", &[("error", "arquivo ausente")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 工序标签（当前语言）
pub fn stage_label(stage: Stage) -> String {
    t(stage.i18n_key())
}

/// 工序标签（指定语言，不改全局状态）
pub fn stage_label_in(stage: Stage, locale: &str) -> String {
    rust_i18n::t!(stage.i18n_key(), locale = locale).to_string()
}

/// 交付状态标签（当前语言）
pub fn status_label(status: DeliveryStatus) -> String {
    t(status.i18n_key())
}

/// 交付状态标签（指定语言）
pub fn status_label_in(status: DeliveryStatus, locale: &str) -> String {
    rust_i18n::t!(status.i18n_key(), locale = locale).to_string()
}
