// ==========================================
// 订单管控系统 - 加载配置读取 Trait
// ==========================================
// 职责: 定义导入/流水线所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// LoaderConfigReader Trait
// ==========================================
// 用途: 导入模块与流水线所需的配置读取接口
// 实现者: ConfigManager（从 JSON 配置读取）
pub trait LoaderConfigReader {
    /// 工作表名
    ///
    /// # 默认值
    /// - None（第一个工作表）
    fn sheet_name(&self) -> Option<String>;

    /// 必需列
    ///
    /// # 默认值
    /// - 14 个业务列（Origem 除外）
    fn required_columns(&self) -> Vec<String>;

    /// 客户订单号排除名单
    ///
    /// # 默认值
    /// - TUMELERO / ESTOQUE FOX / AMOSTRAS 等内部订单号
    fn excluded_customer_refs(&self) -> Vec<String>;

    /// 客户简称排除名单
    ///
    /// # 默认值
    /// - 空（不按客户简称剔除）
    fn excluded_customer_names(&self) -> Vec<String>;

    /// 客户订单号为空的行是否剔除
    ///
    /// # 默认值
    /// - true
    fn drop_missing_customer_ref(&self) -> bool;

    /// 是否启用数量拆分
    ///
    /// # 默认值
    /// - true
    fn split_enabled(&self) -> bool;

    /// 下单日期宽限天数
    ///
    /// # 默认值
    /// - 1
    fn order_date_grace_days(&self) -> i64;

    /// 加载缓存有效期（秒）
    ///
    /// # 默认值
    /// - 300
    fn cache_ttl_secs(&self) -> u64;
}
