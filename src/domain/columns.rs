// ==========================================
// 订单管控系统 - 源表格列名
// ==========================================
// 红线: 列名是与业务表格的硬性兼容契约，不得改名
// ==========================================

pub const ORDER_ID: &str = "Nr.pedido";
pub const CUSTOMER_ORDER_REF: &str = "Ped. Cliente";
pub const ORDER_DATE: &str = "Dt.pedido";
pub const CUSTOMER_DISPLAY_NAME: &str = "Fantasia";
pub const PRODUCT_CODE: &str = "Produto";
pub const MODEL_CODE: &str = "Modelo";
pub const QUANTITY: &str = "Qtd.";
pub const UNIT_PRICE: &str = "Valor Unit.";
pub const TOTAL_VALUE: &str = "Valor Total";
pub const QUANTITY_TO_PRODUCE: &str = "Qtd.a produzir";
pub const QUANTITY_PRODUCED: &str = "Qtd. Produzida";
pub const QUANTITY_TO_RELEASE: &str = "Qtd.a liberar";
pub const EXPECTED_DELIVERY_DATE: &str = "Prev.entrega";
pub const INVOICE_DATE: &str = "Dt.fat.";
pub const ORIGIN: &str = "Origem";

// 派生列（仅导出使用）
pub const STAGE: &str = "Setor";
pub const STATUS: &str = "Status";

/// 默认必需列（Origem 可缺省）
pub fn default_required_columns() -> Vec<String> {
    [
        CUSTOMER_ORDER_REF,
        ORDER_DATE,
        CUSTOMER_DISPLAY_NAME,
        PRODUCT_CODE,
        MODEL_CODE,
        QUANTITY,
        UNIT_PRICE,
        TOTAL_VALUE,
        QUANTITY_TO_PRODUCE,
        QUANTITY_PRODUCED,
        QUANTITY_TO_RELEASE,
        EXPECTED_DELIVERY_DATE,
        INVOICE_DATE,
        ORDER_ID,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// 默认导出列（看板展示子集）
pub fn default_export_columns() -> Vec<String> {
    [
        STAGE,
        CUSTOMER_ORDER_REF,
        ORDER_DATE,
        CUSTOMER_DISPLAY_NAME,
        PRODUCT_CODE,
        MODEL_CODE,
        QUANTITY,
        UNIT_PRICE,
        TOTAL_VALUE,
        QUANTITY_TO_PRODUCE,
        QUANTITY_PRODUCED,
        QUANTITY_TO_RELEASE,
        EXPECTED_DELIVERY_DATE,
        INVOICE_DATE,
        ORDER_ID,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}
