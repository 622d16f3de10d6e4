// ==========================================
// 订单管控系统 - 巴西雷亚尔金额格式
// ==========================================
// 格式: "R$ 1.234,56"（千分位 '.'，小数位 ','）
// ==========================================

/// 金额格式化
pub fn format_brl(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    // 四舍五入到 0.00 时不带负号
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("R$ {}{},{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
        assert_eq!(format_brl(1234567.8), "R$ 1.234.567,80");
        assert_eq!(format_brl(12.5), "R$ 12,50");
    }

    #[test]
    fn test_format_brl_negative_and_invalid() {
        assert_eq!(format_brl(-1500.0), "R$ -1.500,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
        assert_eq!(format_brl(f64::NAN), "R$ 0,00");
    }
}
