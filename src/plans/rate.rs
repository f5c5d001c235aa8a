use serde_json::Value;

/// Normalize a raw upstream rate of unknown shape into dollars per kWh.
///
/// Upstream quotes rates in cents, as numbers, numeric strings, or
/// currency-formatted strings ("12.5¢"). Anything unparseable or absent
/// yields exactly 0.0 — upstream data is known to be incomplete and zero is
/// the documented fallback. A literal zero rate and missing data are
/// therefore indistinguishable in the output.
pub fn parse_rate(raw: Option<&Value>) -> f64 {
    let text = match raw {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => {
            return 0.0;
        }
    };

    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(cents) => cents / 100.0,
        Err(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_numeric_cents() {
        assert_eq!(parse_rate(Some(&json!(9.5))), 0.095);
        assert_eq!(parse_rate(Some(&json!(12))), 0.12);
    }

    #[test]
    fn test_numeric_string() {
        assert_eq!(parse_rate(Some(&json!("9.5"))), 0.095);
    }

    #[test]
    fn test_currency_formatted_string() {
        assert_eq!(parse_rate(Some(&json!("12.5¢"))), 0.125);
        assert_eq!(parse_rate(Some(&json!("$0.11 per kWh"))), 0.0011);
    }

    #[test]
    fn test_unparseable_and_absent_yield_zero() {
        assert_eq!(parse_rate(None), 0.0);
        assert_eq!(parse_rate(Some(&json!(null))), 0.0);
        assert_eq!(parse_rate(Some(&json!(""))), 0.0);
        assert_eq!(parse_rate(Some(&json!("call us"))), 0.0);
        assert_eq!(parse_rate(Some(&json!(true))), 0.0);
    }

    #[test]
    fn test_zero_is_zero() {
        assert_eq!(parse_rate(Some(&json!(0))), 0.0);
        assert_eq!(parse_rate(Some(&json!("0"))), 0.0);
    }
}
