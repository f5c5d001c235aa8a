use serde_json::Value;

use super::model::Plan;
use super::rate::parse_rate;

/// Normalize one raw upstream record into a canonical [`Plan`].
///
/// The upstream schema drifts: most fields have appeared under more than one
/// key over time, so every canonical field tries a primary key name and then
/// its legacy alternates, first present non-null value winning. Returns the
/// failure message when the record does not conform to the canonical shape
/// (currently: is not a JSON object at all); the caller decides whether that
/// fails the batch or drops the record.
pub fn normalize_plan(raw: &Value) -> Result<Plan, String> {
    if !raw.is_object() {
        return Err("expected a JSON object".to_string());
    }

    tracing::trace!(keys = ?raw.as_object().map(|o| o.len()), "normalizing raw plan record");

    Ok(Plan {
        company_id: mandatory_string(raw, &["company_id", "company_unique_id"]),
        company_name: mandatory_string(raw, &["company_name", "name"]),
        company_logo: pick_string(raw, &["company_logo", "company_logo_name"]),

        plan_name: mandatory_string(raw, &["plan_name", "product_name"]),
        plan_type_name: mandatory_string(raw, &["plan_type_name", "rate_type", "plan_type"]),
        term_value: pick_i64(raw, &["term_value", "plan_term", "term"]).map(|v| v as i32),

        price_kwh500: parse_rate(pick(raw, &["price_kwh500", "kwh500", "price_kwh_500"])),
        price_kwh1000: parse_rate(pick(raw, &["price_kwh1000", "kwh1000", "price_kwh_1000"])),
        price_kwh2000: parse_rate(pick(raw, &["price_kwh2000", "kwh2000", "price_kwh_2000"])),
        base_charge: pick_f64(raw, &["base_charge", "monthly_fee"]),

        minimum_usage: pick_bool(raw, &["minimum_usage", "min_usage_fees"]),
        new_customer: pick_bool(raw, &["new_customer", "new_customers_only"]),
        prepaid: pick_bool(raw, &["prepaid", "is_prepaid"]),
        timeofuse: pick_bool(raw, &["timeofuse", "time_of_use"]),

        renewable: extract_renewable(
            pick_string(raw, &["renewable_energy_description", "renewable_description"])
                .as_deref()
                .unwrap_or("")
        ),

        jdp_rating: pick_f64(raw, &["jdp_rating", "rating"]),
        jdp_rating_year: pick_string(raw, &["jdp_rating_year", "rating_year"]),

        plan_details: pick_string(raw, &["special_terms", "plan_details"]),
        pricing_details: pick_string(raw, &["pricing_details", "terms"]),
        promotions: pick_string(raw, &["promotions", "promotion"]),

        fact_sheet: pick_string(raw, &["fact_sheet", "efl_url"]),
        terms_of_service: pick_string(raw, &["terms_of_service", "tos_url"]),
        yrac_url: pick_string(raw, &["yrac_url", "yrac"]),

        enroll_phone: pick_string(raw, &["enroll_phone", "enroll_phone_number"]),
        go_to_plan: pick_string(raw, &["go_to_plan", "enroll_now", "website"]),
    })
}

/// First present, non-null value among the given keys.
fn pick<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find(|v| !v.is_null())
}

/// Optional string field: null/absent stays `None`, never an empty string.
fn pick_string(raw: &Value, keys: &[&str]) -> Option<String> {
    match pick(raw, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Mandatory string field: null/absent coerces to "" so downstream lowercase
/// search and sort never hit a null.
fn mandatory_string(raw: &Value, keys: &[&str]) -> String {
    pick_string(raw, keys).unwrap_or_default()
}

fn pick_i64(raw: &Value, keys: &[&str]) -> Option<i64> {
    match pick(raw, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn pick_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    match pick(raw, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Truthy coercion for upstream flag fields, which arrive as booleans,
/// 0/1 numbers, or assorted strings.
fn pick_bool(raw: &Value, keys: &[&str]) -> bool {
    match pick(raw, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => {
            let s = s.trim();
            !s.is_empty() && !s.eq_ignore_ascii_case("false") && s != "0"
        }
        _ => false,
    }
}

/// Extract the renewable percentage from a free-text description: the first
/// integer immediately followed by a percent sign. No match yields 0.
fn extract_renewable(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'%' {
                if let Ok(value) = text[start..i].parse::<i32>() {
                    return value.clamp(0, 100);
                }
            }
        } else {
            i += 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        assert!(normalize_plan(&json!("not a plan")).is_err());
        assert!(normalize_plan(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_primary_key_wins_over_legacy() {
        let raw = json!({
            "plan_name": "Saver 12",
            "product_name": "Legacy Name",
            "company_id": "101"
        });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.plan_name, "Saver 12");
    }

    #[test]
    fn test_legacy_key_fallback() {
        let raw = json!({
            "product_name": "Legacy Name",
            "company_unique_id": "101",
            "kwh1000": "9.5"
        });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.plan_name, "Legacy Name");
        assert_eq!(plan.company_id, "101");
        assert_eq!(plan.price_kwh1000, 0.095);
    }

    #[test]
    fn test_enroll_url_fallback_chain() {
        let raw = json!({ "enroll_now": "https://example.com/enroll" });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.go_to_plan.as_deref(), Some("https://example.com/enroll"));

        let raw = json!({ "website": "https://example.com" });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.go_to_plan.as_deref(), Some("https://example.com"));

        // Primary name wins when present.
        let raw = json!({
            "go_to_plan": "https://example.com/direct",
            "website": "https://example.com"
        });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.go_to_plan.as_deref(), Some("https://example.com/direct"));
    }

    #[test]
    fn test_mandatory_strings_coerce_to_empty() {
        let plan = normalize_plan(&json!({})).unwrap();
        assert_eq!(plan.company_id, "");
        assert_eq!(plan.company_name, "");
        assert_eq!(plan.plan_name, "");
        assert_eq!(plan.plan_type_name, "");
        // Optional strings stay None, not "".
        assert_eq!(plan.promotions, None);
        assert_eq!(plan.fact_sheet, None);
    }

    #[test]
    fn test_null_optional_string_stays_none() {
        let raw = json!({ "promotions": null });
        let plan = normalize_plan(&raw).unwrap();
        assert_eq!(plan.promotions, None);
    }

    #[test]
    fn test_truthy_flag_coercion() {
        assert!(normalize_plan(&json!({ "prepaid": true })).unwrap().prepaid);
        assert!(normalize_plan(&json!({ "prepaid": 1 })).unwrap().prepaid);
        assert!(normalize_plan(&json!({ "prepaid": "yes" })).unwrap().prepaid);
        assert!(!normalize_plan(&json!({ "prepaid": 0 })).unwrap().prepaid);
        assert!(!normalize_plan(&json!({ "prepaid": "false" })).unwrap().prepaid);
        assert!(!normalize_plan(&json!({ "prepaid": null })).unwrap().prepaid);
        assert!(!normalize_plan(&json!({})).unwrap().prepaid);
        // Legacy key.
        assert!(normalize_plan(&json!({ "is_prepaid": "1" })).unwrap().prepaid);
    }

    #[test]
    fn test_renewable_percent_extraction() {
        assert_eq!(extract_renewable("100% wind energy"), 100);
        assert_eq!(extract_renewable("At least 23% renewable content"), 23);
        assert_eq!(extract_renewable("renewable content varies"), 0);
        assert_eq!(extract_renewable(""), 0);
        // First integer followed by '%' wins, digits without '%' are skipped.
        assert_eq!(extract_renewable("plan 12, 30% solar"), 30);
    }

    #[test]
    fn test_term_value_from_string() {
        let plan = normalize_plan(&json!({ "term_value": "12" })).unwrap();
        assert_eq!(plan.term_value, Some(12));
        let plan = normalize_plan(&json!({ "plan_term": 24 })).unwrap();
        assert_eq!(plan.term_value, Some(24));
    }
}
