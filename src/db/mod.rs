use sea_orm::prelude::Decimal;

pub mod entity;
pub use entity::*;

/// Safely convert a Decimal to f64, returning None on parse failure
pub fn decimal_to_f64(d: Decimal) -> Option<f64> {
    d.to_string().parse::<f64>().ok()
}

/// Persisted money columns are Decimal; runtime prices are f64. Unrepresentable
/// values fall back to zero, which the alert evaluator already treats as
/// missing data.
pub fn f64_to_decimal(v: f64) -> Decimal {
    Decimal::from_f64_retain(v).unwrap_or_default()
}
