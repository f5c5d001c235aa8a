use std::cmp::Ordering;

use serde::{ Deserialize, Serialize };

use super::model::Plan;

fn all_sentinel() -> String {
    "all".to_string()
}

/// A single immutable filter-and-sort criteria record. Every filter field
/// uses the literal `"all"` sentinel to mean "no filter".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Company id to match exactly, or "all".
    #[serde(default = "all_sentinel")]
    pub company: String,
    /// "all", "rated" (any valid rating), or a numeric minimum ("4").
    #[serde(default = "all_sentinel")]
    pub rating: String,
    /// "all", "fixed", or "variable".
    #[serde(default = "all_sentinel")]
    pub plan_type: String,
    /// "all", "0-6", "7-12", "13-24", or "25+" contract-length months.
    #[serde(default = "all_sentinel")]
    pub term: String,
    /// "all" or "prepaid".
    #[serde(default = "all_sentinel")]
    pub prepaid: String,
    /// "all" or "time_of_use".
    #[serde(default = "all_sentinel")]
    pub time_of_use: String,
    #[serde(default)]
    pub sort: SortMode,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            company: all_sentinel(),
            rating: all_sentinel(),
            plan_type: all_sentinel(),
            term: all_sentinel(),
            prepaid: all_sentinel(),
            time_of_use: all_sentinel(),
            sort: SortMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Ascending by the 1000 kWh tier, the canonical default usage.
    #[default]
    PriceAsc,
    PriceDesc,
    TermAsc,
    TermDesc,
    RatingAsc,
    RatingDesc,
}

/// Apply filters then sort, as a pure function over an in-memory plan list.
/// Predicates are independent conjunctions, so their order never changes the
/// final set; the sort always runs last.
pub fn apply(plans: Vec<Plan>, criteria: &FilterCriteria) -> Vec<Plan> {
    let mut out: Vec<Plan> = plans
        .into_iter()
        .filter(|p| {
            matches_company(p, &criteria.company) &&
                matches_rating(p, &criteria.rating) &&
                matches_plan_type(p, &criteria.plan_type) &&
                matches_term(p, &criteria.term) &&
                matches_prepaid(p, &criteria.prepaid) &&
                matches_time_of_use(p, &criteria.time_of_use)
        })
        .collect();

    sort_plans(&mut out, criteria.sort);
    out
}

/// A rating only counts as valid when it is a positive number accompanied by
/// a non-empty rating year. A rating with no year is treated as absent for
/// both filtering and sorting.
fn valid_rating(plan: &Plan) -> Option<f64> {
    let rating = plan.jdp_rating.filter(|r| *r > 0.0)?;
    match plan.jdp_rating_year.as_deref() {
        Some(year) if !year.trim().is_empty() => Some(rating),
        _ => None,
    }
}

fn matches_company(plan: &Plan, company: &str) -> bool {
    company == "all" || plan.company_id == company
}

fn matches_rating(plan: &Plan, rating: &str) -> bool {
    match rating {
        "all" => true,
        "rated" => valid_rating(plan).is_some(),
        threshold => {
            match threshold.parse::<f64>() {
                Ok(min) => valid_rating(plan).map(|r| r >= min).unwrap_or(false),
                // An unrecognized bucket filters nothing out.
                Err(_) => true,
            }
        }
    }
}

/// Plan-type bucket match. The label is the canonical `plan_type_name`, but
/// legacy upstream records encoded the type numerically ("1" fixed,
/// "2" variable) or left it empty (variable); the shim keeps those records
/// filterable.
fn matches_plan_type(plan: &Plan, plan_type: &str) -> bool {
    let label = plan.plan_type_name.to_lowercase();
    match plan_type {
        "fixed" => label.contains("fixed") || label == "1",
        "variable" => label.contains("variable") || label == "2" || label.is_empty(),
        _ => true,
    }
}

fn matches_term(plan: &Plan, term: &str) -> bool {
    let months = plan.term_value.unwrap_or(0);
    match term {
        "all" => true,
        "0-6" => months <= 6,
        "7-12" => (7..=12).contains(&months),
        "13-24" => (13..=24).contains(&months),
        "25+" => months >= 25,
        _ => true,
    }
}

fn matches_prepaid(plan: &Plan, prepaid: &str) -> bool {
    match prepaid {
        "all" => true,
        _ => plan.plan_type_name.to_lowercase().contains("prepaid"),
    }
}

fn matches_time_of_use(plan: &Plan, time_of_use: &str) -> bool {
    match time_of_use {
        "all" => true,
        _ => {
            let label = plan.plan_type_name.to_lowercase();
            // "tou" must stand alone as a word, not hide inside one.
            label.contains("time of use") ||
                label
                    .split(|c: char| !c.is_ascii_alphanumeric())
                    .any(|token| token == "tou")
        }
    }
}

fn sort_plans(plans: &mut [Plan], mode: SortMode) {
    // Stable sort; ties keep their incoming order.
    match mode {
        SortMode::PriceAsc => plans.sort_by(|a, b| cmp_f64(a.price_kwh1000, b.price_kwh1000)),
        SortMode::PriceDesc => plans.sort_by(|a, b| cmp_f64(b.price_kwh1000, a.price_kwh1000)),
        SortMode::TermAsc =>
            plans.sort_by_key(|p| p.term_value.unwrap_or(0)),
        SortMode::TermDesc =>
            plans.sort_by_key(|p| std::cmp::Reverse(p.term_value.unwrap_or(0))),
        SortMode::RatingAsc =>
            plans.sort_by(|a, b| cmp_f64(sort_rating(a), sort_rating(b))),
        SortMode::RatingDesc =>
            plans.sort_by(|a, b| cmp_f64(sort_rating(b), sort_rating(a))),
    }
}

fn sort_rating(plan: &Plan) -> f64 {
    valid_rating(plan).unwrap_or(0.0)
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(name: &str) -> Plan {
        Plan {
            company_id: "100".to_string(),
            company_name: "Acme Energy".to_string(),
            company_logo: None,
            plan_name: name.to_string(),
            plan_type_name: "Fixed Rate".to_string(),
            term_value: Some(12),
            price_kwh500: 0.12,
            price_kwh1000: 0.1,
            price_kwh2000: 0.09,
            base_charge: None,
            minimum_usage: false,
            new_customer: false,
            prepaid: false,
            timeofuse: false,
            renewable: 0,
            jdp_rating: None,
            jdp_rating_year: None,
            plan_details: None,
            pricing_details: None,
            promotions: None,
            fact_sheet: None,
            terms_of_service: None,
            yrac_url: None,
            enroll_phone: None,
            go_to_plan: None,
        }
    }

    fn sample_plans() -> Vec<Plan> {
        let mut a = plan("a");
        a.company_id = "100".into();
        a.price_kwh1000 = 0.11;
        a.term_value = Some(6);
        a.jdp_rating = Some(4.0);
        a.jdp_rating_year = Some("2024".into());

        let mut b = plan("b");
        b.company_id = "200".into();
        b.price_kwh1000 = 0.09;
        b.term_value = Some(24);
        b.plan_type_name = "Variable Rate".into();
        // Rating without a year: treated as unrated.
        b.jdp_rating = Some(5.0);
        b.jdp_rating_year = None;

        let mut c = plan("c");
        c.company_id = "100".into();
        c.price_kwh1000 = 0.1;
        c.term_value = None;
        c.plan_type_name = "Prepaid Fixed".into();

        vec![a, b, c]
    }

    #[test]
    fn test_no_filters_sorts_price_ascending() {
        let out = apply(sample_plans(), &FilterCriteria::default());
        let names: Vec<&str> = out.iter().map(|p| p.plan_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_company_filter() {
        let criteria = FilterCriteria { company: "100".into(), ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.company_id == "100"));
    }

    #[test]
    fn test_rating_without_year_counts_as_unrated() {
        let criteria = FilterCriteria { rating: "rated".into(), ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        // Only plan "a" has both a positive rating and a year.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plan_name, "a");

        // Same rule for numeric thresholds: plan "b" has rating 5 but no year.
        let criteria = FilterCriteria { rating: "4".into(), ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plan_name, "a");
    }

    #[test]
    fn test_rating_sort_treats_yearless_as_zero() {
        let criteria = FilterCriteria { sort: SortMode::RatingDesc, ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        // "a" (4.0) first; "b" sorts as 0 despite its raw 5.0.
        assert_eq!(out[0].plan_name, "a");
    }

    #[test]
    fn test_plan_type_filter_with_legacy_encodings() {
        let mut plans = sample_plans();
        plans[2].plan_type_name = "1".into(); // legacy numeric fixed
        let criteria = FilterCriteria { plan_type: "fixed".into(), ..Default::default() };
        let out = apply(plans, &criteria);
        let names: Vec<&str> = out.iter().map(|p| p.plan_name.as_str()).collect();
        assert!(names.contains(&"a"));
        assert!(names.contains(&"c"));
        assert!(!names.contains(&"b"));

        // Empty label counts as variable.
        let mut plans = sample_plans();
        plans[0].plan_type_name = String::new();
        let criteria = FilterCriteria { plan_type: "variable".into(), ..Default::default() };
        let out = apply(plans, &criteria);
        let names: Vec<&str> = out.iter().map(|p| p.plan_name.as_str()).collect();
        assert!(names.contains(&"a"));
        assert!(names.contains(&"b"));
    }

    #[test]
    fn test_term_buckets_treat_absent_as_zero() {
        let criteria = FilterCriteria { term: "0-6".into(), ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        let names: Vec<&str> = out.iter().map(|p| p.plan_name.as_str()).collect();
        // "a" has 6 months, "c" has no term (0).
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn test_prepaid_substring_match_on_type_label() {
        let criteria = FilterCriteria { prepaid: "prepaid".into(), ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plan_name, "c");
    }

    #[test]
    fn test_time_of_use_substring_match() {
        let mut plans = sample_plans();
        plans[1].plan_type_name = "Time of Use".into();
        let criteria = FilterCriteria { time_of_use: "time_of_use".into(), ..Default::default() };
        let out = apply(plans, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plan_name, "b");
    }

    #[test]
    fn test_time_of_use_tou_matches_whole_token_only() {
        let mut plans = sample_plans();
        plans[0].plan_type_name = "TOU Saver".into();
        // "tou" buried inside a word must not match.
        plans[1].plan_type_name = "Fixed Touchstone".into();
        let criteria = FilterCriteria { time_of_use: "time_of_use".into(), ..Default::default() };
        let out = apply(plans, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plan_name, "a");
    }

    #[test]
    fn test_idempotence() {
        let criteria = FilterCriteria {
            company: "100".into(),
            term: "0-6".into(),
            sort: SortMode::PriceDesc,
            ..Default::default()
        };
        let once = apply(sample_plans(), &criteria);
        let twice = apply(once.clone(), &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_order_independence() {
        // Applying two single-field criteria in either order yields the same
        // set as the combined criteria (sort held constant).
        let combined = FilterCriteria {
            company: "100".into(),
            plan_type: "fixed".into(),
            ..Default::default()
        };
        let company_only = FilterCriteria { company: "100".into(), ..Default::default() };
        let type_only = FilterCriteria { plan_type: "fixed".into(), ..Default::default() };

        let a = apply(apply(sample_plans(), &company_only), &type_only);
        let b = apply(apply(sample_plans(), &type_only), &company_only);
        let c = apply(sample_plans(), &combined);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_term_sort_descending() {
        let criteria = FilterCriteria { sort: SortMode::TermDesc, ..Default::default() };
        let out = apply(sample_plans(), &criteria);
        let terms: Vec<i32> = out.iter().map(|p| p.term_value.unwrap_or(0)).collect();
        assert_eq!(terms, vec![24, 6, 0]);
    }
}
