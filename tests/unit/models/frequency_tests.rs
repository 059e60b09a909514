// Unit tests for recurrence frequencies and rule validation

use chrono::NaiveDate;
use test_case::test_case;

use workorder_scheduler::models::recurrence::{Frequency, RecurrenceRule};

fn until() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

#[test_case(Frequency::Daily, Some(1), None ; "daily steps one day")]
#[test_case(Frequency::Weekly, Some(7), None ; "weekly steps seven days")]
#[test_case(Frequency::Monthly, None, Some(1) ; "monthly steps one month")]
#[test_case(Frequency::Yearly, None, Some(12) ; "yearly steps twelve months")]
fn test_step_units(frequency: Frequency, days: Option<u32>, months: Option<u32>) {
    assert_eq!(frequency.days_per_step(), days);
    assert_eq!(frequency.months_per_step(), months);
}

#[test_case("\"daily\"", Frequency::Daily)]
#[test_case("\"weekly\"", Frequency::Weekly)]
#[test_case("\"monthly\"", Frequency::Monthly)]
#[test_case("\"yearly\"", Frequency::Yearly)]
fn test_frequency_decodes_lowercase(raw: &str, expected: Frequency) {
    let parsed: Frequency = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_zero_interval_is_invalid_but_treated_as_one() {
    let rule = RecurrenceRule::new(Frequency::Weekly, 0, until());
    assert!(rule.validate().is_err());
    assert_eq!(rule.effective_interval(), 1);
}

#[test]
fn test_missing_until_is_invalid() {
    let rule = RecurrenceRule {
        frequency: Frequency::Daily,
        interval: 1,
        until: None,
    };
    assert_eq!(
        rule.validate(),
        Err("Recurrence end date is required".to_string())
    );
}

#[test]
fn test_rule_decodes_from_json() {
    let rule: RecurrenceRule =
        serde_json::from_str(r#"{"frequency": "monthly", "interval": 3, "until": "2025-06-30"}"#).unwrap();
    assert_eq!(rule, RecurrenceRule::new(Frequency::Monthly, 3, until()));
    assert!(rule.validate().is_ok());
}
