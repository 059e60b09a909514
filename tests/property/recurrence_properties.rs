// Property-based tests for template expansion
// Random start dates, intervals and end dates against the expansion rules

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use workorder_scheduler::models::entry::Entry;
use workorder_scheduler::models::recurrence::{Frequency, RecurrenceRule, Template};
use workorder_scheduler::services::recurrence::{expand, expand_with_limit, total_occurrences};

fn template(start: NaiveDate, rule: RecurrenceRule) -> Template {
    let entry = Entry::builder()
        .title("Routine service")
        .start(start.and_hms_opt(9, 0, 0).unwrap())
        .end(start.and_hms_opt(11, 30, 0).unwrap())
        .build();
    Template::new(entry).with_recurrence(rule)
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020..2030i32, 1..=12u32, 1..=28u32)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

proptest! {
    /// Daily expansion yields exactly one entry per day through `until`
    #[test]
    fn prop_daily_count_matches_span(start in date_strategy(), days in 0i64..200) {
        let until = start + Duration::days(days);
        let expanded = expand(&template(start, RecurrenceRule::daily(until)));
        prop_assert_eq!(expanded.len() as i64, days + 1);
    }

    /// Weekly occurrences are `7 * interval` days apart and never pass `until`
    #[test]
    fn prop_weekly_spacing(start in date_strategy(), interval in 1u32..5, days in 0i64..365) {
        let until = start + Duration::days(days);
        let rule = RecurrenceRule::new(Frequency::Weekly, interval, until);
        let starts: Vec<NaiveDate> = expand(&template(start, rule))
            .iter()
            .map(|entry| entry.start.unwrap().date())
            .collect();

        prop_assert_eq!(starts[0], start);
        for pair in starts.windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), 7 * i64::from(interval));
        }
        prop_assert!(starts.iter().all(|date| *date <= until));
    }

    /// Every occurrence keeps the template's time of day and duration
    #[test]
    fn prop_occurrences_keep_times(start in date_strategy(), months in 0u32..36) {
        let until = start + Duration::days(i64::from(months) * 31);
        let rule = RecurrenceRule::new(Frequency::Monthly, 1, until);
        for entry in expand(&template(start, rule)) {
            let (begin, end) = entry.interval().unwrap();
            prop_assert_eq!(begin.time(), chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            prop_assert_eq!(end - begin, Duration::minutes(150));
        }
    }

    /// With Sunday skipping on, nothing lands on a Sunday and the count is unchanged
    #[test]
    fn prop_sunday_skip_never_lands_on_sunday(start in date_strategy(), days in 0i64..120) {
        let until = start + Duration::days(days);
        let plain = template(start, RecurrenceRule::daily(until));
        let skipping = plain.clone().skipping_sundays(true);

        let expanded = expand(&skipping);
        prop_assert_eq!(expanded.len(), total_occurrences(&plain));
        for entry in &expanded {
            prop_assert_ne!(entry.start.unwrap().weekday(), Weekday::Sun);
        }
    }

    /// The iteration cap bounds the output
    #[test]
    fn prop_cap_bounds_output(start in date_strategy(), limit in 1usize..50) {
        let until = start + Duration::days(400);
        let expanded = expand_with_limit(&template(start, RecurrenceRule::daily(until)), limit);
        prop_assert_eq!(expanded.len(), limit);
    }
}
