use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::recurrence::{ExpansionPlan, Frequency, RecurrenceRule, SpanRule};

/// Target date of one occurrence and, when the Sunday-skip rule moved it,
/// the Sunday it was moved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceDate {
    pub date: NaiveDate,
    pub moved_from: Option<NaiveDate>,
}

impl OccurrenceDate {
    fn place(date: NaiveDate, skip_sundays: bool) -> Self {
        if skip_sundays && date.weekday() == Weekday::Sun {
            if let Some(saturday) = date.pred_opt() {
                return Self {
                    date: saturday,
                    moved_from: Some(date),
                };
            }
        }
        Self {
            date,
            moved_from: None,
        }
    }
}

/// `anchor` advanced by `n` steps of the rule.
///
/// Always computed from the anchor so month-end clamping (Jan 31 → Feb 29)
/// does not drift into later months.
pub(super) fn nth_date(anchor: NaiveDate, frequency: Frequency, interval: u32, n: u32) -> Option<NaiveDate> {
    let steps = n.checked_mul(interval.max(1))?;
    if let Some(months) = frequency.months_per_step() {
        anchor.checked_add_months(Months::new(steps.checked_mul(months)?))
    } else {
        let days = frequency.days_per_step()?;
        anchor.checked_add_days(Days::new(u64::from(steps) * u64::from(days)))
    }
}

#[derive(Debug, Clone, Copy)]
enum DateSource {
    Recurring {
        anchor: NaiveDate,
        rule: RecurrenceRule,
        until: NaiveDate,
    },
    Span(SpanRule),
    Single(NaiveDate),
}

impl DateSource {
    fn raw_at(&self, n: u32) -> Option<NaiveDate> {
        match *self {
            DateSource::Recurring { anchor, rule, until } => {
                nth_date(anchor, rule.frequency, rule.effective_interval(), n).filter(|date| *date <= until)
            }
            DateSource::Span(span) => span
                .start_date
                .checked_add_days(Days::new(u64::from(n)))
                .filter(|date| *date <= span.end_date),
            DateSource::Single(date) => (n == 0).then_some(date),
        }
    }
}

/// Chronological occurrence dates of a template, bounded by an iteration cap.
#[derive(Debug, Clone)]
pub struct OccurrenceDates {
    source: DateSource,
    skip_sundays: bool,
    next_index: u32,
    limit: usize,
}

impl OccurrenceDates {
    /// `None` when the plan cannot produce occurrences (recurring without
    /// an end date).
    pub(super) fn new(
        plan: ExpansionPlan,
        start_date: NaiveDate,
        skip_sundays: bool,
        limit: usize,
    ) -> Option<Self> {
        let (source, skip_sundays) = match plan {
            ExpansionPlan::Recurring(rule) => (
                DateSource::Recurring {
                    anchor: start_date,
                    rule,
                    until: rule.until?,
                },
                skip_sundays,
            ),
            ExpansionPlan::Span(span) => (DateSource::Span(span), span.skip_sundays),
            ExpansionPlan::Single => (DateSource::Single(start_date), false),
        };

        Some(Self {
            source,
            skip_sundays,
            next_index: 0,
            limit,
        })
    }

    /// True once the cap stopped iteration while more dates remained.
    pub fn is_truncated(&self) -> bool {
        self.next_index as usize >= self.limit && self.source.raw_at(self.next_index).is_some()
    }
}

impl Iterator for OccurrenceDates {
    type Item = OccurrenceDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index as usize >= self.limit {
            return None;
        }
        let raw = self.source.raw_at(self.next_index)?;
        self.next_index += 1;
        Some(OccurrenceDate::place(raw, self.skip_sundays))
    }
}
