// Recurrence module
// Templates and the rules that expand them into dated occurrences

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Calendar months per step, for the month-based frequencies
    pub fn months_per_step(&self) -> Option<u32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Yearly => Some(12),
            Frequency::Daily | Frequency::Weekly => None,
        }
    }

    /// Days per step, for the day-based frequencies
    pub fn days_per_step(&self) -> Option<u32> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Monthly | Frequency::Yearly => None,
        }
    }
}

/// Every `interval` units of `frequency`, through `until` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// A recurring template without an end date expands to nothing
    pub until: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: u32, until: NaiveDate) -> Self {
        Self {
            frequency,
            interval,
            until: Some(until),
        }
    }

    pub fn daily(until: NaiveDate) -> Self {
        Self::new(Frequency::Daily, 1, until)
    }

    /// Interval with the floor of one applied
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.interval == 0 {
            return Err("Recurrence interval must be at least 1".to_string());
        }

        if self.until.is_none() {
            return Err("Recurrence end date is required".to_string());
        }

        Ok(())
    }
}

/// One entry per calendar day of an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub skip_sundays: bool,
}

impl SpanRule {
    /// Number of calendar days covered, inclusive
    pub fn day_count(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }
}

/// An authored entry awaiting expansion at save time.
///
/// `skip_sundays` applies to both the recurrence and the multi-day span
/// branch. The template itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub entry: Entry,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
    #[serde(default)]
    pub skip_sundays: bool,
}

/// How a template turns into occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionPlan {
    Recurring(RecurrenceRule),
    Span(SpanRule),
    Single,
}

impl Template {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            recurrence: None,
            skip_sundays: false,
        }
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    pub fn skipping_sundays(mut self, skip: bool) -> Self {
        self.skip_sundays = skip;
        self
    }

    /// Check if this template repeats
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Decide the expansion branch.
    ///
    /// Span dates come from the raw start/end so that an overnight shift
    /// authored on one day (end before start) stays a single entry.
    pub fn plan(&self) -> ExpansionPlan {
        if let Some(rule) = self.recurrence {
            return ExpansionPlan::Recurring(rule);
        }

        match (self.entry.start, self.entry.end) {
            (Some(start), Some(end)) if end.date() > start.date() => ExpansionPlan::Span(SpanRule {
                start_date: start.date(),
                end_date: end.date(),
                skip_sundays: self.skip_sundays,
            }),
            _ => ExpansionPlan::Single,
        }
    }
}
