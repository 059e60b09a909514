//! Template expansion.
//!
//! Turns one authored template into the batch of dated, non-recurring
//! entries that gets persisted. Expansion is a pure transform: persistence
//! and any counters are the caller's business once it returns.

use chrono::Duration;

use crate::models::entry::Entry;
use crate::models::recurrence::{ExpansionPlan, Template};
use crate::models::settings::{SchedulerSettings, DEFAULT_MAX_RECURRENCE_ITERATIONS};
use crate::utils::date::{format_note_date, normalize_end};

mod dates;

pub use dates::{OccurrenceDate, OccurrenceDates};

/// Expand with the default iteration cap.
pub fn expand(template: &Template) -> Vec<Entry> {
    expand_with_limit(template, DEFAULT_MAX_RECURRENCE_ITERATIONS)
}

/// Expand with the iteration cap from loaded settings.
pub fn expand_with_settings(template: &Template, settings: &SchedulerSettings) -> Vec<Entry> {
    expand_with_limit(template, settings.max_recurrence_iterations)
}

/// Expand a template into occurrences, in chronological order.
///
/// - Recurring: one occurrence per rule step from the start date through
///   `until`, at the template's time of day.
/// - Multi-day, non-recurring: one occurrence per day of the span, each
///   with the template's start and end time of day.
/// - Otherwise the template entry itself.
///
/// A template without a start time, or a recurring one without an end
/// date, yields nothing. Output stops after `max_iterations` occurrences.
pub fn expand_with_limit(template: &Template, max_iterations: usize) -> Vec<Entry> {
    let source = &template.entry;
    let Some(start) = source.start else {
        log::debug!("Template '{}' has no start time, nothing to expand", source.title);
        return Vec::new();
    };

    let plan = template.plan();
    if plan == ExpansionPlan::Single {
        return vec![source.clone()];
    }

    let Some(mut dates) = occurrence_dates(template, max_iterations) else {
        log::debug!("Recurring template '{}' has no end date, nothing to expand", source.title);
        return Vec::new();
    };

    // Recurring occurrences keep the template's day span; span days are one day each
    let day_offset = match plan {
        ExpansionPlan::Recurring(_) => source
            .normalized_end()
            .map_or(0, |end| (end.date() - start.date()).num_days()),
        ExpansionPlan::Span(_) | ExpansionPlan::Single => 0,
    };

    let occurrences: Vec<Entry> = dates
        .by_ref()
        .map(|occurrence| build_occurrence(source, occurrence, day_offset))
        .collect();

    if dates.is_truncated() {
        log::warn!(
            "Expansion of '{}' stopped at the {} occurrence cap",
            source.title,
            max_iterations
        );
    }
    log::debug!(
        "Expanded template '{}' into {} occurrences",
        source.title,
        occurrences.len()
    );

    occurrences
}

/// Number of entries `expand` would produce, without building them.
pub fn total_occurrences(template: &Template) -> usize {
    total_occurrences_with_limit(template, DEFAULT_MAX_RECURRENCE_ITERATIONS)
}

pub fn total_occurrences_with_limit(template: &Template, max_iterations: usize) -> usize {
    if template.entry.start.is_none() {
        return 0;
    }
    if template.plan() == ExpansionPlan::Single {
        return 1;
    }
    occurrence_dates(template, max_iterations).map_or(0, Iterator::count)
}

/// Occurrence dates of a template, for previews and confirmations.
pub fn occurrence_dates(template: &Template, max_iterations: usize) -> Option<OccurrenceDates> {
    let start = template.entry.start?;
    OccurrenceDates::new(
        template.plan(),
        start.date(),
        template.skip_sundays,
        max_iterations,
    )
}

fn build_occurrence(source: &Entry, occurrence: OccurrenceDate, day_offset: i64) -> Entry {
    let mut entry = source.clone();
    entry.sequence_label = None;

    let start = source
        .start
        .map(|start| occurrence.date.and_time(start.time()));
    entry.start = start;
    entry.end = match (start, source.end) {
        (Some(start), Some(end)) => {
            let end_date = occurrence.date + Duration::days(day_offset);
            Some(normalize_end(start, end_date.and_time(end.time())))
        }
        _ => None,
    };

    if let Some(sunday) = occurrence.moved_from {
        entry.append_note(&format!("moved from Sunday {}", format_note_date(sunday)));
    }

    entry
}
