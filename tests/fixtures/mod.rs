// Test fixtures - reusable test data
// Provides consistent work orders and templates across all test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use workorder_scheduler::models::entry::Entry;
use workorder_scheduler::models::recurrence::{Frequency, RecurrenceRule, Template};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Sep 2 2024
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    /// Saturday, Sep 7 2024
    pub fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 7).unwrap()
    }

    /// Sunday, Sep 8 2024
    pub fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 8).unwrap()
    }

    /// Jan 31 2024, for month-end clamping
    pub fn jan_31_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample work orders
pub mod entries {
    use super::*;

    pub fn work_order(id: i64, project: i64, start: NaiveDateTime, end: NaiveDateTime) -> Entry {
        Entry::builder()
            .id(id)
            .code(format!("WO-{:04}", id))
            .title(format!("Work order {}", id))
            .project(project)
            .start(start)
            .end(end)
            .build()
    }

    /// A morning on project 1: two overlapping jobs and one later job
    pub fn busy_morning() -> Vec<Entry> {
        let day = dates::monday();
        vec![
            work_order(1, 1, dates::at(day, 8, 0), dates::at(day, 9, 30)),
            work_order(2, 1, dates::at(day, 9, 0), dates::at(day, 10, 0)),
            work_order(3, 1, dates::at(day, 11, 0), dates::at(day, 12, 0)),
            work_order(4, 2, dates::at(day, 8, 30), dates::at(day, 9, 0)),
        ]
    }
}

/// Sample templates
pub mod templates {
    use super::*;

    /// Daily 07:00-08:00 inspection through the following Sunday
    pub fn daily_inspection() -> Template {
        let day = dates::monday();
        let entry = Entry::builder()
            .title("Daily inspection")
            .project(1)
            .start(dates::at(day, 7, 0))
            .end(dates::at(day, 8, 0))
            .build();
        Template::new(entry).with_recurrence(RecurrenceRule::daily(dates::sunday()))
    }

    pub fn monthly_on_31st(until: NaiveDate) -> Template {
        let day = dates::jan_31_2024();
        let entry = Entry::builder()
            .title("Month-end stock take")
            .start(dates::at(day, 16, 0))
            .end(dates::at(day, 17, 0))
            .build();
        Template::new(entry).with_recurrence(RecurrenceRule::new(Frequency::Monthly, 1, until))
    }
}
