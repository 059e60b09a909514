//! Time grid model.
//!
//! Pure conversion between wall-clock time and discrete grid cells for a
//! visible window `[start_hour, end_hour)` at a fixed resolution. With the
//! default 15-minute resolution each hour holds four cells.
//!
//! Pointer measurement stays outside this module: the UI layer turns pixel
//! offsets into cell offsets with [`cell_at_offset`] and
//! [`cell_delta_from_pointer`] and everything else works in cells.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use crate::models::entry::Entry;
use crate::models::settings::SchedulerSettings;
use crate::utils::date::normalize_end;

pub const DEFAULT_MINUTES_PER_CELL: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("visible window {start}:00-{end}:00 is empty")]
    EmptyWindow { start: u32, end: u32 },
    #[error("visible window ends at hour {0}, past midnight")]
    WindowPastMidnight(u32),
    #[error("{0} minutes per cell does not divide an hour")]
    UnevenResolution(u32),
}

/// Cell span of an entry within the visible window, plus its display lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub start_cell: u32,
    /// Exclusive; always greater than `start_cell`
    pub end_cell: u32,
    pub lane: usize,
}

impl GridPosition {
    pub fn new(start_cell: u32, end_cell: u32) -> Self {
        Self {
            start_cell,
            end_cell: end_cell.max(start_cell + 1),
            lane: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.end_cell - self.start_cell
    }

    pub fn overlaps(&self, other: &GridPosition) -> bool {
        self.start_cell < other.end_cell && other.start_cell < self.end_cell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start_hour: u32,
    end_hour: u32,
    minutes_per_cell: u32,
}

impl TimeGrid {
    pub fn new(start_hour: u32, end_hour: u32, minutes_per_cell: u32) -> Result<Self, GridError> {
        if end_hour > 24 {
            return Err(GridError::WindowPastMidnight(end_hour));
        }
        if start_hour >= end_hour {
            return Err(GridError::EmptyWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        if minutes_per_cell == 0 || 60 % minutes_per_cell != 0 {
            return Err(GridError::UnevenResolution(minutes_per_cell));
        }

        Ok(Self {
            start_hour,
            end_hour,
            minutes_per_cell,
        })
    }

    pub fn from_settings(settings: &SchedulerSettings) -> Result<Self, GridError> {
        Self::new(
            settings.day_start_hour,
            settings.day_end_hour,
            settings.minutes_per_cell,
        )
    }

    /// Midnight-to-midnight grid at quarter-hour resolution
    pub fn full_day() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
            minutes_per_cell: DEFAULT_MINUTES_PER_CELL,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn minutes_per_cell(&self) -> u32 {
        self.minutes_per_cell
    }

    pub fn cells_per_hour(&self) -> u32 {
        60 / self.minutes_per_cell
    }

    pub fn total_cells(&self) -> u32 {
        (self.end_hour - self.start_hour) * self.cells_per_hour()
    }

    /// Wall-clock length of `cells` grid cells (may be negative)
    pub fn cells_to_duration(&self, cells: i64) -> Duration {
        Duration::minutes(cells * i64::from(self.minutes_per_cell))
    }

    fn window_minutes(&self) -> i64 {
        i64::from(self.end_hour - self.start_hour) * 60
    }

    fn window_origin(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.start_hour))
    }

    fn minutes_into_window(&self, time: NaiveTime) -> i64 {
        i64::from(time.hour() * 60 + time.minute()) - i64::from(self.start_hour * 60)
    }

    pub fn window_contains(&self, time: NaiveTime) -> bool {
        let offset = self.minutes_into_window(time);
        offset >= 0 && offset < self.window_minutes()
    }

    /// Cell holding `time`, or `None` when it is outside the visible window.
    /// Seconds are ignored; times between cell boundaries floor to the cell.
    pub fn cell_from_time(&self, time: NaiveTime) -> Option<u32> {
        if !self.window_contains(time) {
            return None;
        }
        let offset = self.minutes_into_window(time);
        u32::try_from(offset / i64::from(self.minutes_per_cell)).ok()
    }

    /// Wall-clock instant of a cell's leading edge on `date`.
    ///
    /// `cell == total_cells()` yields the window's closing boundary.
    pub fn time_from_cell(&self, cell: u32, date: NaiveDate) -> NaiveDateTime {
        self.window_origin(date) + self.cells_to_duration(i64::from(cell))
    }

    /// Cell span of `[start, end)` on `day`.
    ///
    /// Each boundary is clamped to the window independently and the result
    /// is at least one cell wide. An end at or before `start` rolls over to
    /// the next day first. Returns `None` when nothing of the interval is
    /// visible on `day`.
    pub fn position_for_interval(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        day: NaiveDate,
    ) -> Option<GridPosition> {
        let end = normalize_end(start, end);
        let origin = self.window_origin(day);
        let start_offset = (start - origin).num_minutes();
        let end_offset = (end - origin).num_minutes();

        if end_offset <= 0 || start_offset >= self.window_minutes() {
            return None;
        }

        let total = i64::from(self.total_cells());
        let per_cell = i64::from(self.minutes_per_cell);
        let start_cell = start_offset.div_euclid(per_cell).clamp(0, total - 1);
        let end_cell = ((end_offset + per_cell - 1) / per_cell).clamp(start_cell + 1, total);

        Some(GridPosition {
            start_cell: u32::try_from(start_cell).ok()?,
            end_cell: u32::try_from(end_cell).ok()?,
            lane: 0,
        })
    }

    /// Position of an entry on `day`; entries without a start are skipped.
    pub fn position_for_entry(&self, entry: &Entry, day: NaiveDate) -> Option<GridPosition> {
        let (start, end) = entry.interval()?;
        self.position_for_interval(start, end, day)
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        let settings = SchedulerSettings::default();
        Self {
            start_hour: settings.day_start_hour,
            end_hour: settings.day_end_hour,
            minutes_per_cell: settings.minutes_per_cell,
        }
    }
}

/// Cell under a pointer `offset` pixels from the row's leading edge,
/// clamped to the row. `None` for a row with no measurable width.
pub fn cell_at_offset(offset: f32, row_width: f32, total_cells: u32) -> Option<u32> {
    if !(row_width > 0.0) || total_cells == 0 || !offset.is_finite() {
        return None;
    }
    let cell_width = row_width / total_cells as f32;
    let cell = (offset / cell_width).floor().max(0.0) as u32;
    Some(cell.min(total_cells - 1))
}

/// Whole cells covered by a pointer movement of `pointer_delta` pixels.
pub fn cell_delta_from_pointer(pointer_delta: f32, row_width: f32, total_cells: u32) -> i64 {
    if !(row_width > 0.0) || total_cells == 0 || !pointer_delta.is_finite() {
        return 0;
    }
    let cell_width = row_width / total_cells as f32;
    (pointer_delta / cell_width).round() as i64
}
