// Entry Resize System
//
// Moves one boundary of an entry by whole grid cells.
// - Left edge: adjusts start time, end stays fixed
// - Right edge: adjusts end time, start stays fixed
//
// On release only the cell delta is converted back to minutes and applied
// to the original wall-clock boundary, so clamping inside the visible
// window never leaks into the committed times.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::entry::Entry;
use crate::services::grid::{GridPosition, TimeGrid};

/// Which edge of the entry is being resized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// Start boundary
    Left,
    /// End boundary
    Right,
}

/// Proposed boundary change emitted on release; the caller persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeMutation {
    pub entry_id: i64,
    pub edge: ResizeEdge,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

/// Context for an active resize operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub entry_id: i64,
    pub edge: ResizeEdge,
    pub date: NaiveDate,
    /// Original start time
    pub original_start: NaiveDateTime,
    /// Original end time, after overnight rollover
    pub original_end: NaiveDateTime,
    pub baseline_start_cell: u32,
    pub baseline_width: u32,
    pub baseline_pointer_cell: u32,
    /// Candidate geometry from the latest pointer move
    pub start_cell: u32,
    pub width: u32,
}

impl ResizeSession {
    /// Grab `edge` of `entry` as shown on `date`.
    ///
    /// Returns `None` for entries without an id or start time, or not
    /// visible on that day.
    pub fn begin(
        entry: &Entry,
        edge: ResizeEdge,
        date: NaiveDate,
        pointer_cell: u32,
        grid: &TimeGrid,
    ) -> Option<Self> {
        let entry_id = entry.id?;
        let (start, end) = entry.interval()?;
        let position = grid.position_for_interval(start, end, date)?;

        Some(Self {
            entry_id,
            edge,
            date,
            original_start: start,
            original_end: end,
            baseline_start_cell: position.start_cell,
            baseline_width: position.width(),
            baseline_pointer_cell: pointer_cell,
            start_cell: position.start_cell,
            width: position.width(),
        })
    }

    /// Recompute the candidate cells for the pointer's current cell.
    pub fn update(&mut self, pointer_cell: u32, grid: &TimeGrid) -> GridPosition {
        let delta = i64::from(pointer_cell) - i64::from(self.baseline_pointer_cell);
        let start = i64::from(self.baseline_start_cell);
        let width = i64::from(self.baseline_width);
        let total = i64::from(grid.total_cells());

        let (new_start, new_width) = match self.edge {
            ResizeEdge::Left => {
                let right = start + width;
                let new_start = (start + delta).clamp(0, right - 1);
                (new_start, right - new_start)
            }
            ResizeEdge::Right => (start, (width + delta).max(1).min(total - start)),
        };

        self.start_cell = u32::try_from(new_start).unwrap_or(self.baseline_start_cell);
        self.width = u32::try_from(new_width).unwrap_or(1).max(1);
        self.preview()
    }

    /// Candidate geometry for live rendering
    pub fn preview(&self) -> GridPosition {
        GridPosition::new(self.start_cell, self.start_cell + self.width)
    }

    /// Net change in cells of the boundary being moved
    pub fn cell_delta(&self) -> i64 {
        match self.edge {
            ResizeEdge::Left => i64::from(self.start_cell) - i64::from(self.baseline_start_cell),
            ResizeEdge::Right => i64::from(self.width) - i64::from(self.baseline_width),
        }
    }

    /// Commit the gesture. `None` when nothing changed or the change would
    /// leave the entry without a positive duration.
    pub fn finish(&self, grid: &TimeGrid) -> Option<ResizeMutation> {
        let delta = self.cell_delta();
        if delta == 0 {
            return None;
        }

        let shift = grid.cells_to_duration(delta);
        let (new_start, new_end) = match self.edge {
            ResizeEdge::Left => (self.original_start + shift, self.original_end),
            ResizeEdge::Right => (self.original_start, self.original_end + shift),
        };

        if new_end <= new_start {
            log::debug!(
                "Resize of entry {} would collapse it ({} to {}), ignoring",
                self.entry_id,
                new_start,
                new_end
            );
            return None;
        }

        Some(ResizeMutation {
            entry_id: self.entry_id,
            edge: self.edge,
            new_start,
            new_end,
        })
    }
}
