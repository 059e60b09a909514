//! Drag-to-reposition sessions.
//!
//! A session remembers where on the entry the pointer grabbed it, so the
//! entry follows the pointer by that same offset instead of snapping its
//! start to the pointer cell. Duration is carried over verbatim.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::entry::{EntityKey, Entry};
use crate::services::grid::TimeGrid;

/// Row and cell under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub entity: EntityKey,
    pub date: NaiveDate,
    pub pointer_cell: u32,
}

/// Where the entry would land if dropped now. Visual feedback only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub entity: EntityKey,
    pub date: NaiveDate,
    pub start_cell: u32,
    pub end_cell: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Proposed move emitted on drop; the caller persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragMutation {
    pub entry_id: i64,
    pub new_entity: EntityKey,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub entry_id: i64,
    pub origin_entity: EntityKey,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub duration: Duration,
    /// Pointer cell minus the entry's start cell at grab time
    pub grab_offset: i64,
    pub preview: Option<DragPreview>,
}

impl DragSession {
    /// Start dragging `entry` from the row `entity` on `date`.
    ///
    /// Returns `None` for entries that cannot be moved: no id, no start
    /// time, or not visible on that day.
    ///
    /// The grab offset is measured from the entry's visible start cell. An
    /// entry starting before the window lands on the window's first cell
    /// when dropped without moving, so compare the mutation against the
    /// original times to detect an unchanged drop.
    pub fn begin(
        entry: &Entry,
        entity: EntityKey,
        date: NaiveDate,
        pointer_cell: u32,
        grid: &TimeGrid,
    ) -> Option<Self> {
        let entry_id = entry.id?;
        let (start, end) = entry.interval()?;
        let position = grid.position_for_interval(start, end, date)?;

        Some(Self {
            entry_id,
            origin_entity: entity,
            original_start: start,
            original_end: end,
            duration: end - start,
            grab_offset: i64::from(pointer_cell) - i64::from(position.start_cell),
            preview: None,
        })
    }

    /// New start cell for a pointer cell, kept inside the grid
    pub fn target_cell(&self, pointer_cell: u32, grid: &TimeGrid) -> u32 {
        let last_cell = i64::from(grid.total_cells()) - 1;
        let cell = (i64::from(pointer_cell) - self.grab_offset).clamp(0, last_cell);
        u32::try_from(cell).unwrap_or(0)
    }

    fn project(&self, target: DropTarget, grid: &TimeGrid) -> DragPreview {
        let start_cell = self.target_cell(target.pointer_cell, grid);
        let start = grid.time_from_cell(start_cell, target.date);
        let end = start + self.duration;
        let end_cell = grid
            .position_for_interval(start, end, target.date)
            .map_or(start_cell + 1, |position| position.end_cell);

        DragPreview {
            entity: target.entity,
            date: target.date,
            start_cell,
            end_cell,
            start,
            end,
        }
    }

    /// Recompute the preview for the row under the pointer.
    pub fn hover(&mut self, target: DropTarget, grid: &TimeGrid) -> DragPreview {
        let preview = self.project(target, grid);
        self.preview = Some(preview);
        preview
    }

    /// Final move for a drop on `target`.
    pub fn finish(&self, target: DropTarget, grid: &TimeGrid) -> DragMutation {
        let landed = self.project(target, grid);
        DragMutation {
            entry_id: self.entry_id,
            new_entity: landed.entity,
            new_start: landed.start,
            new_end: landed.end,
        }
    }
}
