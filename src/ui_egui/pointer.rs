// Pointer geometry for a grid row
//
// Translates egui screen coordinates into grid cells and back. Rows run
// left to right, one cell per `minutes_per_cell` slice of the window.

use egui::{pos2, vec2, CursorIcon, Pos2, Rect, Vec2};

use crate::interaction::ResizeEdge;
use crate::services::grid::{cell_at_offset, cell_delta_from_pointer, GridPosition, TimeGrid};

/// Width of the resize hit area at each end of an entry
pub const HANDLE_SIZE: f32 = 8.0;

/// Screen rect of one entity row and the number of cells it spans
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub rect: Rect,
    pub total_cells: u32,
}

impl RowGeometry {
    pub fn new(rect: Rect, grid: &TimeGrid) -> Self {
        Self {
            rect,
            total_cells: grid.total_cells(),
        }
    }

    pub fn cell_width(&self) -> f32 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.rect.width() / self.total_cells as f32
    }

    /// Cell under `pos`, or `None` when the pointer is outside the row
    pub fn cell_at(&self, pos: Pos2) -> Option<u32> {
        if !self.rect.contains(pos) {
            return None;
        }
        cell_at_offset(pos.x - self.rect.left(), self.rect.width(), self.total_cells)
    }

    /// Whole cells covered by a horizontal pointer movement
    pub fn cell_delta(&self, delta: Vec2) -> i64 {
        cell_delta_from_pointer(delta.x, self.rect.width(), self.total_cells)
    }

    /// Screen rect for a placed entry in its lane
    pub fn cell_rect(&self, position: &GridPosition, lane_height: f32) -> Rect {
        let cell_width = self.cell_width();
        Rect::from_min_size(
            pos2(
                self.rect.left() + position.start_cell as f32 * cell_width,
                self.rect.top() + position.lane as f32 * lane_height,
            ),
            vec2(position.width() as f32 * cell_width, lane_height),
        )
    }
}

/// Resize edge under `pos` for an entry drawn at `entry_rect`.
/// Entries too narrow for two handles only expose the right edge.
pub fn edge_at(entry_rect: Rect, pos: Pos2) -> Option<ResizeEdge> {
    if !entry_rect.expand2(vec2(HANDLE_SIZE / 2.0, 0.0)).contains(pos) {
        return None;
    }
    if (pos.x - entry_rect.right()).abs() <= HANDLE_SIZE / 2.0 {
        return Some(ResizeEdge::Right);
    }
    if entry_rect.width() > HANDLE_SIZE * 2.0 && (pos.x - entry_rect.left()).abs() <= HANDLE_SIZE / 2.0 {
        return Some(ResizeEdge::Left);
    }
    None
}

pub fn cursor_icon(edge: ResizeEdge) -> CursorIcon {
    match edge {
        ResizeEdge::Left => CursorIcon::ResizeWest,
        ResizeEdge::Right => CursorIcon::ResizeEast,
    }
}
