//! Pointer gesture handling for the scheduling grid.
//!
//! [`InteractionSurface`] owns at most one gesture at a time. Drag and
//! resize are mutually exclusive, and nothing is mutated here: gestures end
//! by emitting a [`DragMutation`] or [`ResizeMutation`] for the caller to
//! persist.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::models::entry::{EntityKey, Entry};
use crate::models::settings::SchedulerSettings;
use crate::services::grid::{GridError, GridPosition, TimeGrid};

pub mod drag;
pub mod resize;

pub use drag::{DragMutation, DragPreview, DragSession, DropTarget};
pub use resize::{ResizeEdge, ResizeMutation, ResizeSession};

/// How the surface responds to pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceMode {
    #[default]
    Editable,
    ReadOnly,
    /// Clicks select entries; drag and resize are disabled
    MultiSelect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

#[derive(Debug, Clone)]
pub struct InteractionSurface {
    grid: TimeGrid,
    mode: SurfaceMode,
    state: GestureState,
    resize_cooldown: Duration,
    cooldown_until: Option<Instant>,
}

impl InteractionSurface {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            mode: SurfaceMode::Editable,
            state: GestureState::Idle,
            resize_cooldown: SchedulerSettings::default().resize_cooldown(),
            cooldown_until: None,
        }
    }

    pub fn from_settings(settings: &SchedulerSettings) -> Result<Self, GridError> {
        let grid = TimeGrid::from_settings(settings)?;
        Ok(Self::new(grid).with_resize_cooldown(settings.resize_cooldown()))
    }

    pub fn with_resize_cooldown(mut self, cooldown: Duration) -> Self {
        self.resize_cooldown = cooldown;
        self
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, GestureState::Resizing(_))
    }

    /// Live drag preview, if a drag is hovering a row
    pub fn drag_preview(&self) -> Option<DragPreview> {
        match &self.state {
            GestureState::Dragging(session) => session.preview,
            _ => None,
        }
    }

    /// Live resize geometry, if a resize is active
    pub fn resize_preview(&self) -> Option<GridPosition> {
        match &self.state {
            GestureState::Resizing(session) => Some(session.preview()),
            _ => None,
        }
    }

    /// Switch mode. Leaving editable mode drops any gesture in progress.
    pub fn set_mode(&mut self, mode: SurfaceMode) {
        if self.mode == mode {
            return;
        }
        if mode != SurfaceMode::Editable {
            self.cancel();
        }
        log::debug!("Interaction surface mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    /// Start dragging. Returns `false` when the surface is busy, not
    /// editable, or the entry can't be dragged.
    pub fn begin_drag(
        &mut self,
        entry: &Entry,
        entity: EntityKey,
        date: NaiveDate,
        pointer_cell: u32,
    ) -> bool {
        if self.mode != SurfaceMode::Editable || !self.is_idle() {
            return false;
        }
        match DragSession::begin(entry, entity, date, pointer_cell, &self.grid) {
            Some(session) => {
                log::debug!("Drag started for entry {}", session.entry_id);
                self.state = GestureState::Dragging(session);
                true
            }
            None => false,
        }
    }

    /// Update the drag preview for the row under the pointer.
    pub fn drag_over(&mut self, target: DropTarget) -> Option<DragPreview> {
        match &mut self.state {
            GestureState::Dragging(session) => Some(session.hover(target, &self.grid)),
            _ => None,
        }
    }

    /// End the drag. Dropping outside any row (`None`) cancels it.
    pub fn drop_on(&mut self, target: Option<DropTarget>) -> Option<DragMutation> {
        if !self.is_dragging() {
            return None;
        }
        let GestureState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };

        match target {
            Some(target) => {
                let mutation = session.finish(target, &self.grid);
                log::debug!(
                    "Drag of entry {} dropped at {} on {}",
                    mutation.entry_id,
                    mutation.new_start,
                    mutation.new_entity
                );
                Some(mutation)
            }
            None => {
                log::debug!("Drag of entry {} dropped outside the grid", session.entry_id);
                None
            }
        }
    }

    /// Abandon any gesture without emitting a mutation.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => {}
            GestureState::Dragging(session) => {
                log::debug!("Drag of entry {} cancelled", session.entry_id)
            }
            GestureState::Resizing(session) => {
                log::debug!("Resize of entry {} cancelled", session.entry_id)
            }
        }
    }

    /// Grab an entry edge. Same preconditions as [`begin_drag`](Self::begin_drag).
    pub fn begin_resize(
        &mut self,
        entry: &Entry,
        edge: ResizeEdge,
        date: NaiveDate,
        pointer_cell: u32,
    ) -> bool {
        if self.mode != SurfaceMode::Editable || !self.is_idle() {
            return false;
        }
        match ResizeSession::begin(entry, edge, date, pointer_cell, &self.grid) {
            Some(session) => {
                log::debug!("Resize ({:?}) started for entry {}", edge, session.entry_id);
                self.state = GestureState::Resizing(session);
                true
            }
            None => false,
        }
    }

    pub fn resize_to(&mut self, pointer_cell: u32) -> Option<GridPosition> {
        match &mut self.state {
            GestureState::Resizing(session) => Some(session.update(pointer_cell, &self.grid)),
            _ => None,
        }
    }

    /// End the resize and start the click cooldown, so the release isn't
    /// also read as a click that opens the entry.
    pub fn release_resize(&mut self, now: Instant) -> Option<ResizeMutation> {
        if !self.is_resizing() {
            return None;
        }
        let GestureState::Resizing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.cooldown_until = Some(now + self.resize_cooldown);

        let mutation = session.finish(&self.grid);
        if let Some(mutation) = &mutation {
            log::debug!(
                "Resize of entry {} committed: {} to {}",
                mutation.entry_id,
                mutation.new_start,
                mutation.new_end
            );
        }
        mutation
    }

    /// Whether a click on an entry should open it
    pub fn accepts_entry_click(&self, now: Instant) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.cooldown_until.map_or(true, |until| now >= until)
    }
}

impl Default for InteractionSurface {
    fn default() -> Self {
        Self::new(TimeGrid::default())
    }
}
