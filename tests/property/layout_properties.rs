// Property-based tests for the time grid, lane allocation and gestures

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use workorder_scheduler::interaction::{DragSession, DropTarget, ResizeEdge, ResizeSession};
use workorder_scheduler::models::entry::{EntityKey, Entry, GroupBy};
use workorder_scheduler::services::grid::{GridPosition, TimeGrid};
use workorder_scheduler::services::layout::{allocate_lanes, layout_day};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 14).unwrap()
}

fn grid() -> TimeGrid {
    TimeGrid::new(6, 22, 15).unwrap()
}

fn at_minutes(minutes: i64) -> NaiveDateTime {
    day().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn entry(id: i64, project: i64, start_minutes: i64, length: i64) -> Entry {
    Entry::builder()
        .id(id)
        .code(format!("WO-{}", id))
        .title("Job")
        .project(project)
        .start(at_minutes(start_minutes))
        .end(at_minutes(start_minutes + length))
        .build()
}

fn positions() -> impl Strategy<Value = Vec<GridPosition>> {
    prop::collection::vec((0u32..60, 1u32..12), 0..30).prop_map(|spans| {
        spans
            .into_iter()
            .map(|(start, width)| GridPosition::new(start, start + width))
            .collect()
    })
}

proptest! {
    /// Every cell maps back to its own start time
    #[test]
    fn prop_cell_time_round_trip(cell in 0u32..64) {
        let grid = grid();
        let time = grid.time_from_cell(cell, day());
        prop_assert_eq!(grid.cell_from_time(time.time()), Some(cell));
    }

    /// Entries sharing a lane never overlap, and no lane is left unused
    #[test]
    fn prop_lanes_never_overlap(mut positions in positions()) {
        positions.sort_by_key(|position| position.start_cell);
        let assignment = allocate_lanes(&positions);

        for (i, a) in positions.iter().enumerate() {
            for (j, b) in positions.iter().enumerate().skip(i + 1) {
                if assignment.lanes[i] == assignment.lanes[j] {
                    prop_assert!(!a.overlaps(b), "{:?} and {:?} share a lane", a, b);
                }
            }
        }
        for lane in 0..assignment.lane_count {
            prop_assert!(assignment.lanes.contains(&lane));
        }
    }

    /// Hiding entries never changes the labels of those still shown
    #[test]
    fn prop_filter_keeps_sequence_labels(
        jobs in prop::collection::vec((1i64..4, 360i64..1200, 15i64..180), 1..20),
        hidden_mask in prop::collection::vec(any::<bool>(), 20),
    ) {
        let entries: Vec<Entry> = jobs
            .iter()
            .enumerate()
            .map(|(i, &(project, start, length))| entry(i as i64, project, start, length))
            .collect();

        let full = layout_day(&entries, day(), GroupBy::Project, &grid(), |_| true);
        let filtered = layout_day(&entries, day(), GroupBy::Project, &grid(), |entry| {
            !hidden_mask[entry.id.unwrap_or(0) as usize]
        });

        for row in &filtered.rows {
            for item in &row.items {
                let unfiltered = full.placements(item.index).find(|p| p.entity == item.entity);
                prop_assert_eq!(unfiltered.map(|p| p.sequence), Some(item.sequence));
            }
        }
    }

    /// A drop anywhere keeps the wall-clock duration
    #[test]
    fn prop_drag_preserves_duration(
        start in 360i64..1300,
        length in 15i64..240,
        grab in 0u32..64,
        drop in 0u32..64,
    ) {
        let grid = grid();
        let job = entry(1, 1, start, length);
        if let Some(session) = DragSession::begin(&job, EntityKey::Project(1), day(), grab, &grid) {
            let mutation = session.finish(
                DropTarget { entity: EntityKey::Project(2), date: day(), pointer_cell: drop },
                &grid,
            );
            prop_assert_eq!(mutation.new_end - mutation.new_start, Duration::minutes(length));
            prop_assert!(grid.cell_from_time(mutation.new_start.time()).is_some());
        }
    }

    /// Resizing one edge never touches the other, and never collapses the entry
    #[test]
    fn prop_resize_keeps_opposite_boundary(
        start in 360i64..1300,
        length in 5i64..240,
        left in any::<bool>(),
        grab in 0u32..64,
        pointer in 0u32..64,
    ) {
        let grid = grid();
        let job = entry(1, 1, start, length);
        let edge = if left { ResizeEdge::Left } else { ResizeEdge::Right };
        if let Some(mut session) = ResizeSession::begin(&job, edge, day(), grab, &grid) {
            let preview = session.update(pointer, &grid);
            prop_assert!(preview.end_cell <= grid.total_cells());
            prop_assert!(preview.width() >= 1);

            if let Some(mutation) = session.finish(&grid) {
                prop_assert!(mutation.new_end > mutation.new_start);
                match edge {
                    ResizeEdge::Left => prop_assert_eq!(mutation.new_end, at_minutes(start + length)),
                    ResizeEdge::Right => prop_assert_eq!(mutation.new_start, at_minutes(start)),
                }
            }
        }
    }
}
