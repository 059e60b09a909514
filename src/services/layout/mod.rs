//! Read-only layout for the day and week grids.
//!
//! Combines the time grid, sequence labels and lane allocation into rows
//! ready for rendering. A display filter decides which entries are placed,
//! while numbering always comes from the unfiltered collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::entry::{EntityKey, Entry, GroupBy, SequenceLabel};
use crate::services::grid::{GridPosition, TimeGrid};

pub mod lanes;
pub mod sequence;

pub use lanes::{allocate_lanes, assign_lanes, LaneAssignment};
pub use sequence::{assign_sequence, compare_chronological, SequenceLabels};

/// An entry placed in one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEntry {
    /// Index into the entry slice the layout was built from
    pub index: usize,
    pub entry_id: Option<i64>,
    pub entity: EntityKey,
    pub position: GridPosition,
    pub sequence: Option<SequenceLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub entity: EntityKey,
    pub lane_count: usize,
    /// Sorted by start cell, then chronologically
    pub items: Vec<PlacedEntry>,
}

impl RowLayout {
    pub fn row_height(&self) -> usize {
        self.lane_count.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub date: NaiveDate,
    /// Ordered by entity key
    pub rows: Vec<RowLayout>,
}

impl DayLayout {
    pub fn row(&self, entity: EntityKey) -> Option<&RowLayout> {
        self.rows.iter().find(|row| row.entity == entity)
    }

    /// Every placement of the entry at `index` (one per row it appears in)
    pub fn placements(&self, index: usize) -> impl Iterator<Item = &PlacedEntry> {
        self.rows
            .iter()
            .flat_map(|row| row.items.iter())
            .filter(move |item| item.index == index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lay out one day, placing only entries accepted by `filter`.
pub fn layout_day<F>(
    entries: &[Entry],
    date: NaiveDate,
    group_by: GroupBy,
    grid: &TimeGrid,
    filter: F,
) -> DayLayout
where
    F: Fn(&Entry) -> bool,
{
    let labels = assign_sequence(entries, group_by);
    build_day(entries, date, group_by, grid, &labels, &filter)
}

/// Lay out consecutive days (week view) sharing one set of sequence labels.
pub fn layout_range<F>(
    entries: &[Entry],
    dates: &[NaiveDate],
    group_by: GroupBy,
    grid: &TimeGrid,
    filter: F,
) -> Vec<DayLayout>
where
    F: Fn(&Entry) -> bool,
{
    let labels = assign_sequence(entries, group_by);
    dates
        .iter()
        .map(|&date| build_day(entries, date, group_by, grid, &labels, &filter))
        .collect()
}

fn build_day<F>(
    entries: &[Entry],
    date: NaiveDate,
    group_by: GroupBy,
    grid: &TimeGrid,
    labels: &SequenceLabels,
    filter: &F,
) -> DayLayout
where
    F: Fn(&Entry) -> bool,
{
    let mut rows: BTreeMap<EntityKey, Vec<PlacedEntry>> = BTreeMap::new();

    for (index, entry) in entries.iter().enumerate() {
        if !filter(entry) {
            continue;
        }
        let (Some(position), Some(start_day)) =
            (grid.position_for_entry(entry, date), entry.start_date())
        else {
            continue;
        };

        for entity in entry.entity_keys(group_by) {
            rows.entry(entity).or_default().push(PlacedEntry {
                index,
                entry_id: entry.id,
                entity,
                position,
                sequence: labels.get(index, entity, start_day),
            });
        }
    }

    let rows = rows
        .into_iter()
        .map(|(entity, mut items)| {
            items.sort_by(|a, b| {
                a.position
                    .start_cell
                    .cmp(&b.position.start_cell)
                    .then_with(|| compare_chronological(&entries[a.index], &entries[b.index]))
            });

            let positions: Vec<GridPosition> = items.iter().map(|item| item.position).collect();
            let assignment = allocate_lanes(&positions);
            for (item, lane) in items.iter_mut().zip(assignment.lanes) {
                item.position.lane = lane;
            }

            RowLayout {
                entity,
                lane_count: assignment.lane_count,
                items,
            }
        })
        .collect();

    DayLayout { date, rows }
}
