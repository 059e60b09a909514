//! Lane allocation for overlapping entries sharing one row.
//!
//! Greedy interval partitioning: entries are visited by start cell and each
//! goes into the first lane whose last entry has already ended. Entries with
//! the same start cell keep their input order, so callers feed them in
//! chronological order.

use crate::services::grid::GridPosition;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lane_count: usize,
    /// Lane per input position, in input order
    pub lanes: Vec<usize>,
}

impl LaneAssignment {
    /// Rows render at least one lane tall, even when empty
    pub fn row_height(&self) -> usize {
        self.lane_count.max(1)
    }
}

pub fn allocate_lanes(positions: &[GridPosition]) -> LaneAssignment {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by_key(|&index| positions[index].start_cell);

    let mut lane_ends: Vec<u32> = Vec::new();
    let mut lanes = vec![0; positions.len()];

    for index in order {
        let position = positions[index];
        match lane_ends.iter().position(|&end| end <= position.start_cell) {
            Some(lane) => {
                lane_ends[lane] = position.end_cell;
                lanes[index] = lane;
            }
            None => {
                lane_ends.push(position.end_cell);
                lanes[index] = lane_ends.len() - 1;
            }
        }
    }

    LaneAssignment {
        lane_count: lane_ends.len(),
        lanes,
    }
}

/// Allocate lanes and write them into the positions; returns the lane count.
pub fn assign_lanes(positions: &mut [GridPosition]) -> usize {
    let assignment = allocate_lanes(positions);
    for (position, lane) in positions.iter_mut().zip(assignment.lanes) {
        position.lane = lane;
    }
    assignment.lane_count
}
