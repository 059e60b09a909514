// Settings module
// Grid window, resolution and gesture tuning for the scheduling engine

use serde::{Deserialize, Serialize};

use super::entry::GroupBy;

/// Default hard cap on recurrence iterations (about five years of dailies)
pub const DEFAULT_MAX_RECURRENCE_ITERATIONS: usize = 1825;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// First visible hour of the grid (inclusive)
    pub day_start_hour: u32,
    /// Last visible hour of the grid (exclusive)
    pub day_end_hour: u32,
    /// Grid resolution
    pub minutes_per_cell: u32,
    pub max_recurrence_iterations: usize,
    /// How long after a resize release an entry click is ignored
    pub resize_cooldown_ms: u64,
    pub default_group_by: GroupBy,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
            minutes_per_cell: 15,
            max_recurrence_iterations: DEFAULT_MAX_RECURRENCE_ITERATIONS,
            resize_cooldown_ms: 250,
            default_group_by: GroupBy::Project,
        }
    }
}

impl SchedulerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.day_end_hour > 24 {
            return Err("Day end hour must be at most 24".to_string());
        }

        if self.day_start_hour >= self.day_end_hour {
            return Err("Day start hour must be before day end hour".to_string());
        }

        if self.minutes_per_cell == 0 || 60 % self.minutes_per_cell != 0 {
            return Err("Minutes per cell must divide an hour evenly".to_string());
        }

        if self.max_recurrence_iterations == 0 {
            return Err("Recurrence iteration cap must be at least 1".to_string());
        }

        Ok(())
    }

    pub fn resize_cooldown(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.resize_cooldown_ms)
    }
}
