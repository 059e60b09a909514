// Entry module
// Work-order entry model: the schedulable unit placed on the time grid

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::date::{deserialize_wall_clock, normalize_end};

/// Lifecycle status of a work-order entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Draft,
    Open,
    Ongoing,
    Closed,
}

/// Assignment targets an entry is displayed under
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRefs {
    pub project_id: Option<i64>,
    pub team_ids: Vec<i64>,
    pub user_ids: Vec<i64>,
}

/// The grouping dimension rows are built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Project,
    Team,
    User,
}

/// One row of the grid.
///
/// Rows sort by variant and then id, with `Unassigned` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    Project(i64),
    Team(i64),
    User(i64),
    Unassigned,
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Project(id) => write!(f, "project:{}", id),
            EntityKey::Team(id) => write!(f, "team:{}", id),
            EntityKey::User(id) => write!(f, "user:{}", id),
            EntityKey::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// Chronological position of an entry within its (entity, day) bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceLabel {
    /// 1-based position
    pub position: usize,
    /// Bucket size
    pub total: usize,
}

impl fmt::Display for SequenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.position, self.total)
    }
}

/// Work-order entry as supplied by the surrounding application.
///
/// `start`/`end` are timezone-naive wall-clock values. A missing or
/// unparsable value is kept as `None`; such entries are skipped by layout
/// and sequencing rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<i64>,
    /// Display code such as `WO-0042`
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entity_refs: EntityRefs,
    #[serde(default, deserialize_with = "deserialize_wall_clock")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_wall_clock")]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// Derived by the sequence assigner; never read from input
    #[serde(default, skip_deserializing)]
    pub sequence_label: Option<SequenceLabel>,
}

impl Entry {
    /// Create a draft entry with the given times
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            code: None,
            title: title.into(),
            entity_refs: EntityRefs::default(),
            start: Some(start),
            end: Some(end),
            status: EntryStatus::Draft,
            notes: None,
            sequence_label: None,
        }
    }

    /// Create a builder for constructing entries with optional fields
    pub fn builder() -> EntryBuilder {
        EntryBuilder::new()
    }

    /// Validate the fields a caller must supply before submission.
    ///
    /// The engine itself never calls this: it recovers silently from
    /// missing or degenerate times.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Entry title cannot be empty".to_string());
        }

        if self.start.is_none() {
            return Err("Entry start time is required".to_string());
        }

        if self.end.is_none() {
            return Err("Entry end time is required".to_string());
        }

        Ok(())
    }

    /// Numeric tie-break embedded in the display code.
    pub fn serial(&self) -> u64 {
        self.code.as_deref().map_or(0, serial_from_code)
    }

    /// End with the overnight rollover applied.
    pub fn normalized_end(&self) -> Option<NaiveDateTime> {
        Some(normalize_end(self.start?, self.end?))
    }

    /// Start and normalized end, when both are known.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start?, self.normalized_end()?))
    }

    /// Get the duration of the entry
    pub fn duration(&self) -> Option<Duration> {
        self.interval().map(|(start, end)| end - start)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.map(|start| start.date())
    }

    /// Every row this entry is shown under for the given grouping.
    pub fn entity_keys(&self, group_by: GroupBy) -> Vec<EntityKey> {
        let keys: Vec<EntityKey> = match group_by {
            GroupBy::Project => self
                .entity_refs
                .project_id
                .map(EntityKey::Project)
                .into_iter()
                .collect(),
            GroupBy::Team => {
                let mut ids = self.entity_refs.team_ids.clone();
                ids.sort_unstable();
                ids.dedup();
                ids.into_iter().map(EntityKey::Team).collect()
            }
            GroupBy::User => {
                let mut ids = self.entity_refs.user_ids.clone();
                ids.sort_unstable();
                ids.dedup();
                ids.into_iter().map(EntityKey::User).collect()
            }
        };

        if keys.is_empty() {
            vec![EntityKey::Unassigned]
        } else {
            keys
        }
    }

    /// Append a line to the free-text notes
    pub fn append_note(&mut self, note: &str) {
        match self.notes {
            Some(ref mut notes) if !notes.trim().is_empty() => {
                notes.push('\n');
                notes.push_str(note);
            }
            _ => self.notes = Some(note.to_string()),
        }
    }
}

/// Digits of the trailing `-`-separated segment of a display code.
///
/// `WO-2024-0042` yields 42; a segment without digits yields 0.
pub fn serial_from_code(code: &str) -> u64 {
    let segment = code.rsplit('-').next().unwrap_or(code);
    let digits: String = segment.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Builder for creating entries with optional fields
pub struct EntryBuilder {
    id: Option<i64>,
    code: Option<String>,
    title: String,
    entity_refs: EntityRefs,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    status: EntryStatus,
    notes: Option<String>,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            code: None,
            title: String::new(),
            entity_refs: EntityRefs::default(),
            start: None,
            end: None,
            status: EntryStatus::Draft,
            notes: None,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn project(mut self, project_id: i64) -> Self {
        self.entity_refs.project_id = Some(project_id);
        self
    }

    pub fn team(mut self, team_id: i64) -> Self {
        self.entity_refs.team_ids.push(team_id);
        self
    }

    pub fn user(mut self, user_id: i64) -> Self {
        self.entity_refs.user_ids.push(user_id);
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the entry. Unlike `Entry::validate`, missing times are allowed.
    pub fn build(self) -> Entry {
        Entry {
            id: self.id,
            code: self.code,
            title: self.title,
            entity_refs: self.entity_refs,
            start: self.start,
            end: self.end,
            status: self.status,
            notes: self.notes,
            sequence_label: None,
        }
    }
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
