//! Sequence labels ("2 of 5") per (entity, day) bucket.
//!
//! Numbering is always computed over the full, unfiltered collection for
//! the day so that search or view filters never change a denominator. The
//! caller drops labels for entries its filter hides.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::entry::{EntityKey, Entry, GroupBy, SequenceLabel};

/// Start time ascending, then the serial from the display code.
pub fn compare_chronological(a: &Entry, b: &Entry) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.serial().cmp(&b.serial()))
}

/// Labels keyed by the entry's index in the authoritative slice.
#[derive(Debug, Clone, Default)]
pub struct SequenceLabels {
    labels: HashMap<(usize, EntityKey, NaiveDate), SequenceLabel>,
    bucket_sizes: HashMap<(EntityKey, NaiveDate), usize>,
}

impl SequenceLabels {
    pub fn get(&self, index: usize, entity: EntityKey, day: NaiveDate) -> Option<SequenceLabel> {
        self.labels.get(&(index, entity, day)).copied()
    }

    pub fn bucket_size(&self, entity: EntityKey, day: NaiveDate) -> usize {
        self.bucket_sizes.get(&(entity, day)).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Copy each entry's label for its primary row onto the entry itself.
    ///
    /// `entries` must be the same slice the labels were computed from.
    pub fn annotate(&self, entries: &mut [Entry], group_by: GroupBy) {
        for (index, entry) in entries.iter_mut().enumerate() {
            let label = entry.start_date().and_then(|day| {
                entry
                    .entity_keys(group_by)
                    .first()
                    .and_then(|&entity| self.get(index, entity, day))
            });
            entry.sequence_label = label;
        }
    }
}

/// Label every entry with its position in each (entity, start day) bucket.
/// Entries without a start time are left unlabelled.
pub fn assign_sequence(entries: &[Entry], group_by: GroupBy) -> SequenceLabels {
    let mut buckets: BTreeMap<(EntityKey, NaiveDate), Vec<usize>> = BTreeMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(day) = entry.start_date() else {
            continue;
        };
        for entity in entry.entity_keys(group_by) {
            buckets.entry((entity, day)).or_default().push(index);
        }
    }

    let mut result = SequenceLabels::default();
    for ((entity, day), mut members) in buckets {
        members.sort_by(|&a, &b| compare_chronological(&entries[a], &entries[b]));
        let total = members.len();
        result.bucket_sizes.insert((entity, day), total);
        for (offset, index) in members.into_iter().enumerate() {
            result.labels.insert(
                (index, entity, day),
                SequenceLabel {
                    position: offset + 1,
                    total,
                },
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 12).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn entry(code: &str, project: i64, start: NaiveDateTime) -> Entry {
        Entry::builder()
            .title(code)
            .code(code)
            .project(project)
            .start(start)
            .end(start + chrono::Duration::hours(1))
            .build()
    }

    fn labels_for(labels: &SequenceLabels, entity: EntityKey, count: usize) -> Vec<Option<String>> {
        (0..count)
            .map(|i| labels.get(i, entity, day()).map(|l| l.to_string()))
            .collect()
    }

    #[test]
    fn test_orders_by_start_time() {
        let entries = vec![
            entry("WO-3", 1, at(14, 0)),
            entry("WO-1", 1, at(8, 0)),
            entry("WO-2", 1, at(10, 0)),
        ];
        let labels = assign_sequence(&entries, GroupBy::Project);
        assert_eq!(
            labels_for(&labels, EntityKey::Project(1), 3),
            vec![
                Some("3 of 3".to_string()),
                Some("1 of 3".to_string()),
                Some("2 of 3".to_string()),
            ]
        );
    }

    #[test]
    fn test_serial_breaks_ties() {
        let entries = vec![
            entry("WO-0120", 1, at(9, 0)),
            entry("WO-0007", 1, at(9, 0)),
            entry("ADHOC", 1, at(9, 0)),
        ];
        let labels = assign_sequence(&entries, GroupBy::Project);
        let project = EntityKey::Project(1);
        assert_eq!(labels.get(2, project, day()).unwrap().position, 1);
        assert_eq!(labels.get(1, project, day()).unwrap().position, 2);
        assert_eq!(labels.get(0, project, day()).unwrap().position, 3);
    }

    #[test]
    fn test_buckets_split_by_entity_and_day() {
        let tomorrow = day().succ_opt().unwrap().and_hms_opt(9, 0, 0).unwrap();
        let entries = vec![
            entry("WO-1", 1, at(9, 0)),
            entry("WO-2", 2, at(9, 0)),
            entry("WO-3", 1, tomorrow),
        ];
        let labels = assign_sequence(&entries, GroupBy::Project);
        assert_eq!(labels.bucket_size(EntityKey::Project(1), day()), 1);
        assert_eq!(labels.bucket_size(EntityKey::Project(2), day()), 1);
        assert_eq!(labels.bucket_size(EntityKey::Project(1), tomorrow.date()), 1);
    }

    #[test]
    fn test_entry_in_two_teams_counted_in_both() {
        let shared = Entry::builder()
            .title("Shared")
            .team(1)
            .team(2)
            .start(at(9, 0))
            .end(at(10, 0))
            .build();
        let solo = Entry::builder()
            .title("Solo")
            .team(2)
            .start(at(8, 0))
            .end(at(9, 0))
            .build();
        let labels = assign_sequence(&[shared, solo], GroupBy::Team);

        assert_eq!(labels.get(0, EntityKey::Team(1), day()).unwrap().to_string(), "1 of 1");
        assert_eq!(labels.get(0, EntityKey::Team(2), day()).unwrap().to_string(), "2 of 2");
    }

    #[test]
    fn test_missing_start_excluded() {
        let mut unscheduled = entry("WO-9", 1, at(9, 0));
        unscheduled.start = None;
        let entries = vec![unscheduled, entry("WO-1", 1, at(11, 0))];
        let labels = assign_sequence(&entries, GroupBy::Project);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get(1, EntityKey::Project(1), day()).unwrap().to_string(), "1 of 1");
    }

    #[test]
    fn test_annotate_sets_primary_label() {
        let mut entries = vec![entry("WO-2", 1, at(10, 0)), entry("WO-1", 1, at(9, 0))];
        let labels = assign_sequence(&entries, GroupBy::Project);
        labels.annotate(&mut entries, GroupBy::Project);
        assert_eq!(entries[0].sequence_label, Some(SequenceLabel { position: 2, total: 2 }));
        assert_eq!(entries[1].sequence_label, Some(SequenceLabel { position: 1, total: 2 }));
    }
}
