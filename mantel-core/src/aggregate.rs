//! Accumulated instance map across feeds and refreshes.

use std::collections::HashMap;

use crate::instance::EventInstance;

/// All instances produced so far, keyed by identity hash, unioned across
/// every feed and refresh.
///
/// A feed's refresh overwrites only the ids it produced this round. Ids
/// from events that disappeared upstream are left in place, so a transient
/// parse hiccup never blanks entries that were visible a refresh ago; the
/// staleness this can leave behind is accepted.
#[derive(Debug, Default, Clone)]
pub struct InstanceMap {
    entries: HashMap<String, EventInstance>,
}

impl InstanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one feed's freshly computed batch: a last-write-wins union.
    pub fn merge(&mut self, batch: HashMap<String, EventInstance>) {
        self.entries.extend(batch);
    }

    pub fn get(&self, id: &str) -> Option<&EventInstance> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instances ordered by date, then id, for stable rendering.
    pub fn sorted(&self) -> Vec<&EventInstance> {
        let mut all: Vec<&EventInstance> = self.entries.values().collect();
        all.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::SourceKind;
    use chrono::{TimeZone, Utc};

    fn instance(id: &str, title: &str) -> EventInstance {
        EventInstance {
            id: id.to_string(),
            title: title.to_string(),
            date: Utc.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap(),
            color: "zinc".to_string(),
            is_completed: false,
            additional: None,
            source_type: "ical".to_string(),
            kind: SourceKind::Single,
        }
    }

    fn batch(instances: Vec<EventInstance>) -> HashMap<String, EventInstance> {
        instances.into_iter().map(|i| (i.id.clone(), i)).collect()
    }

    #[test]
    fn merge_overwrites_matching_ids() {
        let mut map = InstanceMap::new();
        map.merge(batch(vec![instance("a", "old title")]));
        map.merge(batch(vec![instance("a", "new title")]));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").unwrap().title, "new title");
    }

    #[test]
    fn stale_ids_survive_a_merge_that_drops_them() {
        let mut map = InstanceMap::new();
        map.merge(batch(vec![instance("a", "kept"), instance("b", "dropped upstream")]));
        map.merge(batch(vec![instance("a", "kept")]));

        // "b" no longer appears upstream but is not pruned
        assert_eq!(map.len(), 2);
        assert!(map.get("b").is_some());
    }

    #[test]
    fn merges_from_different_feeds_are_disjoint() {
        let mut map = InstanceMap::new();
        map.merge(batch(vec![instance("home-1", "Dentist")]));
        map.merge(batch(vec![instance("work-1", "Planning")]));

        assert_eq!(map.len(), 2);
        assert!(map.get("home-1").is_some());
        assert!(map.get("work-1").is_some());
    }

    #[test]
    fn sorted_orders_by_date_then_id() {
        let mut early = instance("b", "early");
        early.date = Utc.with_ymd_and_hms(2026, 8, 9, 9, 0, 0).unwrap();

        let mut map = InstanceMap::new();
        map.merge(batch(vec![instance("c", "later"), instance("a", "same day"), early]));

        let ids: Vec<&str> = map.sorted().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
