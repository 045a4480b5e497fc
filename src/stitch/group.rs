//! Placement group registry
//!
//! Vias placed by a fill run are recorded under one named group so a later
//! clear run can find them. The registry is owned by the caller and passed
//! into the commit/clear steps.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::board::ItemId;

/// Named set of item ids, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementGroup {
    pub name: String,
    #[serde(default)]
    pub members: IndexSet<ItemId>,
}

impl PlacementGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: IndexSet::new(),
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }

    pub fn add(&mut self, id: ItemId) -> bool {
        self.members.insert(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        self.members.shift_remove(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: IndexMap<String, PlacementGroup>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted groups; later duplicates merge into the first
    pub fn from_groups(groups: Vec<PlacementGroup>) -> Self {
        let mut registry = Self::new();
        for group in groups {
            let entry = registry.get_or_create(&group.name);
            entry.members.extend(group.members);
        }
        registry
    }

    pub fn find(&self, name: &str) -> Option<&PlacementGroup> {
        self.groups.get(name)
    }

    /// Look up `name`, creating an empty group if absent
    pub fn get_or_create(&mut self, name: &str) -> &mut PlacementGroup {
        self.groups.entry(name.to_string()).or_insert_with(|| {
            log::debug!("[Group] Creating group '{}'", name);
            PlacementGroup::new(name)
        })
    }

    pub fn is_member(&self, name: &str, id: ItemId) -> bool {
        self.find(name).is_some_and(|g| g.contains(id))
    }

    /// Drop `ids` from group `name`. Ids that are not members are skipped,
    /// and a missing group is left missing. Returns how many were removed.
    pub fn remove_members(&mut self, name: &str, ids: &[ItemId]) -> usize {
        match self.groups.get_mut(name) {
            Some(group) => ids.iter().filter(|&&id| group.remove(id)).count(),
            None => 0,
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &PlacementGroup> {
        self.groups.values()
    }

    pub fn to_groups(&self) -> Vec<PlacementGroup> {
        self.groups.values().cloned().collect()
    }
}
