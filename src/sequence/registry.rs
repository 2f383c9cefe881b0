use std::collections::BTreeMap;

use crate::render::GroupLayers;
use crate::settings::Appearance;
use crate::surface::LayerId;

/// Per-run map from group id to the layers its renderer mounted.
///
/// One registry exists per run; restarting swaps in a fresh one, so a cancelled run can only
/// ever touch its own bookkeeping.
#[derive(Debug, Default)]
pub struct RunRegistry {
    appearance: Appearance,
    groups: BTreeMap<String, GroupLayers>,
}

impl RunRegistry {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            appearance,
            groups: BTreeMap::new(),
        }
    }

    /// Appearance used for groups mounted from now on.
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }

    /// Record `layers` for `group`, replacing (and returning) any previous entry.
    pub fn register(&mut self, group: &str, layers: GroupLayers) -> Option<GroupLayers> {
        self.groups.insert(group.to_owned(), layers)
    }

    pub fn get(&self, group: &str) -> Option<GroupLayers> {
        self.groups.get(group).copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Animated lines of every registered group. Guides are not included.
    pub fn lines(&self) -> Vec<LayerId> {
        self.groups.values().filter_map(|g| g.line).collect()
    }
}
