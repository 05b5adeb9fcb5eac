//! First-seen-wins map of state names to codes

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::StateCode;

/// State name to state code, keeping the first code seen for each name.
///
/// Names are case-sensitive. Iteration and serialization follow insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueStateMap {
    entries: Vec<(String, StateCode)>,
    index: HashMap<String, usize>,
}

impl UniqueStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair unless the name is already present.
    ///
    /// Returns `true` when the pair was recorded.
    pub fn insert_first(&mut self, name: String, code: StateCode) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, code));
        true
    }

    pub fn get(&self, name: &str) -> Option<&StateCode> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UniqueStateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, code) in &self.entries {
            map.serialize_entry(name, code)?;
        }
        map.end()
    }
}

impl FromIterator<(String, StateCode)> for UniqueStateMap {
    fn from_iter<I: IntoIterator<Item = (String, StateCode)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, code) in iter {
            map.insert_first(name, code);
        }
        map
    }
}
