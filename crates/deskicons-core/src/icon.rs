use std::collections::HashMap;

use crate::{IconError, IconResult, Point};

/// One desktop icon as seen during a single enumeration.
///
/// `index` is only meaningful until the shell next changes its item
/// list; `name` is the stable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIconEntry {
    pub name: String,
    pub index: usize,
    pub position: Point,
}

/// Icons from one enumeration pass, kept in index order with lookup by name.
#[derive(Debug, Clone, Default)]
pub struct IconSnapshot {
    entries: Vec<DesktopIconEntry>,
    by_name: HashMap<String, usize>,
}

impl IconSnapshot {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
        }
    }

    /// Adds an entry. A name already present is a conflict, not an update.
    pub fn insert(&mut self, entry: DesktopIconEntry) -> IconResult<()> {
        if let Some(&slot) = self.by_name.get(&entry.name) {
            return Err(IconError::DuplicateNameConflict {
                name: entry.name,
                first: self.entries[slot].index,
                second: entry.index,
            });
        }
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DesktopIconEntry> {
        self.by_name.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were enumerated.
    pub fn iter(&self) -> impl Iterator<Item = &DesktopIconEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for IconSnapshot {
    type Item = DesktopIconEntry;
    type IntoIter = std::vec::IntoIter<DesktopIconEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconSnapshot {
    type Item = &'a DesktopIconEntry;
    type IntoIter = std::slice::Iter<'a, DesktopIconEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
