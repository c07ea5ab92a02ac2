//! Saved icon layouts.
//!
//! A layout file is a JSON object keyed by icon name:
//!
//! ```json
//! { "Recycle Bin": { "index": 0, "x": 10, "y": 10 } }
//! ```
//!
//! `index` is written for reference but ignored on restore, where each
//! name is resolved against a fresh snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::icon::IconSnapshot;
use crate::listview::{ListViewController, MessageTarget};
use crate::memory::ProcessMemory;
use crate::{IconError, IconResult, Point, log_info};

/// Saved state of one icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedIcon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub x: i32,
    pub y: i32,
}

impl SavedIcon {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Icon name to saved position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    icons: BTreeMap<String, SavedIcon>,
}

/// Outcome of restoring a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Icons that were sent to their saved position.
    pub moved: Vec<String>,
    /// Saved names with no icon on the current desktop.
    pub skipped: Vec<String>,
}

impl Layout {
    pub fn from_snapshot(snapshot: &IconSnapshot) -> Self {
        let icons = snapshot
            .iter()
            .map(|entry| {
                let saved = SavedIcon {
                    index: Some(entry.index),
                    x: entry.position.x,
                    y: entry.position.y,
                };
                (entry.name.clone(), saved)
            })
            .collect();
        Self { icons }
    }

    /// Enumerates the desktop and records every icon.
    pub fn capture<W: MessageTarget, P: ProcessMemory>(
        controller: &mut ListViewController<W, P>,
    ) -> IconResult<Self> {
        Ok(Self::from_snapshot(&controller.icons()?))
    }

    pub fn insert(&mut self, name: impl Into<String>, icon: SavedIcon) {
        self.icons.insert(name.into(), icon);
    }

    pub fn get(&self, name: &str) -> Option<&SavedIcon> {
        self.icons.get(name)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn to_json(&self) -> IconResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> IconResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the layout to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> IconResult<()> {
        let io_err = |source| IconError::LayoutIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)
    }

    pub fn load(path: &Path) -> IconResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IconError::LayoutIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Moves every saved icon still on the desktop back to its position.
    ///
    /// Names are resolved against a fresh snapshot so the current index
    /// is used. Names missing from the desktop are skipped.
    pub fn apply<W: MessageTarget, P: ProcessMemory>(
        &self,
        controller: &mut ListViewController<W, P>,
    ) -> IconResult<ApplyReport> {
        let current = controller.icons()?;
        let mut report = ApplyReport::default();

        for (name, saved) in &self.icons {
            match current.get(name) {
                Some(entry) => {
                    controller.set_item_position(entry.index, saved.position())?;
                    report.moved.push(name.clone());
                }
                None => report.skipped.push(name.clone()),
            }
        }

        log_info!(
            "layout applied: {} moved, {} skipped",
            report.moved.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
