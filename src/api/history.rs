use serde::{Deserialize, Serialize};

use crate::render::Color;

/// The `(index_x, index_y, color)` triple that identifies one curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub index_x: i32,
    pub index_y: i32,
    pub color: Color,
}

impl SelectionState {
    #[must_use]
    pub fn new(index_x: i32, index_y: i32, color: Color) -> Self {
        Self {
            index_x,
            index_y,
            color,
        }
    }
}

/// Recorded selection replayed under the live curve.
///
/// Fields are private: an entry never changes after it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    selection: SelectionState,
}

impl HistoryEntry {
    #[must_use]
    pub fn index_x(&self) -> i32 {
        self.selection.index_x
    }

    #[must_use]
    pub fn index_y(&self) -> i32 {
        self.selection.index_y
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.selection.color
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }
}

/// Display row for history pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLabel {
    pub index: usize,
    pub x_name: String,
    pub y_name: String,
    pub color: Color,
}

/// Append-only list of history entries; insertion order is draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    /// Snapshots `selection` and returns the new entry's position.
    pub fn record(&mut self, selection: SelectionState) -> usize {
        self.entries.push(HistoryEntry { selection });
        self.entries.len() - 1
    }

    /// Removes the entry at `index`; out-of-bounds indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
