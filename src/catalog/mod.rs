//! Selectable map list backed by the maps directory.

pub mod scanner;

pub use scanner::{CatalogEntry, CatalogError, scan_maps_directory};

use crate::models::engine::{MapData, MapError, load_map};
use std::path::{Path, PathBuf};

/// Ordered list of maps plus the menu cursor.
pub struct MapCatalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
    selected: usize,
}

impl MapCatalog {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            entries: Vec::new(),
            selected: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-scans the maps directory and replaces the list.
    ///
    /// On failure the list is left empty and the error is returned for the
    /// caller to report. The selection is clamped to the new size.
    pub fn reload(&mut self) -> Result<usize, CatalogError> {
        match scan_maps_directory(&self.root) {
            Ok(entries) => {
                log::info!("CATALOG: {} maps found in {:?}", entries.len(), self.root);
                self.entries = entries;
                self.selected = self.selected.min(self.entries.len().saturating_sub(1));
                Ok(self.entries.len())
            }
            Err(e) => {
                log::error!("CATALOG: {}", e);
                self.entries.clear();
                self.selected = 0;
                Err(e)
            }
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.entries.get(self.selected)
    }

    /// Moves the cursor down; a no-op on the last entry.
    pub fn next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Moves the cursor up; a no-op on the first entry.
    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Loads the map under the cursor.
    pub fn load_selected(&self) -> Option<Result<MapData, MapError>> {
        self.selected_entry()
            .map(|entry| load_map(&entry.notes_path, entry.audio_path.clone()))
    }
}
