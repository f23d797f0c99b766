//! Filesystem scanner that turns the maps directory into catalog entries.
//!
//! Two layouts are recognised:
//! - `maps/<name>/notes.txt` with an optional `audio` / `audio.<ext>` file
//! - a loose `maps/<name>.txt` with an optional `<name>.<ext>` track next to it

use std::fs;
use std::path::{Path, PathBuf};

pub const NOTES_FILE: &str = "notes.txt";
const AUDIO_STEM: &str = "audio";
const AUDIO_EXTENSIONS: [&str; 4] = ["ogg", "mp3", "wav", "flac"];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot list maps directory {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub notes_path: PathBuf,
    pub audio_path: Option<PathBuf>,
}

/// Lists every playable map under `root`, sorted by name.
pub fn scan_maps_directory(root: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let unreadable = |source| CatalogError::Unreadable {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(root).map_err(unreadable)? {
        let path = match dir_entry {
            Ok(e) => e.path(),
            Err(e) => {
                log::warn!("CATALOG: Skipping unreadable entry in {:?}: {}", root, e);
                continue;
            }
        };

        let entry = if path.is_dir() {
            map_folder_entry(&path)
        } else {
            flat_file_entry(&path)
        };
        entries.extend(entry);
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}

fn map_folder_entry(folder: &Path) -> Option<CatalogEntry> {
    let notes_path = folder.join(NOTES_FILE);
    if !notes_path.is_file() {
        log::debug!("CATALOG: {:?} has no {}", folder, NOTES_FILE);
        return None;
    }

    let bare = folder.join(AUDIO_STEM);
    let audio_path = if bare.is_file() {
        Some(bare)
    } else {
        find_audio(folder, AUDIO_STEM)
    };

    Some(CatalogEntry {
        name: file_name(folder)?,
        notes_path,
        audio_path,
    })
}

fn flat_file_entry(path: &Path) -> Option<CatalogEntry> {
    if path.extension().and_then(|s| s.to_str()) != Some("txt") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?.to_string();
    let audio_path = path.parent().and_then(|dir| find_audio(dir, &stem));

    Some(CatalogEntry {
        name: stem,
        notes_path: path.to_path_buf(),
        audio_path,
    })
}

fn find_audio(dir: &Path, stem: &str) -> Option<PathBuf> {
    AUDIO_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}
