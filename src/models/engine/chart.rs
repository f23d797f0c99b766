//! Map loading and serialization for the plain-text note format.
//!
//! A map file is a whitespace separated list of `<lane> <timestamp_ms>`
//! integer pairs, usually one pair per line, terminated by end of input.

use super::constants::{MAX_TIMESTAMP_MS, NUM_COLUMNS};
use super::note::Note;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("cannot read {path:?}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed map {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl MapError {
    fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        MapError::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Notes of one map plus its optional music track.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub notes: Vec<Note>,
    pub audio_path: Option<PathBuf>,
}

impl MapData {
    pub fn new(notes: Vec<Note>, audio_path: Option<PathBuf>) -> Self {
        Self { notes, audio_path }
    }

    #[cfg(test)]
    fn last_timestamp_ms(&self) -> Option<i64> {
        self.notes.last().map(|n| n.timestamp_ms)
    }
}

/// Reads a map file from disk.
pub fn load_map(notes_path: &Path, audio_path: Option<PathBuf>) -> Result<MapData, MapError> {
    let content = fs::read_to_string(notes_path).map_err(|source| MapError::Unavailable {
        path: notes_path.to_path_buf(),
        source,
    })?;

    let notes = parse_notes(&content, notes_path)?;
    log::info!(
        "CHART: Loaded {} notes from {:?} (audio: {:?})",
        notes.len(),
        notes_path,
        audio_path
    );
    Ok(MapData::new(notes, audio_path))
}

/// Parses the pair format. `origin` is only used for error reporting.
///
/// Notes come back in chronological order; an out-of-order file is sorted
/// (stable, so equal timestamps keep file order) and logged.
pub fn parse_notes(content: &str, origin: &Path) -> Result<Vec<Note>, MapError> {
    let mut tokens = content.split_whitespace();
    let mut notes = Vec::new();

    while let Some(lane_token) = tokens.next() {
        let Some(time_token) = tokens.next() else {
            return Err(MapError::malformed(
                origin,
                format!("lane {lane_token:?} has no timestamp"),
            ));
        };

        let lane: usize = lane_token
            .parse()
            .map_err(|_| MapError::malformed(origin, format!("invalid lane {lane_token:?}")))?;
        if lane >= NUM_COLUMNS {
            return Err(MapError::malformed(
                origin,
                format!("lane {lane} out of range 0..{NUM_COLUMNS}"),
            ));
        }

        let timestamp_ms: i64 = time_token.parse().map_err(|_| {
            MapError::malformed(origin, format!("invalid timestamp {time_token:?}"))
        })?;
        if timestamp_ms < 0 {
            return Err(MapError::malformed(
                origin,
                format!("negative timestamp {timestamp_ms}"),
            ));
        }
        if timestamp_ms > MAX_TIMESTAMP_MS {
            return Err(MapError::malformed(
                origin,
                format!("timestamp {timestamp_ms} exceeds {MAX_TIMESTAMP_MS}"),
            ));
        }

        notes.push(Note::new(lane, timestamp_ms));
    }

    if notes.is_empty() {
        return Err(MapError::malformed(origin, "map contains no notes"));
    }

    if !notes.is_sorted_by_key(|n| n.timestamp_ms) {
        log::warn!("CHART: {:?} is not chronological, sorting notes", origin);
        notes.sort_by_key(|n| n.timestamp_ms);
    }

    Ok(notes)
}

/// Serializes notes into the pair format, one pair per line.
pub fn format_notes(notes: &[Note]) -> String {
    let mut out = String::with_capacity(notes.len() * 8);
    for note in notes {
        let _ = writeln!(out, "{} {}", note.lane, note.timestamp_ms);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn origin() -> &'static Path {
        Path::new("test.txt")
    }

    #[test]
    fn parses_pairs_in_file_order() {
        let notes = parse_notes("0 3000\n2 3180\n1 3360\n", origin()).unwrap();
        let pairs: Vec<_> = notes.iter().map(|n| (n.lane, n.timestamp_ms)).collect();
        assert_eq!(pairs, vec![(0, 3000), (2, 3180), (1, 3360)]);
        assert!(notes.iter().all(Note::is_pending));
    }

    #[test]
    fn accepts_any_whitespace() {
        let notes = parse_notes("  3\t100 1   200\r\n\n0 300", origin()).unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[1].lane, 1);
    }

    #[test]
    fn unsorted_input_is_sorted_stably() {
        let notes = parse_notes("0 500\n1 100\n2 500\n3 100", origin()).unwrap();
        let pairs: Vec<_> = notes.iter().map(|n| (n.lane, n.timestamp_ms)).collect();
        assert_eq!(pairs, vec![(1, 100), (3, 100), (0, 500), (2, 500)]);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "0", "a 100", "0 1.5", "4 100", "0 -10", "0 100 2"] {
            let err = parse_notes(bad, origin()).unwrap_err();
            assert!(matches!(err, MapError::Malformed { .. }), "{bad:?}");
        }
    }

    #[test]
    fn rejects_timestamps_past_the_end_grace_limit() {
        let limit = format!("0 {MAX_TIMESTAMP_MS}");
        assert_eq!(parse_notes(&limit, origin()).unwrap(), vec![Note::new(0, MAX_TIMESTAMP_MS)]);

        let over = format!("0 {}", MAX_TIMESTAMP_MS + 1);
        let err = parse_notes(&over, origin()).unwrap_err();
        assert!(matches!(err, MapError::Malformed { .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_map(&dir.path().join("nope.txt"), None).unwrap_err();
        assert!(matches!(err, MapError::Unavailable { .. }));
    }

    #[test]
    fn load_map_keeps_audio_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "0 1000\n3 1500").unwrap();

        let audio = dir.path().join("audio.ogg");
        let map = load_map(&path, Some(audio.clone())).unwrap();
        assert_eq!(map.notes.len(), 2);
        assert_eq!(map.last_timestamp_ms(), Some(1500));
        assert_eq!(map.audio_path, Some(audio));
    }

    #[test]
    fn formatted_notes_parse_back() {
        let notes = vec![Note::new(2, 1000), Note::new(0, 1090), Note::new(3, 1180)];
        let text = format_notes(&notes);
        assert_eq!(text, "2 1000\n0 1090\n3 1180\n");
        assert_eq!(parse_notes(&text, origin()).unwrap(), notes);
    }
}
