//! Procedural map generation: evenly spaced notes in random lanes with the
//! occasional off-beat note.

use super::constants::NUM_COLUMNS;
use super::note::Note;
use rand::Rng;

/// Chance of an extra note half a beat after a regular one.
const SYNCOPATION_CHANCE: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapGenerator {
    /// Spacing between regular notes (ms).
    pub delay_ms: i64,
    /// Timestamp of the first note (ms).
    pub start_ms: i64,
    /// No note is placed at or after this time (ms).
    pub end_ms: i64,
    pub syncopation: bool,
}

impl MapGenerator {
    pub fn new(delay_ms: i64, start_ms: i64, end_ms: i64) -> Self {
        Self {
            delay_ms,
            start_ms,
            end_ms,
            syncopation: true,
        }
    }

    /// The built-in quick play map: 100 notes, 180 ms apart, starting at 3 s.
    pub fn quick_play() -> Self {
        let delay_ms = 180;
        let start_ms = 3000;
        Self {
            delay_ms,
            start_ms,
            end_ms: start_ms + 100 * delay_ms,
            syncopation: false,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Note> {
        let mut notes = Vec::new();
        if self.delay_ms <= 0 || self.start_ms < 0 {
            log::warn!(
                "GENERATOR: Invalid parameters (delay {} ms, start {} ms)",
                self.delay_ms,
                self.start_ms
            );
            return notes;
        }

        let mut time = self.start_ms;
        while time < self.end_ms {
            notes.push(Note::new(rng.random_range(0..NUM_COLUMNS), time));

            if self.syncopation {
                let offbeat = time.checked_add(self.delay_ms / 2);
                if let Some(offbeat) = offbeat.filter(|&t| t > time && t < self.end_ms) {
                    if rng.random_bool(SYNCOPATION_CHANCE) {
                        notes.push(Note::new(rng.random_range(0..NUM_COLUMNS), offbeat));
                    }
                }
            }

            match time.checked_add(self.delay_ms) {
                Some(next) => time = next,
                None => break,
            }
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::chart::{format_notes, parse_notes};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::Path;

    #[test]
    fn quick_play_has_one_hundred_notes() {
        let notes = MapGenerator::quick_play().generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(notes.len(), 100);
        assert_eq!(notes[0].timestamp_ms, 3000);
        assert_eq!(notes[99].timestamp_ms, 3000 + 99 * 180);
        assert!(notes.iter().all(|n| n.lane < NUM_COLUMNS));
    }

    #[test]
    fn notes_are_chronological_and_bounded() {
        let generator = MapGenerator::new(200, 1000, 9000);
        let notes = generator.generate(&mut StdRng::seed_from_u64(7));
        assert!(notes.is_sorted_by_key(|n| n.timestamp_ms));
        assert!(notes.iter().all(|n| (1000..9000).contains(&n.timestamp_ms)));

        let regular = notes.iter().filter(|n| (n.timestamp_ms - 1000) % 200 == 0).count();
        assert_eq!(regular, 40);
        // Extra notes only ever land half a delay after a regular one.
        assert!(
            notes
                .iter()
                .all(|n| (n.timestamp_ms - 1000) % 100 == 0)
        );
    }

    #[test]
    fn syncopation_appears_at_roughly_one_third() {
        let generator = MapGenerator::new(100, 0, 300_000);
        let notes = generator.generate(&mut StdRng::seed_from_u64(42));
        let extra = notes.len() - 3000;
        assert!((700..1300).contains(&extra), "extra notes: {extra}");
    }

    #[test]
    fn invalid_delay_yields_nothing() {
        let notes = MapGenerator::new(0, 0, 1000).generate(&mut StdRng::seed_from_u64(0));
        assert!(notes.is_empty());
    }

    #[test]
    fn stops_at_the_top_of_the_timestamp_range() {
        let mut generator = MapGenerator::new(1000, i64::MAX - 2500, i64::MAX);
        let notes = generator.generate(&mut StdRng::seed_from_u64(5));
        let regular: Vec<_> = notes
            .iter()
            .map(|n| n.timestamp_ms)
            .filter(|t| (i64::MAX - 2500 - t) % 1000 == 0)
            .collect();
        assert_eq!(regular, vec![i64::MAX - 2500, i64::MAX - 1500, i64::MAX - 500]);

        generator.delay_ms = i64::MAX;
        generator.start_ms = 1;
        let notes = generator.generate(&mut StdRng::seed_from_u64(5));
        assert_eq!(notes[0].timestamp_ms, 1);
        assert!(notes.len() <= 2);
    }

    #[test]
    fn generated_map_round_trips_through_loader() {
        let notes = MapGenerator::new(150, 2000, 20_000).generate(&mut StdRng::seed_from_u64(3));
        let parsed = parse_notes(&format_notes(&notes), Path::new("generated.txt")).unwrap();
        assert_eq!(parsed, notes);
    }
}
