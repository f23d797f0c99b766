//! Judgement types and the per-play judgement history.
//!
//! Every note that leaves the `Pending` state appends exactly one entry to the
//! record; accuracy and hit/miss counts are derived from it.

/// Outcome of a retired note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Hit,
    Miss,
}

/// RGBA colors used by the HUD counters.
#[derive(Clone)]
pub struct JudgementColors {
    pub hit: [f32; 4],
    pub miss: [f32; 4],
}

impl JudgementColors {
    pub fn new() -> Self {
        Self {
            hit: [0.0, 1.0, 0.0, 1.0],  // Green
            miss: [1.0, 0.0, 0.0, 1.0], // Red
        }
    }

    pub fn color(&self, judgement: Judgement) -> [f32; 4] {
        match judgement {
            Judgement::Hit => self.hit,
            Judgement::Miss => self.miss,
        }
    }
}

impl Default for JudgementColors {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only judgement history for one play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JudgementRecord {
    entries: Vec<Judgement>,
}

impl JudgementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, judgement: Judgement) {
        self.entries.push(judgement);
    }

    pub fn entries(&self) -> &[Judgement] {
        &self.entries
    }

    pub fn last(&self) -> Option<Judgement> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.count(Judgement::Hit)
    }

    pub fn misses(&self) -> usize {
        self.count(Judgement::Miss)
    }

    fn count(&self, judgement: Judgement) -> usize {
        self.entries.iter().filter(|&&j| j == judgement).count()
    }

    /// Percentage of judged notes that were not missed (0-100).
    ///
    /// An empty record counts as 100%.
    pub fn accuracy(&self) -> f64 {
        let total = self.len();
        if total == 0 {
            return 100.0;
        }
        let good = total - self.misses();
        (good as f64 / total as f64).clamp(0.0, 1.0) * 100.0
    }
}
