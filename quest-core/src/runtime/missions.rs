use serde::Serialize;
use crate::scene::MissionDef;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionEntry {
    pub key: String,
    pub label: String,
    pub passed: bool,
}

/// Ordered pass/fail map. Every declared key is present from the start and begins failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissionBoard {
    entries: Vec<MissionEntry>,
}

impl MissionBoard {
    pub fn new(defs: &[MissionDef]) -> Self {
        Self {
            entries: defs.iter()
                .map(|d| MissionEntry { key: d.key.clone(), label: d.label.clone(), passed: false })
                .collect(),
        }
    }

    /// Returns `false` for an undeclared key.
    pub fn set(&mut self, key: &str, passed: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(e) => {
                e.passed = passed;
                true
            }
            None => false,
        }
    }

    pub fn passed(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key && e.passed)
    }

    pub fn all_passed<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> bool {
        keys.into_iter().all(|k| self.passed(k))
    }

    pub fn entries(&self) -> &[MissionEntry] {
        &self.entries
    }

    pub fn correct(&self) -> usize {
        self.entries.iter().filter(|e| e.passed).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// `round(100 * correct / total)`, halves rounding up.
    pub fn percent(&self) -> u32 {
        let total = self.total() as u32;
        if total == 0 {
            return 0;
        }
        let correct = self.correct() as u32;
        (200 * correct + total) / (2 * total)
    }

    pub fn summary(&self, pass_verdict: &str, retry_verdict: &str) -> ResultsSummary {
        let complete = self.total() > 0 && self.correct() == self.total();
        ResultsSummary {
            percent: self.percent(),
            correct: self.correct(),
            total: self.total(),
            entries: self.entries.clone(),
            verdict: if complete { pass_verdict } else { retry_verdict }.to_string(),
        }
    }
}

/// What the results screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub percent: u32,
    pub correct: usize,
    pub total: usize,
    pub entries: Vec<MissionEntry>,
    pub verdict: String,
}
