//! High score leaderboard system
//!
//! Persisted through the storage capability, tracks top 10 scores.
//! Stored as a plain JSON array of numbers, best first.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    /// Sorted descending
    scores: Vec<u64>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "skyhop_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.scores.last().map(|&s| score > s).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    /// Lenient decode: anything that is not a finite non-negative number is
    /// dropped, the rest is re-sorted and truncated. Never fails.
    pub fn from_json(json: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
            return Self::new();
        };
        let Some(items) = value.as_array() else {
            return Self::new();
        };
        let mut scores: Vec<u64> = items
            .iter()
            .filter_map(|v| v.as_f64())
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s.floor() as u64)
            .collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Load high scores; storage failures and bad data give an empty board
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.scores.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save high scores
    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        crate::persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.scores.len());
        Ok(())
    }
}
