//! Session orchestration
//!
//! One `Game` is one run: keys in, one simulation step, cues out. When the
//! run ends the score goes on the leaderboard and the board is saved.

use crate::audio::{SoundEffect, SoundSink};
use crate::highscores::HighScores;
use crate::persistence::Storage;
use crate::platform::KeyState;
use crate::renderer::{Draw, render};
use crate::sim::{GameEvent, GameState, Viewport, tick};
use crate::tuning::Tuning;

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    /// Run is over; `rank` is the leaderboard position if the score made it
    Ended { score: u64, rank: Option<usize> },
}

pub struct Game<S: Storage, A: SoundSink> {
    state: GameState,
    high_scores: HighScores,
    storage: S,
    audio: A,
    outcome: FrameOutcome,
}

impl<S: Storage, A: SoundSink> Game<S, A> {
    pub fn new(
        seed: u64,
        viewport: Viewport,
        tuning: Tuning,
        now_ms: f64,
        storage: S,
        audio: A,
    ) -> Self {
        Self::with_state(GameState::new(seed, viewport, tuning, now_ms), storage, audio)
    }

    /// Resume from an existing simulation state (replays, scripted scenes)
    pub fn with_state(state: GameState, storage: S, audio: A) -> Self {
        let high_scores = HighScores::load(&storage);
        let outcome = if state.is_over() {
            FrameOutcome::Ended {
                score: state.score.total(),
                rank: None,
            }
        } else {
            FrameOutcome::Running
        };
        Self {
            state,
            high_scores,
            storage,
            audio,
            outcome,
        }
    }

    /// Advance one frame. Once the run has ended this only repeats the outcome.
    pub fn frame(&mut self, keys: KeyState, now_ms: f64) -> FrameOutcome {
        if self.state.is_over() {
            return self.outcome;
        }

        tick(&mut self.state, &keys.to_tick_input(now_ms));

        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            if let GameEvent::GameOver { score, .. } = event {
                self.outcome = FrameOutcome::Ended {
                    score,
                    rank: self.record_score(score),
                };
            }
        }

        self.outcome
    }

    fn record_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.high_scores.add_score(score);
        if let Some(rank) = rank {
            log::info!("New high score {score} at rank {rank}");
        }
        if let Err(e) = self.high_scores.save(&mut self.storage) {
            log::warn!("Failed to save high scores: {e}");
        }
        rank
    }

    pub fn render<D: Draw + ?Sized>(&self, draw: &mut D) {
        render(&self.state, draw);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn score(&self) -> u64 {
        self.state.score.total()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn outcome(&self) -> FrameOutcome {
        self.outcome
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Hand back the storage, e.g. to start the next run with the same board
    pub fn into_storage(self) -> S {
        self.storage
    }
}
