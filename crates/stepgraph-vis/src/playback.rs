//! Cursor controls over one event log.

use serde::{Deserialize, Serialize};
use stepgraph_algo::{EventLog, StepEvent};

use crate::replay::{derive, VisualState};

/// Where the cursor stands relative to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing shown yet (cursor -1).
    Idle,
    /// Somewhere before the last event.
    Stepping,
    /// On the last event.
    Finished,
}

/// Cursor over an immutable event log.
///
/// Moving the cursor never touches the log, and every move is O(1).
#[derive(Debug, Clone)]
pub struct Playback {
    log: EventLog,
    cursor: Option<usize>,
}

impl Playback {
    /// Start on the first event, or idle if the log is empty.
    pub fn new(log: EventLog) -> Self {
        let cursor = if log.is_empty() { None } else { Some(0) };
        Self { log, cursor }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Index of the event under the cursor; `None` when idle.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// The cursor as a signed position, `-1` when idle.
    pub fn position(&self) -> i64 {
        self.cursor.map_or(-1, |index| index as i64)
    }

    pub fn total_steps(&self) -> usize {
        self.log.len()
    }

    pub fn state(&self) -> PlaybackState {
        match self.cursor {
            None => PlaybackState::Idle,
            Some(index) if Some(index) == self.log.last_index() => PlaybackState::Finished,
            Some(_) => PlaybackState::Stepping,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == PlaybackState::Finished
    }

    /// Step back one event. Stepping back from the first event goes idle.
    pub fn prev(&mut self) -> Option<&StepEvent> {
        self.cursor = self.cursor.and_then(|index| index.checked_sub(1));
        self.current_event()
    }

    /// Step forward one event, stopping on the last.
    pub fn next(&mut self) -> Option<&StepEvent> {
        if let Some(last) = self.log.last_index() {
            self.cursor = Some(self.cursor.map_or(0, |index| (index + 1).min(last)));
        }
        self.current_event()
    }

    /// Move to the last event.
    pub fn jump_to_end(&mut self) -> Option<&StepEvent> {
        self.cursor = self.log.last_index();
        self.current_event()
    }

    /// Move to `index`, clamped to the last event.
    pub fn seek(&mut self, index: usize) -> Option<&StepEvent> {
        self.cursor = self.log.last_index().map(|last| index.min(last));
        self.current_event()
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// The event under the cursor.
    pub fn current_event(&self) -> Option<&StepEvent> {
        self.cursor.and_then(|index| self.log.get(index))
    }

    /// Fraction of the log shown so far (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.cursor {
            Some(index) => (index + 1) as f64 / self.log.len() as f64,
            None => 0.0,
        }
    }

    /// Highlight state at the cursor.
    pub fn visual_state(&self) -> VisualState {
        derive(&self.log, self.cursor)
    }
}

/// Playback status for sending to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// `-1` when idle.
    pub current_index: i64,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub progress: f64,
}

impl PlaybackStatus {
    /// Status when no run is loaded.
    pub fn idle() -> Self {
        Self {
            current_index: -1,
            total_steps: 0,
            state: PlaybackState::Idle,
            progress: 0.0,
        }
    }
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            current_index: playback.position(),
            total_steps: playback.total_steps(),
            state: playback.state(),
            progress: playback.progress(),
        }
    }
}
