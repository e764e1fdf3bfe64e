//! Caller-owned session: one graph, at most one loaded run and its cursor.

use stepgraph_algo::{run, Run, RunRequest, RunSummary};
use stepgraph_graph::Graph;

use crate::adapter::RenderFrame;
use crate::error::Result;
use crate::playback::{Playback, PlaybackStatus};
use crate::replay::VisualState;

/// A completed run paired with the cursor scrubbing through it.
#[derive(Debug, Clone)]
struct LoadedRun {
    run: Run,
    playback: Playback,
}

/// State of one user session.
///
/// The run and its cursor are replaced together, so a fresh cursor is never
/// paired with a stale log or the other way round.
#[derive(Debug, Clone, Default)]
pub struct Session {
    graph: Graph,
    loaded: Option<LoadedRun>,
}

impl Session {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            loaded: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Swap the graph. Any loaded run belonged to the old graph and is dropped.
    pub fn replace_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.loaded = None;
    }

    /// Run `request` on the current graph and load the result at cursor 0.
    ///
    /// On a rejected request the previously loaded run and cursor are left
    /// exactly as they were.
    pub fn start_run(&mut self, request: &RunRequest) -> Result<&Run> {
        let run = run(&self.graph, request)?;
        let playback = Playback::new(run.log.clone());
        tracing::info!(
            algorithm = %run.algorithm,
            steps = playback.total_steps(),
            "run loaded"
        );

        let loaded = self.loaded.insert(LoadedRun { run, playback });
        Ok(&loaded.run)
    }

    pub fn run(&self) -> Option<&Run> {
        self.loaded.as_ref().map(|loaded| &loaded.run)
    }

    /// Summary of the loaded run, independent of the cursor.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.run().map(|run| &run.summary)
    }

    pub fn prev(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.playback.prev();
        }
    }

    pub fn next(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.playback.next();
        }
    }

    pub fn jump_to_end(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.playback.jump_to_end();
        }
    }

    pub fn seek(&mut self, index: usize) {
        if let Some(loaded) = &mut self.loaded {
            loaded.playback.seek(index);
        }
    }

    pub fn reset(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.playback.reset();
        }
    }

    /// Cursor index; `None` when idle or nothing is loaded.
    pub fn current_index(&self) -> Option<usize> {
        self.loaded
            .as_ref()
            .and_then(|loaded| loaded.playback.current_index())
    }

    /// Length of the loaded log, 0 when nothing is loaded.
    pub fn total_steps(&self) -> usize {
        self.loaded
            .as_ref()
            .map_or(0, |loaded| loaded.playback.total_steps())
    }

    pub fn status(&self) -> PlaybackStatus {
        self.loaded
            .as_ref()
            .map_or_else(PlaybackStatus::idle, |loaded| (&loaded.playback).into())
    }

    /// Highlight state at the current cursor.
    pub fn visual_state(&self) -> VisualState {
        self.loaded
            .as_ref()
            .map_or_else(VisualState::idle, |loaded| loaded.playback.visual_state())
    }

    /// Renderer view of the graph at the current cursor.
    pub fn frame(&self) -> RenderFrame {
        let frame = RenderFrame::new(&self.graph, &self.visual_state(), self.status());
        match self.run() {
            Some(run) => frame.with_run(run),
            None => frame,
        }
    }
}
