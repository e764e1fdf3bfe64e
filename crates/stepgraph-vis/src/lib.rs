//! Stepgraph Visualization
//!
//! Step-by-step replay of graph algorithm runs with cursor controls.
//!
//! # Architecture
//!
//! - **Replay**: folds a log prefix into the highlight state at a cursor
//! - **Playback**: prev / next / jump-to-end over one immutable log
//! - **Session**: one graph plus the loaded run and its cursor, owned by the caller
//! - **Adapter**: editor graph descriptions in, renderer frames out
//! - **Server**: REST + WebSocket control surface
//!
//! # Usage
//!
//! ```ignore
//! let mut session = Session::new(samples::WEIGHTED.graph());
//! session.start_run(&RunRequest::new(AlgorithmKind::Prim))?;
//!
//! let server = VisServer::new(session);
//! server.serve(config.addr()).await?;
//! ```

mod adapter;
mod config;
mod error;
mod playback;
mod replay;
mod server;
mod session;

pub use adapter::{EdgeSpec, GraphSpec, RenderEdge, RenderFrame, RenderNode};
pub use config::VisConfig;
pub use error::{Error, Result};
pub use playback::{Playback, PlaybackState, PlaybackStatus};
pub use replay::{derive, VisualState, IDLE_MESSAGE};
pub use server::VisServer;
pub use session::Session;
