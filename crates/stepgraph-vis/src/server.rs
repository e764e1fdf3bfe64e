//! Axum web server with WebSocket control for step replay.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use stepgraph_algo::{AlgorithmKind, RunRequest, RunSummary};
use stepgraph_graph::samples;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::adapter::{GraphSpec, RenderFrame};
use crate::error::Error;
use crate::playback::PlaybackStatus;
use crate::session::Session;

/// Shared application state.
pub struct AppState {
    session: RwLock<Session>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around an existing session.
    pub fn new(session: Session) -> Self {
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/graph", get(graph_handler).put(replace_graph_handler))
            .route("/api/samples", get(samples_handler))
            .route("/api/samples/{name}", post(load_sample_handler))
            .route("/api/run", post(run_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/prev", post(prev_handler))
            .route("/api/playback/next", post(next_handler))
            .route("/api/playback/end", post(end_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/seek", post(seek_handler))
            // WebSocket for interactive stepping
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> crate::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Error body returned to the frontend.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::UnknownSample(_) => StatusCode::NOT_FOUND,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::warn!(error = %self.0, "request rejected");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Server status response.
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    node_count: usize,
    edge_count: usize,
    algorithm: Option<AlgorithmKind>,
    total_steps: usize,
}

impl StatusResponse {
    fn of(session: &Session) -> Self {
        Self {
            status: "ok",
            node_count: session.graph().node_count(),
            edge_count: session.graph().edge_count(),
            algorithm: session.run().map(|run| run.algorithm),
            total_steps: session.total_steps(),
        }
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse::of(&session))
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<GraphSpec> {
    let session = state.session.read().await;
    Json(GraphSpec::from(session.graph()))
}

async fn replace_graph_handler(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<GraphSpec>,
) -> Result<Json<StatusResponse>, ApiError> {
    let graph = spec.to_graph()?;
    let mut session = state.session.write().await;
    session.replace_graph(graph);
    Ok(Json(StatusResponse::of(&session)))
}

/// Entry in the sample listing.
#[derive(Debug, Serialize)]
struct SampleInfo {
    name: &'static str,
    title: &'static str,
}

async fn samples_handler() -> Json<Vec<SampleInfo>> {
    Json(
        samples::ALL
            .iter()
            .map(|sample| SampleInfo {
                name: sample.name,
                title: sample.title,
            })
            .collect(),
    )
}

async fn load_sample_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<GraphSpec>, ApiError> {
    let sample = samples::find(&name).ok_or(Error::UnknownSample(name))?;
    let mut session = state.session.write().await;
    session.replace_graph(sample.graph());
    Ok(Json(GraphSpec::from(session.graph())))
}

/// Response to a successful run request.
#[derive(Debug, Serialize)]
struct RunResponse {
    algorithm: AlgorithmKind,
    total_steps: usize,
    summary: RunSummary,
    report: Vec<String>,
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    let mut session = state.session.write().await;
    let run = session.start_run(&request)?;
    Ok(Json(RunResponse {
        algorithm: run.algorithm,
        total_steps: run.log.len(),
        summary: run.summary.clone(),
        report: run.report(),
    }))
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<RenderFrame> {
    let session = state.session.read().await;
    Json(session.frame())
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let session = state.session.read().await;
    Json(session.status())
}

async fn prev_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut session = state.session.write().await;
    session.prev();
    Json(session.status())
}

async fn next_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut session = state.session.write().await;
    session.next();
    Json(session.status())
}

async fn end_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut session = state.session.write().await;
    session.jump_to_end();
    Json(session.status())
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut session = state.session.write().await;
    session.reset();
    Json(session.status())
}

#[derive(Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackStatus> {
    let mut session = state.session.write().await;
    session.seek(req.index);
    Json(session.status())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the frame at the current cursor
    let frame = state.session.read().await.frame();
    if let Ok(json) = serde_json::to_string(&WsResponse::Frame(frame)) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(err) => WsResponse::Error {
                        message: err.to_string(),
                    },
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    let _ = socket.send(Message::Text(json.into())).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetFrame,
    GetStatus,
    Prev,
    Next,
    End,
    Reset,
    Seek { index: usize },
    Run(RunRequest),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Frame(RenderFrame),
    Status(PlaybackStatus),
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    if let WsCommand::GetStatus = cmd {
        return WsResponse::Status(state.session.read().await.status());
    }
    if let WsCommand::GetFrame = cmd {
        return WsResponse::Frame(state.session.read().await.frame());
    }

    let mut session = state.session.write().await;
    match cmd {
        WsCommand::Prev => session.prev(),
        WsCommand::Next => session.next(),
        WsCommand::End => session.jump_to_end(),
        WsCommand::Reset => session.reset(),
        WsCommand::Seek { index } => session.seek(index),
        WsCommand::Run(request) => {
            if let Err(err) = session.start_run(&request) {
                tracing::warn!(error = %err, "run rejected");
                return WsResponse::Error {
                    message: err.to_string(),
                };
            }
        }
        WsCommand::GetFrame | WsCommand::GetStatus => {}
    }
    WsResponse::Frame(session.frame())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn state_for(sample: &str) -> Arc<AppState> {
        let graph = samples::find(sample).map(|s| s.graph()).unwrap_or_default();
        VisServer::new(Session::new(graph)).state
    }

    #[test]
    fn router_builds() {
        let server = VisServer::new(Session::default());
        let _router = server.router();
    }

    #[test]
    fn run_then_step() {
        let state = state_for("hexagon");
        let request = RunRequest::new(AlgorithmKind::Bfs).with_start("a");

        let Json(response) = block_on(run_handler(State(state.clone()), Json(request)))
            .map_err(|err| err.0)
            .unwrap();
        assert_eq!(response.total_steps, 13);
        assert!(response.report[0].starts_with("BFS traversal order: a -> b -> f"));

        let Json(status) = block_on(next_handler(State(state.clone())));
        assert_eq!(status.current_index, 1);

        let Json(status) = block_on(end_handler(State(state.clone())));
        assert_eq!(status.current_index, 12);

        let Json(frame) = block_on(frame_handler(State(state)));
        assert!(frame.nodes.iter().all(|node| node.highlighted));
    }

    #[test]
    fn invalid_run_maps_to_422() {
        let state = state_for("hexagon");
        let request = RunRequest::new(AlgorithmKind::Dijkstra)
            .with_start("a")
            .with_target("a");

        let response = block_on(run_handler(State(state.clone()), Json(request))).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let Json(status) = block_on(playback_status_handler(State(state)));
        assert_eq!(status, PlaybackStatus::idle());
    }

    #[test]
    fn unknown_sample_maps_to_404() {
        let state = state_for("hexagon");
        let response =
            block_on(load_sample_handler(State(state), Path("nope".to_owned()))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn busy_port_is_an_io_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();

        let result = block_on(VisServer::new(Session::default()).serve(addr));
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(
            ApiError(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn replacing_graph_clears_run() {
        let state = state_for("hexagon");
        block_on(run_handler(
            State(state.clone()),
            Json(RunRequest::new(AlgorithmKind::Kruskal)),
        ))
        .map_err(|err| err.0)
        .unwrap();

        let spec: GraphSpec =
            serde_json::from_str(r#"{"edges":[{"u":"x","v":"y","w":2}]}"#).unwrap();
        let Json(status) = block_on(replace_graph_handler(State(state), Json(spec)))
            .map_err(|err| err.0)
            .unwrap();
        assert_eq!(status.node_count, 2);
        assert_eq!(status.total_steps, 0);
        assert!(status.algorithm.is_none());
    }

    #[test]
    fn ws_commands_drive_the_session() {
        let state = state_for("weighted");

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"run","algorithm":"prim","start":"S"}"#).unwrap();
        let WsResponse::Frame(frame) = block_on(handle_ws_command(&state, cmd)) else {
            panic!("expected a frame");
        };
        assert_eq!(frame.status.current_index, 0);
        assert_eq!(frame.message, "Start at S");

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"seek","index":2}"#).unwrap();
        let WsResponse::Frame(frame) = block_on(handle_ws_command(&state, cmd)) else {
            panic!("expected a frame");
        };
        assert_eq!(frame.status.current_index, 2);
        assert!(frame.edges.iter().any(|edge| edge.focused));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"run","algorithm":"dfs"}"#).unwrap();
        assert!(matches!(
            block_on(handle_ws_command(&state, cmd)),
            WsResponse::Error { .. }
        ));
    }
}
