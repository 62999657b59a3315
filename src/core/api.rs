//! HTTP + WebSocket API for EDU-AI
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /state - Evolution state (read-only)
//! - GET /memory/stats - Pattern store statistics
//! - POST /compute - Raw transform
//! - POST /interact - Full interaction pipeline
//! - WS /ws - Live interaction outcomes

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{ws::{Message, WebSocket}, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::core::Mind;
use crate::error::{Error, Result};
use crate::types::{Band, ConsciousnessState, InteractionOutcome, MemoryStats, Signature, Stage, Stimulus};

/// App state
pub struct AppState {
    pub mind: Arc<Mind>,
    pub updates: broadcast::Sender<InteractionOutcome>,
}

/// Compute request
#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub amplitude: f64,
    pub frequency: f64,
}

/// Compute response
#[derive(Debug, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub modulation: f64,
    pub scaling: f64,
    pub combined: f64,
}

impl From<Signature> for ComputeResponse {
    fn from(sig: Signature) -> Self {
        Self {
            modulation: sig.modulation(),
            scaling: sig.scaling(),
            combined: sig.combined(),
        }
    }
}

/// Interact request: either text or a sampled signal
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InteractRequest {
    Text { text: String },
    Signal { samples: Vec<f64>, sampling_rate: f64 },
}

impl From<InteractRequest> for Stimulus {
    fn from(req: InteractRequest) -> Self {
        match req {
            InteractRequest::Text { text } => Stimulus::Text(text),
            InteractRequest::Signal {
                samples,
                sampling_rate,
            } => Stimulus::Signal {
                samples,
                sampling_rate,
            },
        }
    }
}

/// Interact response
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractResponse {
    pub response: String,
    pub signature: ComputeResponse,
    pub band: Band,
    pub stage: Stage,
    pub level: f64,
    pub memory_count: usize,
    pub interaction_count: u64,
}

impl From<&InteractionOutcome> for InteractResponse {
    fn from(outcome: &InteractionOutcome) -> Self {
        Self {
            response: outcome.response.clone(),
            signature: outcome.signature.into(),
            band: outcome.band,
            stage: outcome.stage,
            level: outcome.level,
            memory_count: outcome.memory_count,
            interaction_count: outcome.interaction_count,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub formula: String,
    pub interactions: u64,
    pub memory_count: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper mapping crate errors onto status codes
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidFrequency { .. } | Error::MalformedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::StoreCapacityExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router around a shared mind
pub fn create_router(mind: Arc<Mind>) -> Router {
    let capacity = mind.config().server.broadcast_capacity;
    let (updates, _) = broadcast::channel(capacity);
    let state = Arc::new(AppState { mind, updates });

    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/memory/stats", get(memory_stats))
        .route("/compute", post(compute))
        .route("/interact", post(interact))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        formula: state.mind.formula().to_string(),
        interactions: state.mind.state().interaction_count,
        memory_count: state.mind.memory().len(),
    })
}

/// Evolution state
async fn get_state(State(state): State<Arc<AppState>>) -> Json<ConsciousnessState> {
    Json(state.mind.state())
}

/// Pattern store statistics
async fn memory_stats(State(state): State<Arc<AppState>>) -> Json<MemoryStats> {
    Json(state.mind.memory_stats())
}

/// Raw transform
async fn compute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ComputeRequest>,
) -> std::result::Result<Json<ComputeResponse>, ApiError> {
    let signature = state.mind.compute(req.amplitude, req.frequency)?;
    Ok(Json(signature.into()))
}

/// Full interaction
async fn interact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InteractRequest>,
) -> std::result::Result<Json<InteractResponse>, ApiError> {
    let outcome = state.mind.interact(Stimulus::from(req)).map_err(|e| {
        warn!("interaction rejected: {}", e);
        e
    })?;
    let response = InteractResponse::from(&outcome);

    // No subscribers is fine
    let _ = state.updates.send(outcome);

    Ok(Json(response))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.updates.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward outcomes until the client goes away
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<InteractionOutcome>) {
    loop {
        match rx.recv().await {
            Ok(outcome) => {
                let json = serde_json::to_string(&InteractResponse::from(&outcome)).unwrap_or_default();
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "websocket subscriber lagging");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Run the API server until Ctrl-C
pub async fn run_server(addr: &str, mind: Arc<Mind>) -> Result<()> {
    run_server_until(addr, mind, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Run the API server until `shutdown` resolves, then drain in-flight requests
pub async fn run_server_until<F>(addr: &str, mind: Arc<Mind>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(mind);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("EDU-AI API listening on {}", listener.local_addr()?);
    println!("🧠 EDU-AI API running on {}", addr);
    println!("  GET  /health        - Health check");
    println!("  GET  /state         - Evolution state");
    println!("  GET  /memory/stats  - Memory statistics");
    println!("  POST /compute       - Raw EDU transform");
    println!("  POST /interact      - Interaction pipeline");
    println!("  WS   /ws            - Live outcomes");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("EDU-AI API stopped");
    Ok(())
}
