use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::engine::{CalibrationCommand, CalibrationReply, EngineHandle, PublishedStatus};
use crate::error::{CalibrationError, ErrorCode};

use super::mjpeg;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub handle: Arc<EngineHandle>,
}

impl HttpState {
    pub fn new(handle: Arc<EngineHandle>) -> Self {
        Self { handle }
    }
}

/// HTTP error variants mapped to JSON responses.
#[derive(Debug)]
pub enum HttpServerError {
    Internal(String),
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<CalibrationError> for HttpServerError {
    fn from(err: CalibrationError) -> Self {
        HttpServerError::Internal(format!("{} (code {})", err.message(), err.code()))
    }
}

/// Health endpoint response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub loop_running: bool,
    pub uptime_ms: u64,
    pub frames_processed: u64,
    pub frames_dropped: u64,
}

/// Build the Axum router with all handlers.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/video", get(video))
        .route("/data", get(data))
        .route("/health", get(health))
        .route("/calibration/custom/start", get(calibration_start))
        .route("/calibration/custom/stop", get(calibration_stop))
        .route("/calibration/custom/reset", get(calibration_reset))
        .route("/calibration/default", get(calibration_default))
        .with_state(state)
}

/// Run the HTTP server until `shutdown` resolves.
///
/// A shutdown signal that fails (for example no Ctrl-C handler could be
/// installed) still stops the server, but is returned as an error.
pub async fn run_http_server<F>(state: HttpState, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {addr}"))?;
    log::info!("[HTTP] Listening on http://{}", addr);

    let (failed_tx, failed_rx) = oneshot::channel::<io::Error>();
    let signal = async move {
        if let Err(err) = shutdown.await {
            let _ = failed_tx.send(err);
        }
    };

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(signal)
        .await
        .context("serving HTTP router")?;

    match failed_rx.await {
        Ok(err) => Err(anyhow::Error::new(err).context("waiting for shutdown signal")),
        Err(_) => Ok(()),
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn video(State(state): State<HttpState>) -> Response {
    mjpeg::stream(&state.handle)
}

pub async fn data(State(state): State<HttpState>) -> Json<PublishedStatus> {
    Json(state.handle.status())
}

pub async fn health(State(state): State<HttpState>) -> Json<HealthResponse> {
    let handle = &state.handle;
    Json(HealthResponse {
        status: "ok",
        loop_running: handle.is_loop_running(),
        uptime_ms: handle.uptime_ms(),
        frames_processed: handle.frames_processed(),
        frames_dropped: handle.frames_dropped(),
    })
}

fn run_command(
    state: &HttpState,
    command: CalibrationCommand,
) -> Result<Json<CalibrationReply>, HttpServerError> {
    Ok(Json(state.handle.execute(command)?))
}

pub async fn calibration_start(
    State(state): State<HttpState>,
) -> Result<Json<CalibrationReply>, HttpServerError> {
    run_command(&state, CalibrationCommand::Start)
}

pub async fn calibration_stop(
    State(state): State<HttpState>,
) -> Result<Json<CalibrationReply>, HttpServerError> {
    run_command(&state, CalibrationCommand::Stop)
}

pub async fn calibration_reset(
    State(state): State<HttpState>,
) -> Result<Json<CalibrationReply>, HttpServerError> {
    run_command(&state, CalibrationCommand::Reset)
}

pub async fn calibration_default(
    State(state): State<HttpState>,
) -> Result<Json<CalibrationReply>, HttpServerError> {
    run_command(&state, CalibrationCommand::Default)
}
