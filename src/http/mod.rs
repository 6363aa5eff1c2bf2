//! HTTP surface: status polling, calibration commands and the MJPEG stream.
//!
//! A thin Axum layer over [`EngineHandle`](crate::engine::EngineHandle); all
//! state transitions happen in the engine.

mod mjpeg;
mod routes;


pub use routes::{build_router, run_http_server, HealthResponse, HttpServerError, HttpState};
