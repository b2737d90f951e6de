#![forbid(unsafe_code)]
//! HTTP surface of the irrigation service.
//!
//! The binary in `main.rs` wires configuration, logging, and the shared
//! [`AppState`] together and serves the router built here. Handlers stay
//! thin: parse the form, call into `irrigo_core`, render a page or a
//! plain-text device reply.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

pub mod cli;
pub mod handlers;
pub mod html;
pub mod state;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/predict", post(handlers::predict))
        .route("/seedBank", get(handlers::seed_bank))
        .route("/contact", get(handlers::contact))
        .route("/submit_contact", post(handlers::submit_contact))
        .route("/update_data", post(handlers::update_data))
        .route("/sensor_data", get(handlers::sensor_data))
        .route("/control_pump", post(handlers::control_pump))
        .route("/healthz", get(handlers::healthz))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}
