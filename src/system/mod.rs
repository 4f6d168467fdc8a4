//! System-level routes

pub mod health_check;

use axum::{routing::get, Router};

pub fn create_system_router() -> Router {
    Router::new().route("/health", get(health_check::health_check))
}
