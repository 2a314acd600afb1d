//! HTTP front-end for the personality predictor.
//!
//! # Endpoints
//!
//! - `GET  /health`      — Liveness probe
//! - `GET  /`            — Username form
//! - `POST /`            — Form submission, HTML result
//! - `POST /api/predict` — JSON prediction

pub mod routes;
pub mod templates;

pub use routes::{app_router, AppState};
pub use templates::Templates;
