//! A single-user movie watchlist served as HTML forms over SQLite.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod flash;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;
pub mod validation;

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
    key: Key,
}

impl AppState {
    pub fn new(store: MovieStore, secret_key: &str) -> Self {
        Self { store, key: flash::signing_key(secret_key) }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::create))
        .route("/movie/edit/{id}", get(routes::edit_form).post(routes::update))
        .route("/movie/delete/{id}", post(routes::delete))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), routes::render_error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
