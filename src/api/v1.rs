use axum::{routing::get, Router};

use crate::{
    api::{health, lcoe},
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/health", get(health::health_check))
        .route("/defaults", get(lcoe::get_defaults))
        .route("/lcoe", get(lcoe::get_lcoe))
        .route("/surface", get(lcoe::get_surface))
        .route("/surface/point", get(lcoe::get_surface_point))
        .with_state(state)
}
