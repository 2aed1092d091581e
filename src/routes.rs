use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers::health::health;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Build the full router over `state`
pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(protected_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/register", post(auth::auth_register))
        .route("/api/auth", post(auth::auth_login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/info", get(protected::user_info))
        .route("/api/sendCoin", post(protected::send_coin))
        .route("/api/buy/:item", post(protected::buy_item))
        // route_layer so unknown paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
