use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod comments;
pub mod error;
pub mod middleware;
pub mod reservations;
pub mod state;
pub mod venues;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(venues::routes(state.clone()))
        .merge(reservations::routes(state.clone()))
        .merge(comments::routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<axum::response::Response, (StatusCode, &'static str)> {
    // Limiting is per source address and only active when Redis is
    // configured; connect info is absent under test harnesses.
    let peer = req
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);

    if let (Some(redis), Some(addr)) = (&state.redis, peer) {
        let key = format!("ratelimit:{}", addr.ip());
        match redis
            .check_rate_limit(&key, state.business_rules.rate_limit_per_minute, 60)
            .await
        {
            Ok(true) => {}
            Ok(false) => return Err((StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")),
            Err(_) => {} // Fail open
        }
    }

    Ok(next.run(req).await)
}
