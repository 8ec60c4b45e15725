use std::net::SocketAddr;
use std::sync::Arc;
use tavolo_api::{
    app,
    state::{AppState, AuthConfig},
    worker,
};
use tavolo_store::{
    DbClient, RedisClient, StoreCommentRepository, StoreReservationRepository,
    StoreUserRepository, StoreVenueRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tavolo_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tavolo_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Tavolo API on port {}", config.server.port);

    // Postgres Connection
    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    // Redis Connection (rate limiting only, optional)
    let redis = match &config.redis.url {
        Some(url) => Some(Arc::new(
            RedisClient::new(url).await.expect("Failed to connect to Redis"),
        )),
        None => {
            tracing::warn!("No Redis URL configured, rate limiting disabled");
            None
        }
    };

    // SSE Broadcast Channel
    let (sse_tx, _) = tokio::sync::broadcast::channel(100);

    let reservation_repo = Arc::new(StoreReservationRepository::new(db.pool.clone()));

    let app_state = AppState {
        user_repo: Arc::new(StoreUserRepository::new(db.pool.clone())),
        venue_repo: Arc::new(StoreVenueRepository::new(db.pool.clone())),
        reservation_repo: reservation_repo.clone(),
        comment_repo: Arc::new(StoreCommentRepository::new(db.pool.clone())),
        redis,
        sse_tx,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        business_rules: config.business_rules.clone(),
    };

    tokio::spawn(worker::start_expiry_worker(
        reservation_repo,
        config.business_rules.expiry_sweep_seconds,
    ));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
