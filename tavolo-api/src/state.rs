use std::sync::Arc;
use tavolo_booking::ReservationRepository;
use tavolo_core::identity::UserRepository;
use tavolo_shared::models::events::ReservationCreatedEvent;
use tavolo_store::app_config::BusinessRules;
use tavolo_store::RedisClient;
use tavolo_venue::{CommentRepository, VenueRepository};
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub redis: Option<Arc<RedisClient>>,
    pub sse_tx: broadcast::Sender<ReservationCreatedEvent>,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}
