pub mod app_config;
pub mod comment_repo;
pub mod database;
pub mod redis_repo;
pub mod reservation_repo;
pub mod user_repo;
pub mod venue_repo;

pub use comment_repo::StoreCommentRepository;
pub use database::DbClient;
pub use redis_repo::RedisClient;
pub use reservation_repo::StoreReservationRepository;
pub use user_repo::StoreUserRepository;
pub use venue_repo::StoreVenueRepository;

use tavolo_core::CoreError;

/// Surfaces unique-constraint violations as a typed conflict the API layer
/// can turn into a 409; everything else passes through unchanged.
pub(crate) fn map_db_err(e: sqlx::Error) -> Box<dyn std::error::Error + Send + Sync> {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return Box::new(CoreError::ConflictError(db.message().to_string()));
        }
    }
    Box::new(e)
}
