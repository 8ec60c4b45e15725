pub mod models;
pub mod repository;

pub use models::{Reservation, ReservationActor, ReservationStatus};
pub use repository::ReservationRepository;
