use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{Reservation, ReservationStatus};

/// Repository trait for reservation data access
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_reservation(
        &self,
        id: Uuid,
    ) -> Result<Option<Reservation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_venue(
        &self,
        venue_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_venues(
        &self,
        venue_ids: &[Uuid],
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns false when no reservation with this id existed.
    async fn delete_reservation(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Flip pending reservations whose time has already passed to rejected.
    /// Returns how many rows were touched.
    async fn reject_overdue_pending(
        &self,
        now: NaiveDateTime,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}
