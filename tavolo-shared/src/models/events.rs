use chrono::NaiveDateTime;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReservationCreatedEvent {
    pub reservation_id: Uuid,
    pub venue_id: Uuid,
    pub customer_id: Uuid,
    pub reservation_time: NaiveDateTime,
    pub party_size: i32,
    pub created_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReservationStatusChangedEvent {
    pub reservation_id: Uuid,
    pub venue_id: Uuid,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: i64,
}
