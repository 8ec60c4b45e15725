use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "rejected" => Some(ReservationStatus::Rejected),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }
}

/// Who is acting on a reservation. The venue's owner manages status freely;
/// the booking customer may only cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationActor {
    VenueOwner,
    Customer,
}

pub fn transition_allowed(actor: ReservationActor, new_status: ReservationStatus) -> bool {
    match actor {
        ReservationActor::VenueOwner => true,
        ReservationActor::Customer => matches!(new_status, ReservationStatus::Cancelled),
    }
}

/// A customer's booking at a venue. `reservation_time` is naive wall-clock
/// time, matching what venues post as their hours.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub venue_id: Uuid,
    pub reservation_time: NaiveDateTime,
    pub party_size: i32,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        customer_id: Uuid,
        venue_id: Uuid,
        reservation_time: NaiveDateTime,
        party_size: i32,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            venue_id,
            reservation_time,
            party_size,
            status: ReservationStatus::Pending,
            notes,
            created_at: Utc::now(),
        }
    }
}
