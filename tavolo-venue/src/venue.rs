use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tavolo_core::schedule::{HoursParseError, OperatingHours};
use uuid::Uuid;

/// Venue categories exposed to clients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Cafe,
    Bar,
    Restaurant,
}

impl VenueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueType::Cafe => "cafe",
            VenueType::Bar => "bar",
            VenueType::Restaurant => "restaurant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cafe" => Some(VenueType::Cafe),
            "bar" => Some(VenueType::Bar),
            "restaurant" => Some(VenueType::Restaurant),
            _ => None,
        }
    }
}

/// A bookable business. The two hour fields keep the posted free-text
/// `"HH:MM-HH:MM"` form; `operating_hours` parses them on demand so stale
/// rows with bad data surface as a parse error instead of a crash.
#[derive(Debug, Clone)]
pub struct Venue {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub venue_type: VenueType,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub image_url: Option<String>,
    pub menu_image_url: Option<String>,
    pub weekdays_hours: String,
    pub weekend_hours: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    pub fn operating_hours(&self) -> Result<OperatingHours, HoursParseError> {
        OperatingHours::from_strs(&self.weekdays_hours, &self.weekend_hours)
    }
}
