use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tavolo_core::schedule::OperatingHours;
use tavolo_venue::media::{safe_image_url, DEFAULT_MENU_IMAGE, DEFAULT_VENUE_IMAGE};
use tavolo_venue::venue::{Venue, VenueType};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::{auth_middleware, Claims};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub weekdays_hours: String,
    pub weekend_hours: String,
    pub image_url: Option<String>,
    pub menu_image_url: Option<String>,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub weekdays_hours: String,
    pub weekend_hours: String,
    pub image_url: String,
    pub menu_image_url: String,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VenueResponse {
    /// Image fields are sanitized on the way out as well: rows written
    /// before the URL check existed still render a safe default.
    pub fn from_venue(venue: Venue) -> Self {
        Self {
            id: venue.id,
            owner_id: venue.owner_id,
            name: venue.name,
            address: venue.address,
            phone: venue.phone,
            email: venue.email,
            image_url: safe_image_url(venue.image_url.as_deref(), DEFAULT_VENUE_IMAGE),
            menu_image_url: safe_image_url(venue.menu_image_url.as_deref(), DEFAULT_MENU_IMAGE),
            weekdays_hours: venue.weekdays_hours,
            weekend_hours: venue.weekend_hours,
            venue_type: venue.venue_type.as_str().to_string(),
            latitude: venue.latitude,
            longitude: venue.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    message: String,
    id: Uuid,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/venues", get(list_venues).post(create_venue))
        .route("/v1/venues/{venue_id}", get(get_venue).delete(delete_venue))
        .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/venues
/// Owners see their own venues, customers browse all of them.
async fn list_venues(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<VenueResponse>>, AppError> {
    let venues = if claims.is_owner() {
        state
            .venue_repo
            .list_venues_by_owner(claims.user_id()?)
            .await
            .map_err(AppError::from_repo)?
    } else {
        state
            .venue_repo
            .list_venues()
            .await
            .map_err(AppError::from_repo)?
    };

    Ok(Json(venues.into_iter().map(VenueResponse::from_venue).collect()))
}

/// POST /v1/venues
async fn create_venue(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if !claims.is_owner() {
        return Err(AppError::AuthorizationError(
            "Only owners can create venues".to_string(),
        ));
    }

    let venue_type = VenueType::parse(&req.venue_type)
        .ok_or_else(|| AppError::ValidationError("Invalid venue type".to_string()))?;

    // Both hour fields must parse with the same rules the reservation
    // window check applies later, so bad data is refused at the door.
    OperatingHours::from_strs(&req.weekdays_hours, &req.weekend_hours)
        .map_err(|e| AppError::ValidationError(format!("Invalid working hours: {}", e)))?;

    if req.name.trim().is_empty() || req.address.trim().is_empty() || req.phone.trim().is_empty() {
        return Err(AppError::ValidationError("Missing required fields".to_string()));
    }

    let venue = Venue {
        id: Uuid::new_v4(),
        owner_id: claims.user_id()?,
        name: req.name,
        venue_type,
        phone: req.phone,
        email: req.email,
        address: req.address,
        image_url: Some(safe_image_url(req.image_url.as_deref(), DEFAULT_VENUE_IMAGE)),
        menu_image_url: Some(safe_image_url(req.menu_image_url.as_deref(), DEFAULT_MENU_IMAGE)),
        weekdays_hours: req.weekdays_hours,
        weekend_hours: req.weekend_hours,
        latitude: req.latitude,
        longitude: req.longitude,
        created_at: chrono::Utc::now(),
    };

    state
        .venue_repo
        .create_venue(&venue)
        .await
        .map_err(AppError::from_repo)?;

    tracing::info!("Venue created: {} ({})", venue.name, venue.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Venue created successfully".to_string(),
            id: venue.id,
        }),
    ))
}

/// GET /v1/venues/{venue_id}
async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<VenueResponse>, AppError> {
    let venue = state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    Ok(Json(VenueResponse::from_venue(venue)))
}

/// DELETE /v1/venues/{venue_id}
async fn delete_venue(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let venue = state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    if venue.owner_id != claims.user_id()? {
        return Err(AppError::AuthorizationError(
            "No permission to delete this venue".to_string(),
        ));
    }

    state
        .venue_repo
        .delete_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?;

    Ok(Json(MessageResponse {
        message: "Venue deleted successfully".to_string(),
    }))
}
