use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, patch},
    Extension, Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tavolo_booking::models::{transition_allowed, Reservation, ReservationActor, ReservationStatus};
use tavolo_core::schedule::{validate_reservation_time, RejectionReason, WindowDecision};
use tavolo_shared::models::events::ReservationCreatedEvent;
use tavolo_venue::venue::Venue;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::{auth_middleware, Claims};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub venue_id: Uuid,
    pub reservation_time: NaiveDateTime,
    pub party_size: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub venue_name: String,
    pub reservation_time: NaiveDateTime,
    pub party_size: i32,
    pub notes: Option<String>,
    pub status: String,
    pub customer_id: Uuid,
    pub customer_name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
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
        .route("/v1/reservations", get(list_reservations).post(create_reservation))
        .route("/v1/reservations/{reservation_id}", axum::routing::delete(delete_reservation))
        .route("/v1/reservations/{reservation_id}/status", patch(update_status))
        .route("/v1/reservations/venue/{venue_id}", get(venue_reservations))
        .route(
            "/v1/venues/{venue_id}/reservations/stream",
            get(stream_venue_reservations),
        )
        .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

fn rejection_message(reason: RejectionReason, venue: &Venue) -> String {
    match reason {
        RejectionReason::InPast => "Cannot make a reservation in the past".to_string(),
        RejectionReason::OutsideWeekdayHours => format!(
            "Reservation must be within working hours: {}",
            venue.weekdays_hours
        ),
        RejectionReason::OutsideWeekendHours => format!(
            "Reservation must be within working hours: {}",
            venue.weekend_hours
        ),
        RejectionReason::MalformedHours => {
            "The venue's working hours are malformed, contact the owner".to_string()
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/reservations
/// The one place the reservation time window is checked.
async fn create_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if !claims.is_customer() {
        return Err(AppError::AuthorizationError(
            "Venue owners cannot make reservations".to_string(),
        ));
    }

    if req.party_size < 1 {
        return Err(AppError::ValidationError(
            "Party size must be at least 1".to_string(),
        ));
    }
    if req.party_size > state.business_rules.max_party_size {
        return Err(AppError::ValidationError(format!(
            "Party size cannot exceed {}",
            state.business_rules.max_party_size
        )));
    }

    let venue = state
        .venue_repo
        .get_venue(req.venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    let now = Utc::now().naive_utc();
    let decision = validate_reservation_time(
        &venue.weekdays_hours,
        &venue.weekend_hours,
        req.reservation_time,
        now,
    );
    if let WindowDecision::Rejected(reason) = decision {
        return Err(AppError::ValidationError(rejection_message(reason, &venue)));
    }

    let customer_id = claims.user_id()?;
    let reservation = Reservation::new(
        customer_id,
        venue.id,
        req.reservation_time,
        req.party_size,
        req.notes,
    );

    state
        .reservation_repo
        .create_reservation(&reservation)
        .await
        .map_err(AppError::from_repo)?;

    // Notify any owner dashboards listening on the venue stream.
    let _ = state.sse_tx.send(ReservationCreatedEvent {
        reservation_id: reservation.id,
        venue_id: venue.id,
        customer_id,
        reservation_time: reservation.reservation_time,
        party_size: reservation.party_size,
        created_at: Utc::now().timestamp(),
    });

    tracing::info!(
        "Reservation created: {} at venue {} for {} guests",
        reservation.id,
        venue.name,
        reservation.party_size
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "The reservation has been created".to_string(),
            id: reservation.id,
        }),
    ))
}

/// GET /v1/reservations
/// Customers list their own bookings; owners list bookings across their venues.
async fn list_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let user_id = claims.user_id()?;

    let reservations = if claims.is_owner() {
        let venues = state
            .venue_repo
            .list_venues_by_owner(user_id)
            .await
            .map_err(AppError::from_repo)?;
        let venue_ids: Vec<Uuid> = venues.iter().map(|v| v.id).collect();
        state
            .reservation_repo
            .list_by_venues(&venue_ids)
            .await
            .map_err(AppError::from_repo)?
    } else {
        state
            .reservation_repo
            .list_by_customer(user_id)
            .await
            .map_err(AppError::from_repo)?
    };

    let responses = enrich(&state, reservations).await?;
    Ok(Json(responses))
}

/// GET /v1/reservations/venue/{venue_id}
async fn venue_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let venue = state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    if venue.owner_id != claims.user_id()? {
        return Err(AppError::AuthorizationError(
            "No permission to view these reservations".to_string(),
        ));
    }

    let reservations = state
        .reservation_repo
        .list_by_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?;

    let responses = enrich(&state, reservations).await?;
    Ok(Json(responses))
}

/// PATCH /v1/reservations/{reservation_id}/status
/// The venue's owner manages status freely; the booking customer may only
/// cancel.
async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let new_status = ReservationStatus::parse(&req.status)
        .ok_or_else(|| AppError::ValidationError("Invalid status value".to_string()))?;

    let reservation = state
        .reservation_repo
        .get_reservation(reservation_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    let actor = actor_for(&state, &claims, &reservation).await?;
    if !transition_allowed(actor, new_status) {
        return Err(AppError::AuthorizationError(
            "No permission to update this reservation".to_string(),
        ));
    }

    state
        .reservation_repo
        .update_status(reservation_id, new_status)
        .await
        .map_err(AppError::from_repo)?;

    tracing::info!(
        "Reservation {} moved from {} to {}",
        reservation_id,
        reservation.status.as_str(),
        new_status.as_str()
    );

    Ok(Json(MessageResponse {
        message: "Reservation updated successfully".to_string(),
    }))
}

/// DELETE /v1/reservations/{reservation_id}
async fn delete_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let reservation = state
        .reservation_repo
        .get_reservation(reservation_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Reservation not found".to_string()))?;

    // Either side of the booking may remove it.
    actor_for(&state, &claims, &reservation).await?;

    state
        .reservation_repo
        .delete_reservation(reservation_id)
        .await
        .map_err(AppError::from_repo)?;

    Ok(Json(MessageResponse {
        message: "Reservation deleted successfully".to_string(),
    }))
}

/// GET /v1/venues/{venue_id}/reservations/stream
/// SSE feed of reservations as they land, for the owner's dashboard.
async fn stream_venue_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(venue_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let venue = state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    if venue.owner_id != claims.user_id()? {
        return Err(AppError::AuthorizationError(
            "No permission to watch this venue".to_string(),
        ));
    }

    let rx = state.sse_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(move |result| async move {
        match result {
            Ok(event) if event.venue_id == venue_id => {
                let data = serde_json::to_string(&event).unwrap_or_default();
                Some(Ok(Event::default().event("reservation_created").data(data)))
            }
            _ => None,
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the caller's relationship to a reservation, or 403.
async fn actor_for(
    state: &AppState,
    claims: &Claims,
    reservation: &Reservation,
) -> Result<ReservationActor, AppError> {
    let user_id = claims.user_id()?;
    if reservation.customer_id == user_id {
        return Ok(ReservationActor::Customer);
    }

    let venue = state
        .venue_repo
        .get_venue(reservation.venue_id)
        .await
        .map_err(AppError::from_repo)?;
    match venue {
        Some(v) if v.owner_id == user_id => Ok(ReservationActor::VenueOwner),
        _ => Err(AppError::AuthorizationError(
            "No permission to manage this reservation".to_string(),
        )),
    }
}

/// Attach venue and customer display names for list views.
async fn enrich(
    state: &AppState,
    reservations: Vec<Reservation>,
) -> Result<Vec<ReservationResponse>, AppError> {
    let mut venue_names: HashMap<Uuid, String> = HashMap::new();
    let mut customer_names: HashMap<Uuid, String> = HashMap::new();

    let mut responses = Vec::with_capacity(reservations.len());
    for reservation in reservations {
        if !venue_names.contains_key(&reservation.venue_id) {
            let name = state
                .venue_repo
                .get_venue(reservation.venue_id)
                .await
                .map_err(AppError::from_repo)?
                .map(|v| v.name)
                .unwrap_or_default();
            venue_names.insert(reservation.venue_id, name);
        }
        if !customer_names.contains_key(&reservation.customer_id) {
            let name = state
                .user_repo
                .find_by_id(reservation.customer_id)
                .await
                .map_err(AppError::from_repo)?
                .map(|u| u.username)
                .unwrap_or_default();
            customer_names.insert(reservation.customer_id, name);
        }

        responses.push(ReservationResponse {
            id: reservation.id,
            venue_id: reservation.venue_id,
            venue_name: venue_names
                .get(&reservation.venue_id)
                .cloned()
                .unwrap_or_default(),
            reservation_time: reservation.reservation_time,
            party_size: reservation.party_size,
            notes: reservation.notes,
            status: reservation.status.as_str().to_string(),
            customer_id: reservation.customer_id,
            customer_name: customer_names
                .get(&reservation.customer_id)
                .cloned()
                .unwrap_or_default(),
        });
    }

    Ok(responses)
}
