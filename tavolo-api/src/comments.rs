use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tavolo_core::identity::UserType;
use tavolo_venue::comment::{normalize_rating, VenueComment};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::{auth_middleware, Claims};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    pub rating: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    // Reading reviews is public; writing and deleting require a session.
    let public = Router::new().route("/v1/venues/{venue_id}/comments", get(list_comments));

    let protected = Router::new()
        .route("/v1/venues/{venue_id}/comments", post(add_comment))
        .route(
            "/v1/venues/{venue_id}/comments/{comment_id}",
            delete(delete_comment),
        )
        .layer(axum::middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// GET /v1/venues/{venue_id}/comments
async fn list_comments(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = state
        .comment_repo
        .list_comments(venue_id)
        .await
        .map_err(AppError::from_repo)?;

    let mut responses = Vec::with_capacity(comments.len());
    for comment in comments {
        let username = state
            .user_repo
            .find_by_id(comment.user_id)
            .await
            .map_err(AppError::from_repo)?
            .map(|u| u.username)
            .unwrap_or_default();
        responses.push(CommentResponse {
            id: comment.id,
            venue_id: comment.venue_id,
            user_id: comment.user_id,
            text: comment.body,
            rating: comment.rating,
            created_at: comment.created_at,
            username,
        });
    }

    Ok(Json(responses))
}

/// POST /v1/venues/{venue_id}/comments
async fn add_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(venue_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::ValidationError("Text is required".to_string()));
    }

    state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    let user_type = UserType::parse(&claims.user_type)
        .ok_or_else(|| AppError::AuthenticationError("Unknown user type".to_string()))?;
    let rating = normalize_rating(user_type, req.rating)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let comment = VenueComment::new(venue_id, claims.user_id()?, text.to_string(), rating);
    state
        .comment_repo
        .add_comment(&comment)
        .await
        .map_err(AppError::from_repo)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Comment added".to_string(),
        }),
    ))
}

/// DELETE /v1/venues/{venue_id}/comments/{comment_id}
/// Allowed for the comment's author and for the venue's owner.
async fn delete_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((venue_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let comment = state
        .comment_repo
        .get_comment(venue_id, comment_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Comment not found".to_string()))?;

    let venue = state
        .venue_repo
        .get_venue(venue_id)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::NotFoundError("Venue not found".to_string()))?;

    let user_id = claims.user_id()?;
    if comment.user_id != user_id && venue.owner_id != user_id {
        return Err(AppError::AuthorizationError(
            "No permission to delete this comment".to_string(),
        ));
    }

    state
        .comment_repo
        .delete_comment(comment_id)
        .await
        .map_err(AppError::from_repo)?;

    Ok(Json(MessageResponse {
        message: "Comment deleted".to_string(),
    }))
}
