use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tavolo_core::identity::{User, UserType};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::{AppState, AuthConfig};

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    user_type: String,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    message: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    access_token: String,
    user_type: String,
    username: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

pub fn issue_token(user: &User, auth: &AuthConfig) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        user_type: user.user_type.as_str().to_string(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user_type = UserType::parse(&req.user_type)
        .ok_or_else(|| AppError::ValidationError("Invalid user type".to_string()))?;

    if !req.email.contains('@') {
        return Err(AppError::ValidationError("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if req.username.trim().is_empty() {
        return Err(AppError::ValidationError("Username is required".to_string()));
    }

    if state
        .user_repo
        .find_by_username(&req.username)
        .await
        .map_err(AppError::from_repo)?
        .is_some()
    {
        return Err(AppError::ValidationError("Username is already taken".to_string()));
    }

    if state
        .user_repo
        .find_by_email(&req.email)
        .await
        .map_err(AppError::from_repo)?
        .is_some()
    {
        return Err(AppError::ValidationError("Email is already taken".to_string()));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

    let user = User::new(req.username, req.email, password_hash, user_type);
    state
        .user_repo
        .create_user(&user)
        .await
        .map_err(AppError::from_repo)?;

    tracing::info!("Registered new {} account: {}", user.user_type, user.username);

    let access_token = issue_token(&user, &state.auth)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Successfully registered".to_string(),
            access_token,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await
        .map_err(AppError::from_repo)?
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let valid = bcrypt::verify(&req.password, user.password_hash.inner())
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::AuthenticationError("Invalid credentials".to_string()));
    }

    let access_token = issue_token(&user, &state.auth)?;

    Ok(Json(LoginResponse {
        access_token,
        user_type: user.user_type.as_str().to_string(),
        username: user.username,
    }))
}
