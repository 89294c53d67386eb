use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::server::AppState;
use crate::db::{models::User, repo};
use crate::error::AppError;
use crate::{password, token};

#[derive(Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let required = [
        &payload.name,
        &payload.username,
        &payload.email,
        &payload.password,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::Validation("All fields are required.".into()));
    }

    if repo::find_user_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists.".into()));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        username: payload.username,
        email: payload.email,
        // Only the salted hash is stored; the raw password goes no further.
        password_hash: password::hash(&payload.password)?,
    };
    repo::insert_user(&state.db, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Account created successfully.", "success": true })),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() || payload.password.trim().is_empty() {
        return Err(AppError::Validation("All fields are required.".into()));
    }

    let user = repo::find_user_by_email(&state.db, &payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    if !password::verify(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let session = token::issue(&user.id, &state.token_secret)?;
    let cookie = Cookie::build(("token", session))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::days(1))
        .build();

    let view = repo::user_view(&state.db, &user).await?;

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(json!({
            "message": format!("Welcome back {}", user.name),
            "user": view,
            "success": true,
        })),
    ))
}

/// Tokens are stateless, so logging out is purely client-side: overwrite the
/// cookie with an empty, already-expired value.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let cleared = Cookie::build(("token", ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();

    (
        jar.add(cleared),
        Json(json!({ "message": "User logged out successfully.", "success": true })),
    )
}
