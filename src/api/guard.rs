use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::error::AppError;
use crate::token;

/// Authentication gate for the protected routes. Accepts the session token
/// from the `token` cookie or an `Authorization: Bearer` header.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(&request));

    let Some(token) = token else {
        return Err(AppError::Unauthorized);
    };

    token::verify(&token, &state.token_secret).map_err(|_| AppError::Unauthorized)?;

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
