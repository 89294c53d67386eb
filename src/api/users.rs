use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::db::{
    models::{User, UserView},
    repo,
};
use crate::error::AppError;

/// Body carrying the acting user's identifier, used by the bookmark and
/// follow endpoints.
#[derive(Deserialize)]
pub struct ActingUser {
    #[serde(default)]
    pub id: String,
}

async fn views_for(state: &AppState, users: &[User]) -> Result<Vec<UserView>, AppError> {
    let mut views = Vec::with_capacity(users.len());
    for user in users {
        views.push(repo::user_view(&state.db, user).await?);
    }
    Ok(views)
}

/// Returns `{"user": null}` for an unknown identifier; callers handle the
/// missing case.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = match repo::find_user_by_id(&state.db, &id).await? {
        Some(user) => Some(repo::user_view(&state.db, &user).await?),
        None => None,
    };

    Ok(Json(json!({ "user": view })))
}

pub async fn other_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let users = repo::list_users_except(&state.db, &id).await?;
    let views = views_for(&state, &users).await?;

    Ok(Json(json!({ "otherUsers": views })))
}

/// Bulk user dump. The `products` key is what the frontend expects.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let users = repo::list_users(&state.db).await?;
    let views = views_for(&state, &users).await?;

    Ok(Json(json!({ "success": true, "products": views })))
}

pub async fn bookmark(
    State(state): State<Arc<AppState>>,
    Path(tweet_id): Path<String>,
    Json(acting): Json<ActingUser>,
) -> Result<impl IntoResponse, AppError> {
    if acting.id.trim().is_empty() || tweet_id.trim().is_empty() {
        return Err(AppError::Validation(
            "User ID and Tweet ID are required.".into(),
        ));
    }

    let user = repo::find_user_by_id(&state.db, &acting.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    let message = if repo::has_bookmark(&state.db, &user.id, &tweet_id).await? {
        repo::delete_bookmark(&state.db, &user.id, &tweet_id).await?;
        "Removed from bookmarks."
    } else {
        repo::insert_bookmark(&state.db, &user.id, &tweet_id).await?;
        "Saved to bookmarks."
    };

    let bookmarks = repo::bookmarks_of(&state.db, &user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": message,
        "bookmarks": bookmarks,
    })))
}

async fn load_pair(
    state: &AppState,
    actor_id: &str,
    target_id: &str,
) -> Result<(User, User), AppError> {
    let actor = repo::find_user_by_id(&state.db, actor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    let target = repo::find_user_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    Ok((actor, target))
}

pub async fn follow(
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<String>,
    Json(acting): Json<ActingUser>,
) -> Result<impl IntoResponse, AppError> {
    if acting.id.trim().is_empty() {
        return Err(AppError::Validation("User ID is required.".into()));
    }

    let (actor, target) = load_pair(&state, &acting.id, &target_id).await?;

    if repo::is_following(&state.db, &actor.id, &target.id).await? {
        return Err(AppError::Conflict(format!(
            "Already following {}.",
            target.name
        )));
    }
    repo::insert_follow(&state.db, &actor.id, &target.id).await?;

    Ok(Json(json!({
        "message": format!("{} is now following {}.", actor.name, target.name),
        "success": true,
    })))
}

pub async fn unfollow(
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<String>,
    Json(acting): Json<ActingUser>,
) -> Result<impl IntoResponse, AppError> {
    if acting.id.trim().is_empty() {
        return Err(AppError::Validation("User ID is required.".into()));
    }

    let (actor, target) = load_pair(&state, &acting.id, &target_id).await?;

    if !repo::is_following(&state.db, &actor.id, &target.id).await? {
        return Err(AppError::Conflict(format!(
            "Not following {} yet.",
            target.name
        )));
    }
    repo::delete_follow(&state.db, &actor.id, &target.id).await?;

    Ok(Json(json!({
        "message": format!("{} unfollowed {}.", actor.name, target.name),
        "success": true,
    })))
}
