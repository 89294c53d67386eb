use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{auth, guard, users};
use crate::config::Config;
use crate::db::repo;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub token_secret: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    // The gate runs before these handlers; unauthenticated requests never
    // reach them.
    let protected = Router::new()
        .route("/bookmark/{id}", put(users::bookmark))
        .route("/profile/{id}", get(users::profile))
        .route("/otheruser/{id}", get(users::other_users))
        .route("/follow/{id}", post(users::follow))
        .route("/unfollow/{id}", post(users::unfollow))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/list", get(users::list))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to SQLite");

    repo::create_schema(&pool)
        .await
        .expect("Failed to create schema");

    let state = Arc::new(AppState {
        db: pool,
        token_secret: config.token_secret,
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to port");

    info!("Server running on http://{addr}");

    axum::serve(listener, app).await.expect("Server failed");
}
