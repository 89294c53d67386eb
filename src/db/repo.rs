use sqlx::SqlitePool;

use crate::db::models::{User, UserView};

/// Follow relationships live in a single edge table keyed by the
/// (follower, followee) pair, so followers/following symmetry is structural:
/// one insert or delete covers both directions.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            follower_id TEXT NOT NULL,
            followee_id TEXT NOT NULL,
            PRIMARY KEY (follower_id, followee_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookmarks (
            user_id TEXT NOT NULL,
            tweet_id TEXT NOT NULL,
            PRIMARY KEY (user_id, tweet_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_user(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, username, email, password_hash)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users")
        .fetch_all(pool)
        .await
}

pub async fn list_users_except(pool: &SqlitePool, id: &str) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id != ?")
        .bind(id)
        .fetch_all(pool)
        .await
}

pub async fn followers_of(pool: &SqlitePool, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT follower_id FROM follows WHERE followee_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn following_of(pool: &SqlitePool, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT followee_id FROM follows WHERE follower_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// The one canonical answer to "does A follow B", used by both follow and
/// unfollow.
pub async fn is_following(
    pool: &SqlitePool,
    follower_id: &str,
    followee_id: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND followee_id = ?",
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

pub async fn insert_follow(
    pool: &SqlitePool,
    follower_id: &str,
    followee_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO follows (follower_id, followee_id) VALUES (?, ?)")
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_follow(
    pool: &SqlitePool,
    follower_id: &str,
    followee_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn bookmarks_of(pool: &SqlitePool, user_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT tweet_id FROM bookmarks WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn has_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    tweet_id: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks WHERE user_id = ? AND tweet_id = ?")
            .bind(user_id)
            .bind(tweet_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

pub async fn insert_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    tweet_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO bookmarks (user_id, tweet_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    tweet_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND tweet_id = ?")
        .bind(user_id)
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Assembles the wire-facing record for a user, deriving the relationship
/// and bookmark sets from the edge tables.
pub async fn user_view(pool: &SqlitePool, user: &User) -> Result<UserView, sqlx::Error> {
    Ok(UserView {
        id: user.id.clone(),
        name: user.name.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        followers: followers_of(pool, &user.id).await?,
        following: following_of(pool, &user.id).await?,
        bookmarks: bookmarks_of(pool, &user.id).await?,
    })
}
