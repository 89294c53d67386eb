use serde::Serialize;
use sqlx::FromRow;

/// A row in the `users` table. Holds the password hash, so it is never
/// serialized directly; responses go through [`UserView`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Wire-facing user record. The password hash is not a field of this type,
/// so no response can leak it. The three sets are derived from the edge
/// tables at read time.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub bookmarks: Vec<String>,
}
