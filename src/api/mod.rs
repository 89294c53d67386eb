pub mod auth;
pub mod guard;
pub mod server;
pub mod users;
