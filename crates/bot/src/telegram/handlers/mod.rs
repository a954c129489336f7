//! Telegram update handlers

pub mod commands;
pub mod photos;
pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{user_key, HandlerDeps, HandlerError};
