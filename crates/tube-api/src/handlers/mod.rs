//! Request handlers

pub mod auth;
pub mod comments;
pub mod health;
pub mod likes;
pub mod subscriptions;
pub mod uploads;
pub mod users;
pub mod videos;
