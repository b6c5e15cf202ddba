//! vidhub - A video and social platform REST API backend
//!
//! Thin controllers over per-entity repositories, a uniform response
//! envelope, and a toggle protocol for likes and subscriptions.

pub mod api;
pub mod auth;
pub mod cli;
pub mod comments;
pub mod config;
pub mod dashboard;
pub mod engagement;
pub mod http;
pub mod media;
pub mod observability;
pub mod playlists;
pub mod store;
pub mod tweets;
pub mod users;
pub mod videos;
