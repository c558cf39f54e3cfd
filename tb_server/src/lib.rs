//! HTTP/WebSocket front end for time bomb games.

pub mod api;
pub mod config;
