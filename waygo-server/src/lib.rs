//! WayGo student bus server.
//!
//! Finds nearby bus stops, shows live departures with a normalized status,
//! and keeps a user's favourite stops, session and theme between runs.

pub mod auth;
pub mod cache;
pub mod config;
pub mod domain;
pub mod state;
pub mod storage;
pub mod theme;
pub mod transport;
pub mod web;
