//! API routes

pub mod auth;
