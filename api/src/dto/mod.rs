//! Request and response types for the API layer

pub mod auth;
