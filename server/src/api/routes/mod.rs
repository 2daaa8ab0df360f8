//! API route handlers

pub mod filters;
pub mod health;
