//! Citrus Console: header filter expressions and list query state for the
//! simulator console, as a library, an HTTP API and a CLI.

pub mod api;
mod app;
pub mod core;
pub mod domain;
pub mod utils;
