//! Domain logic
//!
//! - `filters` - header filter expression codec and console list query state

pub mod filters;
