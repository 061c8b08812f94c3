//! Serde helpers.

pub mod decimal;
