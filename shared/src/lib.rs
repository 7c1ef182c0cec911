//! Shared types and models for the AgriPredict farmer dashboard
//!
//! This crate contains the domain types, localization store and form
//! validation shared between the backend and the browser (via WASM).

pub mod i18n;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
