//! # tollgate-core
//!
//! Core crate for Tollgate. Contains configuration schemas, typed
//! identifiers, the geospatial distance utility, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Tollgate crates.

pub mod config;
pub mod error;
pub mod geo;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
