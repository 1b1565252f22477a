//! Toll plaza query service.

pub mod service;

pub use service::{NearbyPlaza, TollPlazaService};
