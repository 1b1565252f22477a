//! Toll plaza entity.

pub mod model;

pub use model::TollPlaza;
