//! # tollgate-entity
//!
//! Domain entity models for Tollgate: users and their alert settings,
//! toll plazas, and notification records.

pub mod notification;
pub mod toll_plaza;
pub mod user;
