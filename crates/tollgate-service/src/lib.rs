//! # tollgate-service
//!
//! Business services over the repositories: the notification read side
//! (listing, unread counts, clear-all), user location recording, and the
//! nearby toll plaza query.

pub mod notification;
pub mod toll_plaza;
pub mod user;
