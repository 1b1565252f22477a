//! Concrete repository implementations and the collaborator traits the
//! alert engine consumes.

pub mod notification;
pub mod toll_plaza;
pub mod user;
