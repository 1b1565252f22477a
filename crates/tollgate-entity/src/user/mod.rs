//! User entity and notification settings.

pub mod model;
pub mod settings;

pub use model::User;
pub use settings::UserSettings;
