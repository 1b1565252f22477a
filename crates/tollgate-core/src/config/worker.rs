//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Retention sweep worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the notification retention sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
    /// Maximum stored notification records per user; older records beyond
    /// this count are trimmed by the sweep.
    #[serde(default = "default_max_stored_per_user")]
    pub max_stored_per_user: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_schedule: default_sweep_schedule(),
            max_stored_per_user: default_max_stored_per_user(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    // Top of every hour.
    "0 0 * * * *".to_string()
}

fn default_max_stored_per_user() -> u64 {
    1000
}
