//! Alert kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of alert this system emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// FASTag balance dropped below the user's threshold.
    Balance,
    /// The user came within the proximity radius of a toll plaza.
    Proximity,
}

impl AlertKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Proximity => "proximity",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = tollgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balance" => Ok(Self::Balance),
            "proximity" => Ok(Self::Proximity),
            _ => Err(tollgate_core::AppError::validation(format!(
                "Invalid alert kind: '{s}'. Expected one of: balance, proximity"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("balance".parse::<AlertKind>().unwrap(), AlertKind::Balance);
        assert_eq!(
            "PROXIMITY".parse::<AlertKind>().unwrap(),
            AlertKind::Proximity
        );
        assert!("invalid".parse::<AlertKind>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&AlertKind::Proximity).unwrap(),
            r#""proximity""#
        );
    }
}
