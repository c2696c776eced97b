//! Audit block - who created/updated a row and when

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Actor recorded when the caller does not name one
pub const SYSTEM_ACTOR: &str = "SYSTEM";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, FromRow)]
pub struct Audit {
    pub created_by: Option<String>,
    // both timestamps are written by the database, never by the caller
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Audit block for a row created and last touched by `actor`
    pub fn by(actor: impl Into<String>) -> Self {
        let actor = actor.into();
        Self {
            created_by: Some(actor.clone()),
            updated_by: Some(actor),
            ..Self::default()
        }
    }

    pub fn creator(&self) -> String {
        self.created_by
            .clone()
            .unwrap_or_else(|| SYSTEM_ACTOR.to_string())
    }

    /// Falls back to the creator, then to [`SYSTEM_ACTOR`]
    pub fn updater(&self) -> String {
        self.updated_by
            .clone()
            .or_else(|| self.created_by.clone())
            .unwrap_or_else(|| SYSTEM_ACTOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_actors_default_to_system() {
        let audit = Audit::default();
        assert_eq!(audit.creator(), "SYSTEM");
        assert_eq!(audit.updater(), "SYSTEM");
    }

    #[test]
    fn updater_falls_back_to_creator() {
        let audit = Audit {
            created_by: Some("loader".to_string()),
            ..Audit::default()
        };
        assert_eq!(audit.updater(), "loader");
    }
}
