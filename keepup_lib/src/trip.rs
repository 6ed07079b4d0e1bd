use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Created,
    Active,
    Ended,
    #[serde(other)]
    Unknown,
}

/// Visual tier of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    Active,
    Created,
    Other,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Created => "created",
            TripStatus::Active => "active",
            TripStatus::Ended => "ended",
            TripStatus::Unknown => "unknown",
        }
    }

    pub fn tier(&self) -> StatusTier {
        match self {
            TripStatus::Active => StatusTier::Active,
            TripStatus::Created => StatusTier::Created,
            TripStatus::Ended | TripStatus::Unknown => StatusTier::Other,
        }
    }
}

impl StatusTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTier::Active => "status-active",
            StatusTier::Created => "status-created",
            StatusTier::Other => "status-other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub creator_id: i64,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Only a freshly created trip can be started. The backend has the final say.
    pub fn can_start(&self) -> bool {
        self.status == TripStatus::Created
    }

    pub fn can_end(&self) -> bool {
        self.status == TripStatus::Active
    }

    pub fn created_date(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trip_with_status;

    #[test]
    fn unknown_status_does_not_break_decoding() {
        let json = r#"{
            "id": 3,
            "name": "Alps",
            "description": "",
            "creator_id": 1,
            "status": "archived",
            "created_at": "2025-05-22T12:09:14Z",
            "updated_at": "2025-05-22T12:09:14Z"
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.status, TripStatus::Unknown);
        assert_eq!(trip.status.tier(), StatusTier::Other);
        assert_eq!(trip.created_date(), "22/05/2025");
    }

    #[test]
    fn transitions_follow_status() {
        assert!(trip_with_status(1, TripStatus::Created).can_start());
        assert!(!trip_with_status(1, TripStatus::Created).can_end());
        assert!(trip_with_status(1, TripStatus::Active).can_end());
        assert!(!trip_with_status(1, TripStatus::Active).can_start());
        assert!(!trip_with_status(1, TripStatus::Ended).can_start());
        assert!(!trip_with_status(1, TripStatus::Ended).can_end());
    }

    #[test]
    fn badge_tiers() {
        assert_eq!(TripStatus::Active.tier(), StatusTier::Active);
        assert_eq!(TripStatus::Created.tier(), StatusTier::Created);
        assert_eq!(TripStatus::Ended.tier(), StatusTier::Other);
    }
}
