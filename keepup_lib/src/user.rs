use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the signed in user. The backend owns the real record, this is
/// only kept around for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
