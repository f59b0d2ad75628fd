use chrono::{DateTime, Utc};

/// A row in the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
