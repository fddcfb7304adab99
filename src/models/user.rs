use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub tenant: String,
    pub name: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: String,
}
