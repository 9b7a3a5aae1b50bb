/// All catalog identifiers are v4 UUIDs.
pub type UnitId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
