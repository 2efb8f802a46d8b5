/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identity carried by a child entity that has not been persisted yet.
pub const UNSET_ID: DbId = 0;
