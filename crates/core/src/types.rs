/// Chat-platform user and chat identifiers are 64-bit integers, as are
/// the BIGSERIAL primary keys in the moderation schema.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
