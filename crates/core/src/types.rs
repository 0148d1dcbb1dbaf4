/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (issue/due dates, follow-ups) carry no time zone.
pub type Date = chrono::NaiveDate;

/// All currency amounts are fixed-point decimals, stored as NUMERIC(12,2).
pub type Money = rust_decimal::Decimal;
