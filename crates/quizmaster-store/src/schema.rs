//! Store database schema.

/// SQL to create the bucket and entry tables.
///
/// Only tables are created here; buckets are rows of `buckets` and come into
/// existence through a write transaction.
pub const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS buckets (
    name TEXT PRIMARY KEY NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    bucket TEXT NOT NULL REFERENCES buckets (name),
    key    BLOB NOT NULL,
    value  BLOB NOT NULL,
    PRIMARY KEY (bucket, key)
);
";
