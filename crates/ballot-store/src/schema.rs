//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary poll records, keyed by `poll_id` (ULID).
    pub const POLLS: &str = "polls";

    /// Poll option records, keyed by `option_id`.
    pub const POLL_OPTIONS: &str = "poll_options";

    /// Index: options by poll, keyed by `poll_id || position || option_id`.
    /// Value is empty (index only); iteration order is the supplied order.
    pub const OPTIONS_BY_POLL: &str = "options_by_poll";

    /// Vote records, keyed by `poll_id || voter_id`.
    /// The key layout enforces one vote per voter per poll.
    pub const VOTES: &str = "votes";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::POLLS, cf::POLL_OPTIONS, cf::OPTIONS_BY_POLL, cf::VOTES]
}
