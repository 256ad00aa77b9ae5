//! Persisted entities read by postlist

use chrono::NaiveDateTime;

/// Database table: `posts`
///
/// Read-only from this system's point of view; `created_at`
/// descending defines the listing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Column: `id` (PRIMARY KEY)
    pub id: i64,
    /// Column: `title`
    pub title: String,
    /// Column: `content`
    pub content: String,
    /// Column: `created_at`
    pub created_at: NaiveDateTime,
}
