//! Request-scoped MySQL access to the `posts` table
//!
//! The connection lives for exactly one request: acquired up front,
//! used for the count query and the page query, and released when the
//! store is dropped. There is no pooling and no reuse across
//! requests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, OptsBuilder, Params, Row, Value};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::model::Post;

/// The optional search predicate shared by the count and page
/// queries.
///
/// The search term is always carried as a bound `%term%` pattern and
/// never interpolated into SQL text. An empty or absent term produces
/// no WHERE clause at all.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    pattern: Option<String>,
    case_insensitive: bool,
}

impl SearchFilter {
    /// Build a filter from a normalized search term.
    ///
    /// With `case_insensitive` unset, `LIKE` case-sensitivity is left
    /// to the store's column collation; set, both sides are wrapped
    /// in `LOWER()`.
    pub fn new(term: Option<&str>, case_insensitive: bool) -> Self {
        Self {
            pattern: term.map(|t| format!("%{t}%")),
            case_insensitive,
        }
    }

    /// The bound pattern, if a search is active.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// WHERE clause fragment, leading space included. Empty without a
    /// search term.
    pub fn where_clause(&self) -> &'static str {
        match (&self.pattern, self.case_insensitive) {
            (None, _) => "",
            (Some(_), false) => " WHERE title LIKE ? OR content LIKE ?",
            (Some(_), true) => " WHERE LOWER(title) LIKE LOWER(?) OR LOWER(content) LIKE LOWER(?)",
        }
    }

    /// Bound values for [`where_clause`](Self::where_clause), in
    /// placeholder order.
    pub fn values(&self) -> Vec<Value> {
        match &self.pattern {
            Some(p) => vec![Value::from(p.as_str()), Value::from(p.as_str())],
            None => Vec::new(),
        }
    }
}

/// A single MySQL connection scoped to one request.
#[derive(Debug)]
pub struct PostStore {
    conn: Conn,
}

impl PostStore {
    /// Open a connection to the store described by the configuration.
    ///
    /// Any failure here (host unreachable, credentials rejected,
    /// unknown database) maps to [`Error::Connection`] so callers can
    /// branch on it without touching driver error types.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let opts = OptsBuilder::default()
            .ip_or_hostname(config.host.clone())
            .tcp_port(config.port)
            .user(Some(config.user.clone()))
            .pass(Some(config.password.clone()))
            .db_name(Some(config.database.clone()));

        let mut conn = Conn::new(opts)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        // Charset is validated as a bare identifier by AppConfig.
        conn.query_drop(format!("SET NAMES {}", config.charset))
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        debug!(host = %config.host, database = %config.database, "connected to store");
        Ok(Self { conn })
    }

    /// Count posts matching the filter.
    pub async fn count_posts(&mut self, filter: &SearchFilter) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM posts{}", filter.where_clause());
        debug!(sql = %sql, "count query");

        let count: Option<i64> = self.conn.exec_first(&sql, to_params(filter.values())).await?;
        count.ok_or_else(|| Error::RowDecode("COUNT(*) returned no rows".to_string()))
    }

    /// Fetch one page of posts matching the filter, newest first.
    ///
    /// Offset and limit are bound as integer parameters.
    pub async fn fetch_page(
        &mut self,
        filter: &SearchFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT id, title, content, created_at FROM posts{} \
             ORDER BY created_at DESC LIMIT ?, ?",
            filter.where_clause()
        );
        debug!(sql = %sql, offset, limit, "page query");

        let mut values = filter.values();
        values.push(Value::from(offset));
        values.push(Value::from(limit));

        let rows: Vec<Row> = self.conn.exec(&sql, to_params(values)).await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            posts.push(decode_post(row)?);
        }
        Ok(posts)
    }

    /// Gracefully close the connection. Dropping the store also
    /// closes it, but without waiting for the server goodbye.
    pub async fn disconnect(self) -> Result<()> {
        self.conn.disconnect().await?;
        Ok(())
    }
}

fn to_params(values: Vec<Value>) -> Params {
    if values.is_empty() {
        Params::Empty
    } else {
        Params::Positional(values)
    }
}

fn decode_post(mut row: Row) -> Result<Post> {
    Ok(Post {
        id: take_column(&mut row, "id")?,
        title: take_column(&mut row, "title")?,
        content: take_column(&mut row, "content")?,
        created_at: datetime_from_value(take_column(&mut row, "created_at")?)?,
    })
}

fn take_column<T: mysql_async::prelude::FromValue>(row: &mut Row, column: &str) -> Result<T> {
    row.take_opt(column)
        .ok_or_else(|| Error::RowDecode(format!("Column not found: {column}")))?
        .map_err(|e| Error::RowDecode(format!("Column {column}: {e}")))
}

/// Convert a MySQL datetime value to `chrono::NaiveDateTime`.
///
/// The binary protocol delivers `Value::Date`; the text protocol
/// delivers the formatted string as bytes.
fn datetime_from_value(value: Value) -> Result<NaiveDateTime> {
    match value {
        Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                .ok_or_else(|| {
                    Error::RowDecode(format!("invalid date: {year}-{month}-{day}"))
                })?;
            let time = NaiveTime::from_hms_micro_opt(hour as u32, min as u32, sec as u32, micro)
                .ok_or_else(|| {
                    Error::RowDecode(format!("invalid time: {hour}:{min}:{sec}.{micro}"))
                })?;
            Ok(NaiveDateTime::new(date, time))
        }
        Value::Bytes(bytes) => {
            let s = String::from_utf8(bytes)
                .map_err(|e| Error::RowDecode(format!("invalid datetime bytes: {e}")))?;
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                .map_err(|e| Error::RowDecode(format!("invalid datetime {s:?}: {e}")))
        }
        other => Err(Error::RowDecode(format!(
            "expected datetime, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_without_term() {
        let filter = SearchFilter::new(None, false);
        assert_eq!(filter.where_clause(), "");
        assert!(filter.values().is_empty());
        assert!(filter.pattern().is_none());
    }

    #[test]
    fn test_filter_with_term() {
        let filter = SearchFilter::new(Some("hello"), false);
        assert_eq!(
            filter.where_clause(),
            " WHERE title LIKE ? OR content LIKE ?"
        );
        assert_eq!(filter.pattern(), Some("%hello%"));
        assert_eq!(filter.values().len(), 2);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let filter = SearchFilter::new(Some("Rust"), true);
        assert_eq!(
            filter.where_clause(),
            " WHERE LOWER(title) LIKE LOWER(?) OR LOWER(content) LIKE LOWER(?)"
        );
        assert_eq!(filter.pattern(), Some("%Rust%"));
    }

    #[test]
    fn test_filter_term_is_bound_not_interpolated() {
        // A hostile term never reaches the SQL text.
        let filter = SearchFilter::new(Some("'; DROP TABLE posts; --"), false);
        assert_eq!(
            filter.where_clause(),
            " WHERE title LIKE ? OR content LIKE ?"
        );
        assert_eq!(filter.pattern(), Some("%'; DROP TABLE posts; --%"));
    }

    #[test]
    fn test_datetime_from_binary_value() {
        let dt = datetime_from_value(Value::Date(2024, 3, 15, 10, 30, 0, 0)).unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 10:30:00");
    }

    #[test]
    fn test_datetime_from_text_value() {
        let dt = datetime_from_value(Value::Bytes(b"2024-03-15 10:30:00".to_vec())).unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 10:30:00");
    }

    #[test]
    fn test_datetime_rejects_other_values() {
        assert!(datetime_from_value(Value::Int(42)).is_err());
        assert!(datetime_from_value(Value::Date(2024, 0, 0, 0, 0, 0, 0)).is_err());
    }
}
