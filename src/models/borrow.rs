//! Borrow ledger model and related types

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Borrow record from database.
///
/// `book_id` and `patron_id` become `None` when the referenced row is
/// deleted after the record was closed.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: Option<i64>,
    pub patron_id: Option<i64>,
    pub borrow_date: DateTime<Utc>,
    /// `None` while the book is still out
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrow record joined with book title and patron name for display
#[derive(Debug, Clone, FromRow)]
pub struct BorrowDetails {
    pub id: i64,
    pub book_id: Option<i64>,
    pub patron_id: Option<i64>,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub book_title: Option<String>,
    pub patron_name: Option<String>,
}

impl BorrowDetails {
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}
