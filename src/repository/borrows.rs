//! Borrow ledger repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowDetails, BorrowRecord},
};

const RECORD_COLUMNS: &str = "id, book_id, patron_id, borrow_date, return_date";

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(&format!(
            "SELECT {} FROM borrow_records WHERE id = ?",
            RECORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Number of copies of a book currently out
    pub async fn count_outstanding_for_book(&self, book_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Lend one copy of `book_id` to `patron_id`.
    ///
    /// The new record and the copies decrement are committed together.
    pub async fn create(&self, book_id: i64, patron_id: i64) -> AppResult<BorrowRecord> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let (title, copies): (String, i32) =
            sqlx::query_as("SELECT title, copies FROM books WHERE id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        // `copies` is the live shelf count, outstanding loans are already taken out of it.
        if copies <= 0 {
            return Err(AppError::Unavailable(format!(
                "All copies of '{}' are currently borrowed",
                title
            )));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(&format!(
            r#"
            INSERT INTO borrow_records (book_id, patron_id, borrow_date, return_date)
            VALUES (?, ?, ?, NULL)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(book_id)
        .bind(patron_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET copies = copies - 1 WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Close an outstanding record and put its copy back on the shelf
    pub async fn return_record(&self, id: i64) -> AppResult<BorrowRecord> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, BorrowRecord>(&format!(
            "SELECT {} FROM borrow_records WHERE id = ?",
            RECORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))?;

        if !record.is_outstanding() {
            return Err(AppError::NotFound(format!(
                "Borrow record {} has already been returned",
                id
            )));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(&format!(
            "UPDATE borrow_records SET return_date = ? WHERE id = ? AND return_date IS NULL RETURNING {}",
            RECORD_COLUMNS
        ))
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(book_id) = record.book_id {
            sqlx::query("UPDATE books SET copies = copies + 1 WHERE id = ?")
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(record)
    }

    /// Outstanding records for a patron, oldest first
    pub async fn list_outstanding_for_patron(&self, patron_id: i64) -> AppResult<Vec<BorrowDetails>> {
        let records = sqlx::query_as::<_, BorrowDetails>(
            r#"
            SELECT br.id, br.book_id, br.patron_id, br.borrow_date, br.return_date,
                   b.title AS book_title, p.name AS patron_name
            FROM borrow_records br
            LEFT JOIN books b ON br.book_id = b.id
            LEFT JOIN patrons p ON br.patron_id = p.id
            WHERE br.patron_id = ? AND br.return_date IS NULL
            ORDER BY br.borrow_date, br.id
            "#,
        )
        .bind(patron_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Whole ledger: outstanding records first, newest borrow first within each group
    pub async fn list_all(&self) -> AppResult<Vec<BorrowDetails>> {
        let records = sqlx::query_as::<_, BorrowDetails>(
            r#"
            SELECT br.id, br.book_id, br.patron_id, br.borrow_date, br.return_date,
                   b.title AS book_title, p.name AS patron_name
            FROM borrow_records br
            LEFT JOIN books b ON br.book_id = b.id
            LEFT JOIN patrons p ON br.patron_id = p.id
            ORDER BY br.return_date IS NOT NULL, br.borrow_date DESC, br.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
