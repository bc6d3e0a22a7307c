//! Circulation service: borrowing and returning books

use crate::{
    error::AppResult,
    models::borrow::{BorrowDetails, BorrowRecord},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a borrow record by ID
    pub async fn get_record(&self, id: i64) -> AppResult<BorrowRecord> {
        self.repository.borrows.get_by_id(id).await
    }

    /// Lend one copy of a book to a patron
    pub async fn borrow(&self, patron_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        // Verify patron exists
        let patron = self.repository.patrons.get_by_id(patron_id).await?;

        let record = self.repository.borrows.create(book_id, patron_id).await?;
        tracing::info!(
            "Borrow: record id={} book id={} patron id={} ({})",
            record.id, book_id, patron_id, patron.name
        );
        Ok(record)
    }

    /// Return a borrowed book. A record can only be returned once.
    pub async fn return_book(&self, record_id: i64) -> AppResult<BorrowRecord> {
        let record = self.repository.borrows.return_record(record_id).await?;
        tracing::info!("Return: record id={} book id={:?}", record.id, record.book_id);
        Ok(record)
    }

    /// Books a patron currently holds
    pub async fn list_outstanding(&self, patron_id: i64) -> AppResult<Vec<BorrowDetails>> {
        // Verify patron exists
        self.repository.patrons.get_by_id(patron_id).await?;
        self.repository.borrows.list_outstanding_for_patron(patron_id).await
    }

    /// The whole ledger, outstanding records first
    pub async fn list_all(&self) -> AppResult<Vec<BorrowDetails>> {
        self.repository.borrows.list_all().await
    }

    /// Copies of a book currently out
    pub async fn count_outstanding(&self, book_id: i64) -> AppResult<i64> {
        self.repository.borrows.count_outstanding_for_book(book_id).await
    }
}
