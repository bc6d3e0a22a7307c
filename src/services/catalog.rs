//! Catalog management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

use super::require_keyword;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List every book in the order they were added
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Case-insensitive search on title and author
    pub async fn search_books(&self, keyword: &str) -> AppResult<Vec<Book>> {
        let keyword = require_keyword(keyword)?;
        tracing::debug!("Searching books for '{}'", keyword);
        self.repository.books.search(keyword).await
    }

    /// Add a book to the catalog
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let created = self.repository.books.create(&book).await?;
        tracing::info!(
            "Catalog create: book id={} '{}' ({} copies)",
            created.id, created.title, created.copies
        );
        Ok(created)
    }

    /// Update an existing book, keeping fields not present in the request
    pub async fn update_book(&self, id: i64, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;

        let updated = self.repository.books.update(id, &book).await?;
        tracing::info!("Catalog update: book id={}", id);
        Ok(updated)
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }
}
