//! Patron management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, UpdatePatron},
    repository::Repository,
};

use super::require_keyword;

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
}

impl PatronsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get patron by ID
    pub async fn get_patron(&self, id: i64) -> AppResult<Patron> {
        self.repository.patrons.get_by_id(id).await
    }

    pub async fn list_patrons(&self) -> AppResult<Vec<Patron>> {
        self.repository.patrons.list().await
    }

    /// Case-insensitive search on name and email
    pub async fn search_patrons(&self, keyword: &str) -> AppResult<Vec<Patron>> {
        let keyword = require_keyword(keyword)?;
        self.repository.patrons.search(keyword).await
    }

    /// Register a new patron
    pub async fn create_patron(&self, patron: CreatePatron) -> AppResult<Patron> {
        patron.validate()?;

        if self.repository.patrons.email_exists(&patron.email, None).await? {
            return Err(AppError::Conflict(
                "A patron with this email already exists".to_string(),
            ));
        }

        let created = self.repository.patrons.create(&patron).await?;
        tracing::info!("Patron create: id={} '{}'", created.id, created.name);
        Ok(created)
    }

    /// Update an existing patron
    pub async fn update_patron(&self, id: i64, patron: UpdatePatron) -> AppResult<Patron> {
        patron.validate()?;

        // Check if patron exists
        self.repository.patrons.get_by_id(id).await?;

        // Email must stay unique across patrons
        if let Some(ref email) = patron.email {
            if self.repository.patrons.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(
                    "A patron with this email already exists".to_string(),
                ));
            }
        }

        let updated = self.repository.patrons.update(id, &patron).await?;
        tracing::info!("Patron update: id={}", id);
        Ok(updated)
    }

    /// Delete a patron
    pub async fn delete_patron(&self, id: i64) -> AppResult<()> {
        self.repository.patrons.delete(id).await?;
        tracing::info!("Patron delete: id={}", id);
        Ok(())
    }
}
