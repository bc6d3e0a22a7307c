//! Patrons repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, UpdatePatron},
};

const DUPLICATE_EMAIL: &str = "A patron with this email already exists";

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Sqlite>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get patron by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Patron> {
        sqlx::query_as::<_, Patron>("SELECT id, name, email FROM patrons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// List all patrons in insertion order
    pub async fn list(&self) -> AppResult<Vec<Patron>> {
        let patrons = sqlx::query_as::<_, Patron>("SELECT id, name, email FROM patrons ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(patrons)
    }

    /// Patrons whose name or email contains `keyword`, ignoring case
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Patron>> {
        let patrons = sqlx::query_as::<_, Patron>(
            r#"
            SELECT id, name, email
            FROM patrons
            WHERE instr(LOWER(name), LOWER(?1)) > 0
               OR instr(LOWER(email), LOWER(?1)) > 0
            ORDER BY id
            "#,
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;

        Ok(patrons)
    }

    /// Check if email already belongs to a patron (other than `exclude_id`)
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patrons WHERE email = ? AND id != ?)")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patrons WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new patron
    pub async fn create(&self, patron: &CreatePatron) -> AppResult<Patron> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO patrons (name, email) VALUES (?, ?) RETURNING id",
        )
        .bind(&patron.name)
        .bind(&patron.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::unique_violation(e, DUPLICATE_EMAIL))?;

        self.get_by_id(id).await
    }

    /// Update the fields present in `patron`
    pub async fn update(&self, id: i64, patron: &UpdatePatron) -> AppResult<Patron> {
        if patron.is_empty() {
            return self.get_by_id(id).await;
        }

        let result = sqlx::query(
            r#"
            UPDATE patrons SET
                name = COALESCE(?, name),
                email = COALESCE(?, email)
            WHERE id = ?
            "#,
        )
        .bind(&patron.name)
        .bind(&patron.email)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::unique_violation(e, DUPLICATE_EMAIL))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Patron with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a patron. Refused while they still hold borrowed books.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let outstanding: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE patron_id = ? AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if outstanding > 0 {
            return Err(AppError::Conflict(format!(
                "Patron still has {} borrowed books",
                outstanding
            )));
        }

        let result = sqlx::query("DELETE FROM patrons WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Patron with id {} not found", id)));
        }

        tx.commit().await?;

        Ok(())
    }
}
