//! Book model and related types

use sqlx::FromRow;
use validator::Validate;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: Option<i32>,
    /// Copies currently on the shelf; goes down on borrow, up on return
    pub copies: i32,
}

/// Create book request
#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub year: Option<i32>,
    #[validate(range(min = 0, message = "Copies must be a non-negative number"))]
    pub copies: i32,
}

/// Update book request. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub year: Option<i32>,
    #[validate(range(min = 0, message = "Copies must be a non-negative number"))]
    pub copies: Option<i32>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none() && self.copies.is_none()
    }
}
