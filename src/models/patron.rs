//! Patron model and related types

use sqlx::FromRow;
use validator::Validate;

/// Patron record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Patron {
    pub id: i64,
    pub name: String,
    /// Unique across patrons, compared as stored (case-sensitive)
    pub email: String,
}

/// Create patron request
#[derive(Debug, Clone, Validate)]
pub struct CreatePatron {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Update patron request. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdatePatron {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: Option<String>,
}

impl UpdatePatron {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_patron_validation() {
        let patron = CreatePatron {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
        };
        assert!(patron.validate().is_ok());

        // Any non-empty email is accepted, only uniqueness is enforced
        let patron = CreatePatron {
            name: "Ada".to_string(),
            email: "x".to_string(),
        };
        assert!(patron.validate().is_ok());

        let patron = CreatePatron {
            name: "Ada".to_string(),
            email: String::new(),
        };
        assert!(patron.validate().is_err());

        let patron = CreatePatron {
            name: String::new(),
            email: "ada@example.org".to_string(),
        };
        assert!(patron.validate().is_err());
    }
}
