//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod patrons;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronsService,
    pub circulation: circulation::CirculationService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository),
        }
    }
}

/// Reject blank search terms before they reach the store
pub(crate) fn require_keyword(keyword: &str) -> crate::error::AppResult<&str> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(crate::error::AppError::Validation(
            "Empty search keyword".to_string(),
        ));
    }
    Ok(keyword)
}
