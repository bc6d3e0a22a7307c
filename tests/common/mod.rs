//! Shared helpers for integration tests

#![allow(dead_code)]

use library_desk::{
    config::{AppConfig, DatabaseConfig},
    models::{Book, CreateBook, CreatePatron, Patron},
    AppState,
};

/// Fresh state over a private in-memory store
pub async fn state() -> AppState {
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..Default::default()
    };
    AppState::connect(config)
        .await
        .expect("Failed to open in-memory store")
}

pub async fn add_book(state: &AppState, title: &str, author: &str, year: Option<i32>, copies: i32) -> Book {
    state
        .services
        .catalog
        .create_book(CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            year,
            copies,
        })
        .await
        .expect("Failed to create book")
}

pub async fn add_patron(state: &AppState, name: &str, email: &str) -> Patron {
    state
        .services
        .patrons
        .create_patron(CreatePatron {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
        .expect("Failed to create patron")
}
