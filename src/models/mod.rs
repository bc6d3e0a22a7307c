//! Data models for the library desk

pub mod book;
pub mod borrow;
pub mod patron;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use borrow::{BorrowDetails, BorrowRecord};
pub use patron::{CreatePatron, Patron, UpdatePatron};
