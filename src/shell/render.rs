//! Text rendering for catalog and ledger records

use chrono::{DateTime, Utc};

use crate::models::{Book, BorrowDetails, Patron};

const MISSING: &str = "(deleted)";

pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn book_line(book: &Book) -> String {
    let year = book
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "ID: {}, Title: {}, Author: {}, Year: {}, Copies: {}",
        book.id, book.title, book.author, year, book.copies
    )
}

pub fn patron_line(patron: &Patron) -> String {
    format!("ID: {}, Name: {}, Email: {}", patron.id, patron.name, patron.email)
}

/// A patron's outstanding record, as listed before a return
pub fn outstanding_line(record: &BorrowDetails) -> String {
    let book_id = record
        .book_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| MISSING.to_string());
    format!(
        "Record ID: {}, Book ID: {}, Title: {}, Borrowed on: {}",
        record.id,
        book_id,
        record.book_title.as_deref().unwrap_or(MISSING),
        timestamp(&record.borrow_date)
    )
}

pub fn ledger_line(record: &BorrowDetails) -> String {
    let returned = record
        .return_date
        .as_ref()
        .map(timestamp)
        .unwrap_or_else(|| "Not Returned".to_string());
    format!(
        "Record ID: {}, Book: {}, Patron: {}, Borrowed: {}, Returned: {}",
        record.id,
        record.book_title.as_deref().unwrap_or(MISSING),
        record.patron_name.as_deref().unwrap_or(MISSING),
        timestamp(&record.borrow_date),
        returned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn details(return_date: Option<DateTime<Utc>>) -> BorrowDetails {
        BorrowDetails {
            id: 3,
            book_id: Some(1),
            patron_id: None,
            borrow_date: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            return_date,
            book_title: Some("Dune".to_string()),
            patron_name: None,
        }
    }

    #[test]
    fn test_book_line_without_year() {
        let book = Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: None,
            copies: 2,
        };
        assert_eq!(
            book_line(&book),
            "ID: 7, Title: Dune, Author: Herbert, Year: N/A, Copies: 2"
        );
    }

    #[test]
    fn test_ledger_line() {
        let line = ledger_line(&details(None));
        assert_eq!(
            line,
            "Record ID: 3, Book: Dune, Patron: (deleted), Borrowed: 2024-03-09 14:05:07, Returned: Not Returned"
        );

        let returned = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
        assert!(ledger_line(&details(Some(returned))).ends_with("Returned: 2024-03-20 09:00:00"));
    }

    #[test]
    fn test_outstanding_line() {
        assert_eq!(
            outstanding_line(&details(None)),
            "Record ID: 3, Book ID: 1, Title: Dune, Borrowed on: 2024-03-09 14:05:07"
        );
    }
}
