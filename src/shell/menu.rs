//! Main menu entries

use std::str::FromStr;

pub const MENU: &str = r#"
Library Management System
=========================
1. Add Book
2. List Books
3. Search Books
4. Update Book
5. Delete Book

6. Add Patron
7. List Patrons
8. Search Patrons
9. Update Patron
10. Delete Patron

11. Borrow Book
12. Return Book
13. View Borrow Records

0. Exit
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ListBooks,
    SearchBooks,
    UpdateBook,
    DeleteBook,
    AddPatron,
    ListPatrons,
    SearchPatrons,
    UpdatePatron,
    DeletePatron,
    BorrowBook,
    ReturnBook,
    ViewBorrowRecords,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddBook),
            "2" => Ok(MenuChoice::ListBooks),
            "3" => Ok(MenuChoice::SearchBooks),
            "4" => Ok(MenuChoice::UpdateBook),
            "5" => Ok(MenuChoice::DeleteBook),
            "6" => Ok(MenuChoice::AddPatron),
            "7" => Ok(MenuChoice::ListPatrons),
            "8" => Ok(MenuChoice::SearchPatrons),
            "9" => Ok(MenuChoice::UpdatePatron),
            "10" => Ok(MenuChoice::DeletePatron),
            "11" => Ok(MenuChoice::BorrowBook),
            "12" => Ok(MenuChoice::ReturnBook),
            "13" => Ok(MenuChoice::ViewBorrowRecords),
            "0" => Ok(MenuChoice::Exit),
            other => Err(format!("Invalid menu option: {}", other)),
        }
    }
}
