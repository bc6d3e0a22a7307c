//! Scripted sessions against the interactive shell

mod common;

use library_desk::{
    config::{AppConfig, DatabaseConfig, ShellConfig},
    shell::Shell,
    AppState,
};

async fn run_script(state: &AppState, script: &str) -> String {
    let mut shell = Shell::new(state, script.as_bytes(), Vec::new());
    shell.run().await.expect("Shell session failed");
    String::from_utf8(shell.into_output()).expect("Shell output is not UTF-8")
}

#[tokio::test]
async fn test_full_session() {
    let state = common::state().await;

    let script = concat!(
        "1\nDune\nHerbert\n1965\n2\n",
        "6\nAda\nada@example.org\n",
        "11\n1\n1\n",
        "2\n",
        "12\n1\n1\n",
        "13\n",
        "0\n",
    );
    let output = run_script(&state, script).await;

    assert!(output.contains("Book 'Dune' added successfully."));
    assert!(output.contains("Patron 'Ada' added successfully."));
    assert!(output.contains("Book 'Dune' borrowed successfully by Ada."));
    assert!(output.contains("ID: 1, Title: Dune, Author: Herbert, Year: 1965, Copies: 1"));
    assert!(output.contains("Record ID: 1, Book ID: 1, Title: Dune, Borrowed on: "));
    assert!(output.contains("Book returned successfully."));
    assert!(output.contains("Record ID: 1, Book: Dune, Patron: Ada, Borrowed: "));
    assert!(output.trim_end().ends_with("Goodbye!"));

    let book = state.services.catalog.get_book(1).await.unwrap();
    assert_eq!(book.copies, 2);
}

#[tokio::test]
async fn test_errors_are_reported_and_menu_continues() {
    let state = common::state().await;

    let script = concat!(
        "5\n7\n",
        "99\n",
        "3\n\n",
        "1\nDune\nHerbert\n\nmany\n",
        "4\nabc\n",
        "2\n",
    );
    let output = run_script(&state, script).await;

    assert!(output.contains("No books found."));
    assert!(output.contains("Error [5]: Book with id 7 not found"));
    assert!(output.contains("Invalid option, please try again."));
    assert!(output.contains("Error [18]: Empty search keyword"));
    assert!(output.contains("Error [18]: Invalid copies: many"));
    assert!(output.contains("Error [18]: Invalid book ID."));
    // Input ran out without choosing Exit
    assert!(!output.contains("Goodbye!"));

    assert!(state.services.catalog.list_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_blank_fields() {
    let state = common::state().await;
    common::add_book(&state, "Dune", "Herbert", Some(1965), 2).await;

    let output = run_script(&state, "4\n1\n\n\n\n5\n0\n").await;
    assert!(output.contains("Title [Dune]: "));
    assert!(output.contains("Book updated successfully."));

    let book = state.services.catalog.get_book(1).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");
    assert_eq!(book.year, Some(1965));
    assert_eq!(book.copies, 5);
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let state = common::state().await;
    common::add_book(&state, "Dune", "Herbert", None, 1).await;

    let output = run_script(&state, "5\n1\nno\n").await;
    assert!(output.contains("Confirm deletion of book 'Dune'? (yes/no): "));
    assert!(output.contains("Deletion cancelled."));
    assert_eq!(state.services.catalog.list_books().await.unwrap().len(), 1);

    let output = run_script(&state, "5\n1\nYES\n").await;
    assert!(output.contains("Book deleted successfully."));
    assert!(state.services.catalog.list_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_without_confirmation_when_disabled() {
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        shell: ShellConfig {
            confirm_deletes: false,
        },
        ..Default::default()
    };
    let state = AppState::connect(config).await.unwrap();
    common::add_patron(&state, "Ada", "ada@example.org").await;

    let output = run_script(&state, "10\n1\n0\n").await;
    assert!(!output.contains("Confirm deletion"));
    assert!(output.contains("Patron deleted successfully."));
    assert!(state.services.patrons.list_patrons().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_return_rejects_foreign_record() {
    let state = common::state().await;
    let book = common::add_book(&state, "Dune", "Herbert", None, 2).await;
    let ada = common::add_patron(&state, "Ada", "ada@example.org").await;
    let grace = common::add_patron(&state, "Grace", "grace@example.org").await;
    state.services.circulation.borrow(ada.id, book.id).await.unwrap();
    let graces = state.services.circulation.borrow(grace.id, book.id).await.unwrap();

    // Ada tries to return Grace's record
    let script = format!("12\n{}\n{}\n0\n", ada.id, graces.id);
    let output = run_script(&state, &script).await;
    assert!(output.contains("Invalid Record ID."));
    assert!(state.services.circulation.get_record(graces.id).await.unwrap().is_outstanding());

    let output = run_script(&state, &format!("12\n{}\n", grace.id)).await;
    assert!(output.contains("Borrowed Books:"));

    let output = run_script(&state, "12\n3\n").await;
    assert!(output.contains("Error [5]: Patron with id 3 not found"));
}

#[tokio::test]
async fn test_patron_conflict_message() {
    let state = common::state().await;
    common::add_patron(&state, "Ada", "ada@example.org").await;

    let output = run_script(&state, "6\nImpostor\nada@example.org\n8\nada\n").await;
    assert!(output.contains("Error [8]: A patron with this email already exists"));
    assert!(output.contains("Search Results for 'ada':"));
    assert!(output.contains("ID: 1, Name: Ada, Email: ada@example.org"));
}

#[tokio::test]
async fn test_update_prompt_for_book_without_year() {
    let state = common::state().await;
    common::add_book(&state, "Dune", "Herbert", None, 1).await;

    let output = run_script(&state, "4\n1\n\n\n\n\n0\n").await;
    assert!(output.contains("Year [N/A]: "));
    assert!(output.contains("Book updated successfully."));
    assert_eq!(state.services.catalog.get_book(1).await.unwrap().year, None);
}

#[tokio::test]
async fn test_unavailable_error_shows_code() {
    let state = common::state().await;
    common::add_book(&state, "Dune", "Herbert", None, 0).await;
    common::add_patron(&state, "Ada", "ada@example.org").await;

    let output = run_script(&state, "11\n1\n1\n0\n").await;
    assert!(output.contains("Error [7]: All copies of 'Dune' are currently borrowed"));
}
