//! Interactive menu shell
//!
//! Reads one choice at a time, collects the fields each action needs and
//! prints the outcome. Every error raised by an action is reported and the
//! menu comes back; only a broken terminal ends the loop early.

pub mod menu;
pub mod render;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    config::ShellConfig,
    error::{AppError, AppResult},
    models::{CreateBook, CreatePatron, UpdateBook, UpdatePatron},
    services::Services,
    AppState,
};

use menu::{MenuChoice, MENU};

pub struct Shell<R, W> {
    services: Services,
    config: ShellConfig,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: &AppState, input: R, output: W) -> Self {
        Self {
            services: state.services.as_ref().clone(),
            config: state.config.shell.clone(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the user exits or input ends
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            self.write(MENU).await?;
            let choice = match self.prompt("Select an option: ").await {
                Ok(choice) => choice,
                Err(e) if is_end_of_input(&e) => break,
                Err(e) => return Err(e),
            };

            let choice = match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    self.say("Goodbye!").await?;
                    break;
                }
                Ok(choice) => choice,
                Err(_) => {
                    self.say("Invalid option, please try again.").await?;
                    continue;
                }
            };

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(e) if is_end_of_input(&e) => break,
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => {
                    tracing::debug!("Menu action {:?} failed: {}", choice, e);
                    self.say(&format!("Error [{}]: {}", e.code() as u32, e.user_message()))
                        .await?;
                }
            }
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> AppResult<()> {
        match choice {
            MenuChoice::AddBook => self.add_book().await,
            MenuChoice::ListBooks => self.list_books().await,
            MenuChoice::SearchBooks => self.search_books().await,
            MenuChoice::UpdateBook => self.update_book().await,
            MenuChoice::DeleteBook => self.delete_book().await,
            MenuChoice::AddPatron => self.add_patron().await,
            MenuChoice::ListPatrons => self.list_patrons().await,
            MenuChoice::SearchPatrons => self.search_patrons().await,
            MenuChoice::UpdatePatron => self.update_patron().await,
            MenuChoice::DeletePatron => self.delete_patron().await,
            MenuChoice::BorrowBook => self.borrow_book().await,
            MenuChoice::ReturnBook => self.return_book().await,
            MenuChoice::ViewBorrowRecords => self.view_borrow_records().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    // Books

    async fn add_book(&mut self) -> AppResult<()> {
        let title = self.prompt("Enter book title: ").await?;
        let author = self.prompt("Enter author name: ").await?;
        let year = self.prompt("Enter publication year (optional): ").await?;
        let copies = self.prompt("Enter number of copies: ").await?;

        let book = CreateBook {
            title,
            author,
            year: parse_optional(&year, "year")?,
            copies: parse_optional(&copies, "copies")?.ok_or_else(|| {
                AppError::Validation("Number of copies is required".to_string())
            })?,
        };

        let book = self.services.catalog.create_book(book).await?;
        self.say(&format!("Book '{}' added successfully.", book.title)).await
    }

    async fn list_books(&mut self) -> AppResult<()> {
        let books = self.services.catalog.list_books().await?;
        if books.is_empty() {
            return self.say("No books found.").await;
        }

        self.say("\nBooks in Library:").await?;
        self.say(&render::rule(60)).await?;
        for book in &books {
            self.say(&render::book_line(book)).await?;
        }
        Ok(())
    }

    async fn search_books(&mut self) -> AppResult<()> {
        let keyword = self
            .prompt("Enter book title or author keyword to search: ")
            .await?;
        let books = self.services.catalog.search_books(&keyword).await?;
        if books.is_empty() {
            return self.say("No matching books found.").await;
        }

        self.say(&format!("\nSearch Results for '{}':", keyword)).await?;
        self.say(&render::rule(60)).await?;
        for book in &books {
            self.say(&render::book_line(book)).await?;
        }
        Ok(())
    }

    async fn update_book(&mut self) -> AppResult<()> {
        self.list_books().await?;
        let id = self.prompt_id("Enter the ID of the book to update: ", "book").await?;
        let book = self.services.catalog.get_book(id).await?;

        self.say("Enter new values (leave blank to keep current):").await?;
        let title = self.prompt(&format!("Title [{}]: ", book.title)).await?;
        let author = self.prompt(&format!("Author [{}]: ", book.author)).await?;
        let year = self
            .prompt(&format!(
                "Year [{}]: ",
                book.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())
            ))
            .await?;
        let copies = self.prompt(&format!("Copies [{}]: ", book.copies)).await?;

        let update = UpdateBook {
            title: non_blank(title),
            author: non_blank(author),
            year: parse_optional(&year, "year")?,
            copies: parse_optional(&copies, "copies")?,
        };

        self.services.catalog.update_book(id, update).await?;
        self.say("Book updated successfully.").await
    }

    async fn delete_book(&mut self) -> AppResult<()> {
        self.list_books().await?;
        let id = self.prompt_id("Enter the ID of the book to delete: ", "book").await?;
        let book = self.services.catalog.get_book(id).await?;

        if !self
            .confirm(&format!("Confirm deletion of book '{}'? (yes/no): ", book.title))
            .await?
        {
            return self.say("Deletion cancelled.").await;
        }

        self.services.catalog.delete_book(id).await?;
        self.say("Book deleted successfully.").await
    }

    // Patrons

    async fn add_patron(&mut self) -> AppResult<()> {
        let name = self.prompt("Enter patron name: ").await?;
        let email = self.prompt("Enter patron email: ").await?;

        let patron = self
            .services
            .patrons
            .create_patron(CreatePatron { name, email })
            .await?;
        self.say(&format!("Patron '{}' added successfully.", patron.name)).await
    }

    async fn list_patrons(&mut self) -> AppResult<()> {
        let patrons = self.services.patrons.list_patrons().await?;
        if patrons.is_empty() {
            return self.say("No patrons found.").await;
        }

        self.say("\nPatrons:").await?;
        self.say(&render::rule(60)).await?;
        for patron in &patrons {
            self.say(&render::patron_line(patron)).await?;
        }
        Ok(())
    }

    async fn search_patrons(&mut self) -> AppResult<()> {
        let keyword = self
            .prompt("Enter patron name or email keyword to search: ")
            .await?;
        let patrons = self.services.patrons.search_patrons(&keyword).await?;
        if patrons.is_empty() {
            return self.say("No matching patrons found.").await;
        }

        self.say(&format!("\nSearch Results for '{}':", keyword)).await?;
        self.say(&render::rule(60)).await?;
        for patron in &patrons {
            self.say(&render::patron_line(patron)).await?;
        }
        Ok(())
    }

    async fn update_patron(&mut self) -> AppResult<()> {
        self.list_patrons().await?;
        let id = self
            .prompt_id("Enter the ID of the patron to update: ", "patron")
            .await?;
        let patron = self.services.patrons.get_patron(id).await?;

        self.say("Enter new values (leave blank to keep current):").await?;
        let name = self.prompt(&format!("Name [{}]: ", patron.name)).await?;
        let email = self.prompt(&format!("Email [{}]: ", patron.email)).await?;

        let update = UpdatePatron {
            name: non_blank(name),
            email: non_blank(email),
        };

        self.services.patrons.update_patron(id, update).await?;
        self.say("Patron updated successfully.").await
    }

    async fn delete_patron(&mut self) -> AppResult<()> {
        self.list_patrons().await?;
        let id = self
            .prompt_id("Enter the ID of the patron to delete: ", "patron")
            .await?;
        let patron = self.services.patrons.get_patron(id).await?;

        if !self
            .confirm(&format!("Confirm deletion of patron '{}'? (yes/no): ", patron.name))
            .await?
        {
            return self.say("Deletion cancelled.").await;
        }

        self.services.patrons.delete_patron(id).await?;
        self.say("Patron deleted successfully.").await
    }

    // Circulation

    async fn borrow_book(&mut self) -> AppResult<()> {
        self.list_patrons().await?;
        let patron_id = self
            .prompt_id("Enter patron ID who is borrowing: ", "patron")
            .await?;
        self.list_books().await?;
        let book_id = self.prompt_id("Enter book ID to borrow: ", "book").await?;

        self.services.circulation.borrow(patron_id, book_id).await?;

        let book = self.services.catalog.get_book(book_id).await?;
        let patron = self.services.patrons.get_patron(patron_id).await?;
        self.say(&format!(
            "Book '{}' borrowed successfully by {}.",
            book.title, patron.name
        ))
        .await
    }

    async fn return_book(&mut self) -> AppResult<()> {
        self.list_patrons().await?;
        let patron_id = self
            .prompt_id("Enter patron ID who is returning: ", "patron")
            .await?;

        let borrowed = self.services.circulation.list_outstanding(patron_id).await?;
        if borrowed.is_empty() {
            return self.say("No borrowed books found for this patron.").await;
        }

        self.say("\nBorrowed Books:").await?;
        self.say(&render::rule(60)).await?;
        for record in &borrowed {
            self.say(&render::outstanding_line(record)).await?;
        }

        let record_id = self
            .prompt("Enter the Record ID of the book to return: ")
            .await?;
        let record_id = match record_id.parse::<i64>() {
            Ok(id) if borrowed.iter().any(|r| r.id == id) => id,
            _ => return self.say("Invalid Record ID.").await,
        };

        self.services.circulation.return_book(record_id).await?;
        self.say("Book returned successfully.").await
    }

    async fn view_borrow_records(&mut self) -> AppResult<()> {
        let records = self.services.circulation.list_all().await?;
        if records.is_empty() {
            return self.say("No borrow records found.").await;
        }

        self.say("\nBorrow Records:").await?;
        self.say(&render::rule(80)).await?;
        for record in &records {
            self.say(&render::ledger_line(record)).await?;
        }
        Ok(())
    }

    // Terminal I/O

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.output.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn say(&mut self, line: &str) -> AppResult<()> {
        self.write(line).await?;
        self.write("\n").await
    }

    /// Print `label`, read one line and return it trimmed
    async fn prompt(&mut self, label: &str) -> AppResult<String> {
        self.write(label).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(AppError::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(line.trim().to_string())
    }

    async fn prompt_id(&mut self, label: &str, what: &str) -> AppResult<i64> {
        let value = self.prompt(label).await?;
        value
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("Invalid {} ID.", what)))
    }

    async fn confirm(&mut self, label: &str) -> AppResult<bool> {
        if !self.config.confirm_deletes {
            return Ok(true);
        }
        let answer = self.prompt(label).await?;
        Ok(answer.to_lowercase() == "yes")
    }
}

fn is_end_of_input(e: &AppError) -> bool {
    matches!(e, AppError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof)
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Blank input means "not given"; anything else has to be a number
fn parse_optional(value: &str, field: &str) -> AppResult<Option<i32>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("Invalid {}: {}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional("", "year").unwrap(), None);
        assert_eq!(parse_optional("1965", "year").unwrap(), Some(1965));
        assert!(matches!(
            parse_optional("soon", "year"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(String::new()), None);
        assert_eq!(non_blank("Dune".to_string()), Some("Dune".to_string()));
    }
}
