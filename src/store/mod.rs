pub mod json;

use crate::{book::Book, errors::StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over persistence backends for the single expense book.
pub trait BookStore: Send + Sync {
    fn save(&self, book: &Book) -> Result<()>;
    fn load(&self) -> Result<Book>;
    fn exists(&self) -> bool;
    fn backup(&self, book: &Book, note: Option<&str>) -> Result<()>;
    fn list_backups(&self) -> Result<Vec<String>>;
    fn restore(&self, backup_name: &str) -> Result<Book>;

    /// Loads the stored book, or starts a fresh one when nothing has been
    /// saved yet. Other failures still surface.
    fn load_or_default(&self) -> Result<Book> {
        match self.load() {
            Ok(book) => Ok(book),
            Err(StoreError::NotInitialized(_)) => Ok(Book::new()),
            Err(err) => Err(err),
        }
    }
}

pub use json::JsonStore;
