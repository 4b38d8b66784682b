//! In-memory book collection

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::book::{Book, BookFilter, BookShort};

/// Ordered book collection, insertion order preserved
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// List books matching the filter, projected, in collection order
    pub async fn list(&self, filter: Option<&BookFilter>) -> Vec<BookShort> {
        let books = self.books.read().await;
        books
            .iter()
            .filter(|book| filter.map_or(true, |f| f.matches(book)))
            .map(BookShort::from)
            .collect()
    }

    /// Get a full record by exact id
    pub async fn get_by_id(&self, id: &str) -> Option<Book> {
        let books = self.books.read().await;
        books.iter().find(|book| book.id == id).cloned()
    }

    /// Build and append a book while holding the write lock, so records
    /// are appended in the order they were stamped.
    ///
    /// Returns the new id, or `Err` with the rejected id when it is already
    /// taken; the collection is then untouched.
    pub async fn insert_with<F>(&self, build: F) -> Result<String, String>
    where
        F: FnOnce() -> Book,
    {
        let mut books = self.books.write().await;
        let book = build();
        if books.iter().any(|existing| existing.id == book.id) {
            return Err(book.id);
        }
        let id = book.id.clone();
        books.push(book);
        Ok(id)
    }

    /// Modify a book in place. Returns `false` if the id is unknown.
    pub async fn update<F>(&self, id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Book),
    {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                apply(book);
                true
            }
            None => false,
        }
    }

    /// Remove a book, preserving the order of the rest
    pub async fn delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(idx) => {
                books.remove(idx);
                true
            }
            None => false,
        }
    }
}
