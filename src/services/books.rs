//! Bookshelf service: validation and record lifecycle

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookShort},
    repository::Repository,
};

use super::{clock::Clock, ids};

/// Attempts at drawing an unused id before giving up
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    clock: Clock,
    generate_id: fn() -> String,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self::with_id_generator(repository, ids::generate_id)
    }

    pub fn with_id_generator(repository: Repository, generate_id: fn() -> String) -> Self {
        Self {
            repository,
            clock: Clock::new(),
            generate_id,
        }
    }

    /// Add a new book, returning its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        validate(&payload, "Failed to add book")?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let inserted = self
                .repository
                .books
                .insert_with(|| Book::new((self.generate_id)(), payload.clone(), self.clock.now()))
                .await;
            match inserted {
                Ok(id) => {
                    tracing::info!(book_id = %id, "Book added");
                    return Ok(id);
                }
                Err(taken) => {
                    tracing::warn!(book_id = %taken, "Generated book id already in use, drawing again");
                }
            }
        }

        Err(AppError::Internal(format!(
            "no unused book id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// List books. At most one query criterion is applied, see [`BookQuery::filter`].
    pub async fn list(&self, query: &BookQuery) -> Vec<BookShort> {
        let filter = query.filter();
        tracing::debug!(?filter, "Listing books");
        self.repository.books.list(filter.as_ref()).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await.ok_or_else(|| {
            tracing::debug!(book_id = %id, "Book not found");
            AppError::NotFound("Book not found".to_string())
        })
    }

    /// Replace every mutable field of a book
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        validate(&payload, "Failed to update book")?;

        let found = self
            .repository
            .books
            .update(id, |book| book.apply(payload, self.clock.now()))
            .await;

        if !found {
            tracing::debug!(book_id = %id, "Update of unknown book");
            return Err(AppError::NotFound(
                "Failed to update book. Id not found".to_string(),
            ));
        }

        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete(id).await {
            tracing::debug!(book_id = %id, "Delete of unknown book");
            return Err(AppError::NotFound(
                "Failed to delete book. Id not found".to_string(),
            ));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

/// Name first, then page counts
fn validate(payload: &BookPayload, action: &str) -> AppResult<()> {
    if !payload.has_name() {
        return Err(AppError::Validation(format!(
            "{}. Please provide the book name",
            action
        )));
    }
    if payload.read_page_exceeds_page_count() {
        return Err(AppError::Validation(format!(
            "{}. readPage must not be greater than pageCount",
            action
        )));
    }
    Ok(())
}
