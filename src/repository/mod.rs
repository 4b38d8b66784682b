//! Repository layer over the in-memory book collection

pub mod books;

/// Main repository struct holding the process-owned collections
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository backed by an empty collection
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
