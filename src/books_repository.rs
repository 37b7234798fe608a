pub use in_memory_books_repository::InMemoryBookRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use crate::api::{Book, BookUpdate};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BooksRepositoryError {
    #[error("Book {0} not found")]
    NotFound(String),

    #[error("Database failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait BooksRepository {
    /// Lists every book in the catalog; an empty catalog yields an empty vec
    async fn find_all(&self) -> Result<Vec<Book>, BooksRepositoryError>;
    /// Retrieves the book with the given isbn
    async fn find_one(&self, isbn: &str) -> Result<Book, BooksRepositoryError>;
    /// Inserts a new book under its caller-supplied isbn, returns the stored row.
    /// A duplicate isbn fails at the store, not as a distinct domain error.
    async fn create(&self, book: Book) -> Result<Book, BooksRepositoryError>;
    /// Replaces all non-isbn fields of the matching book, returns the post-update row
    async fn update(&self, isbn: &str, update: BookUpdate) -> Result<Book, BooksRepositoryError>;
    /// Deletes the book with the given isbn
    async fn remove(&self, isbn: &str) -> Result<(), BooksRepositoryError>;
}
