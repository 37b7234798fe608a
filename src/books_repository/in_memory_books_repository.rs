use std::collections::HashMap;

use crate::api::{Book, BookUpdate};
use crate::books_repository::{BooksRepository, BooksRepositoryError};

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: parking_lot::RwLock<HashMap<String, Book>>,
}

#[async_trait::async_trait]
impl BooksRepository for InMemoryBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, BooksRepositoryError> {
        Ok(self.books.read().values().cloned().collect())
    }

    async fn find_one(&self, isbn: &str) -> Result<Book, BooksRepositoryError> {
        self.books
            .read()
            .get(isbn)
            .cloned()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: Book) -> Result<Book, BooksRepositoryError> {
        let mut locked_books = self.books.write();
        if locked_books.contains_key(&book.isbn) {
            // Mirrors the unique key constraint of the real store
            return Err(BooksRepositoryError::Other(format!(
                "Book {} already exists",
                book.isbn
            )));
        }
        locked_books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, update: BookUpdate) -> Result<Book, BooksRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .get_mut(isbn)
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;
        book.amazon_url = update.amazon_url;
        book.author = update.author;
        book.language = update.language;
        book.pages = update.pages;
        book.publisher = update.publisher;
        book.title = update.title;
        book.year = update.year;
        Ok(book.clone())
    }

    async fn remove(&self, isbn: &str) -> Result<(), BooksRepositoryError> {
        self.books
            .write()
            .remove(isbn)
            .map(|_| ())
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))
    }
}

#[cfg(test)]
mod in_memory_book_repository_tests {
    use crate::api::{Book, BookUpdate};
    use crate::books_repository::{BooksRepository, BooksRepositoryError, InMemoryBookRepository};

    fn book(isbn: &str, title: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            amazon_url: "https://amazon.com/apple".to_string(),
            author: "Apple Man".to_string(),
            language: "English".to_string(),
            pages: 500,
            publisher: "Publishay".to_string(),
            title: title.to_string(),
            year: 1984,
        }
    }

    #[tokio::test]
    /// Tests if create and find_one work correctly
    async fn test_create_book_and_find_it() {
        let repo = InMemoryBookRepository::default();

        let book_not_found = repo.find_one("12345").await;
        assert!(matches!(
            book_not_found,
            Err(BooksRepositoryError::NotFound(..))
        ));

        let book = book("12345", "The Great Fall");
        let created = repo
            .create(book.clone())
            .await
            .expect("Failed to create book");
        assert_eq!(created, book);

        let found = repo.find_one("12345").await.expect("Failed to find book");
        assert_eq!(found, book);
    }

    #[tokio::test]
    async fn test_create_duplicate_isbn_fails() {
        let repo = InMemoryBookRepository::default();

        repo.create(book("12345", "The Great Fall"))
            .await
            .expect("Failed to create book");

        let duplicate = repo.create(book("12345", "The Great Fall Again")).await;
        assert!(matches!(duplicate, Err(BooksRepositoryError::Other(..))));
    }

    #[tokio::test]
    /// Tests if find_all works correctly, including on an empty catalog
    async fn test_create_books_and_list_them() {
        let repo = InMemoryBookRepository::default();

        let list = repo.find_all().await.expect("Failed to list books");
        assert_eq!(list, vec![]);

        let book1 = book("12345", "title1");
        let book2 = book("54321", "title2");

        repo.create(book1.clone())
            .await
            .expect("Failed to create book");
        repo.create(book2.clone())
            .await
            .expect("Failed to create book");

        let mut list = repo.find_all().await.expect("Failed to list books");
        list.sort_by(|a, b| a.isbn.cmp(&b.isbn));

        assert_eq!(list, vec![book1, book2]);
    }

    #[tokio::test]
    /// Tests if update replaces every non-isbn field and keeps the key stable
    async fn test_update_book_replaces_fields() {
        let repo = InMemoryBookRepository::default();

        let update = BookUpdate {
            amazon_url: "http://amazon.com/pinneapple".to_string(),
            author: "Pinneapple Man".to_string(),
            language: "English".to_string(),
            pages: 600,
            publisher: "Fruity".to_string(),
            title: "The Great Update".to_string(),
            year: 1984,
        };

        let not_found = repo.update("12345", update.clone()).await;
        assert!(matches!(not_found, Err(BooksRepositoryError::NotFound(..))));

        repo.create(book("12345", "The Great Fall"))
            .await
            .expect("Failed to create book");

        let updated = repo
            .update("12345", update.clone())
            .await
            .expect("Failed to update book");
        assert_eq!(updated.isbn, "12345");
        assert_eq!(updated.title, "The Great Update");
        assert_eq!(updated.pages, 600);

        let found = repo.find_one("12345").await.expect("Failed to find book");
        assert_eq!(found, updated);
    }

    #[tokio::test]
    /// Tests if remove deletes the row so a later find_one is NotFound
    async fn test_remove_book() {
        let repo = InMemoryBookRepository::default();

        let not_found = repo.remove("12345").await;
        assert!(matches!(not_found, Err(BooksRepositoryError::NotFound(..))));

        repo.create(book("12345", "The Great Fall"))
            .await
            .expect("Failed to create book");

        repo.remove("12345").await.expect("Failed to remove book");

        let found = repo.find_one("12345").await;
        assert!(matches!(found, Err(BooksRepositoryError::NotFound(..))));
    }
}
