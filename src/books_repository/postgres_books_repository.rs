use anyhow::Context;
use tokio_postgres::{Client, NoTls, Row, Statement};

use crate::api::{Book, BookUpdate};
use crate::books_repository::{BooksRepository, BooksRepositoryError};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresBooksRepository {
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Postgres connection_str: {}", connection_str);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS books (
            isbn            TEXT PRIMARY KEY,
            amazon_url      TEXT NOT NULL,
            author          TEXT NOT NULL,
            language        TEXT NOT NULL,
            pages           INTEGER NOT NULL,
            publisher       TEXT NOT NULL,
            title           TEXT NOT NULL,
            year            INTEGER NOT NULL
            )
        ",
            )
            .await
            .context("Failed to setup table")?;
        Ok(Self { client })
    }
}

fn book_from_row(row: &Row) -> Result<Book, BooksRepositoryError> {
    Ok(Book {
        isbn: row.try_get("isbn")?,
        amazon_url: row.try_get("amazon_url")?,
        author: row.try_get("author")?,
        language: row.try_get("language")?,
        pages: row.try_get("pages")?,
        publisher: row.try_get("publisher")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
    })
}

#[async_trait::async_trait]
impl BooksRepository for PostgresBooksRepository {
    async fn find_all(&self) -> Result<Vec<Book>, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {} FROM books", BOOK_COLUMNS))
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter().map(book_from_row).collect()
    }

    async fn find_one(&self, isbn: &str) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "SELECT {} FROM books WHERE isbn = ($1)",
                BOOK_COLUMNS
            ))
            .await?;

        let rows = self.client.query(&stmt, &[&isbn]).await?;

        let row = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;

        book_from_row(row)
    }

    async fn create(&self, book: Book) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "INSERT INTO books ({}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 RETURNING {}",
                BOOK_COLUMNS, BOOK_COLUMNS
            ))
            .await?;

        // A duplicate isbn violates the primary key and comes back as a
        // DatabaseFailure, same as any other store failure
        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &book.isbn,
                    &book.amazon_url,
                    &book.author,
                    &book.language,
                    &book.pages,
                    &book.publisher,
                    &book.title,
                    &book.year,
                ],
            )
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::Other("Inserted row not returned".to_string()))?;

        book_from_row(row)
    }

    async fn update(&self, isbn: &str, update: BookUpdate) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "UPDATE books \
                 SET amazon_url = $1, author = $2, language = $3, pages = $4, \
                     publisher = $5, title = $6, year = $7 \
                 WHERE isbn = ($8) \
                 RETURNING {}",
                BOOK_COLUMNS
            ))
            .await?;

        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &update.amazon_url,
                    &update.author,
                    &update.language,
                    &update.pages,
                    &update.publisher,
                    &update.title,
                    &update.year,
                    &isbn,
                ],
            )
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;

        book_from_row(row)
    }

    async fn remove(&self, isbn: &str) -> Result<(), BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM books WHERE isbn = ($1) RETURNING isbn")
            .await?;

        let rows = self.client.query(&stmt, &[&isbn]).await?;

        if rows.is_empty() {
            return Err(BooksRepositoryError::NotFound(isbn.to_string()));
        }
        Ok(())
    }
}
