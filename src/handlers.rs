use std::sync::Arc;

use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::web::Data;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    Book, BookResponse, BookUpdate, DeleteBookResponse, ErrorResponse, GetAllBooksResponse,
};
use crate::books_repository::{BooksRepository, BooksRepositoryError};
use crate::validation;

fn bad_request(violations: Vec<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::violations(violations, 400))
}

fn not_found(err: &BooksRepositoryError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::single(err.to_string(), 404))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::single("Internal server error", 500))
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_all_books(
    books_repository: Data<Arc<dyn BooksRepository + Send + Sync>>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.find_all().await {
        Ok(books) => HttpResponse::Ok().json(GetAllBooksResponse { books }),
        Err(err) => {
            tracing::error!("Get all books failed {}", err);
            internal_error()
        }
    })
}

#[api_v2_operation]
pub async fn get_book(
    books_repository: Data<Arc<dyn BooksRepository + Send + Sync>>,
    isbn: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.find_one(&isbn).await {
        Ok(book) => HttpResponse::Ok().json(BookResponse { book }),
        Err(ref err @ BooksRepositoryError::NotFound(_)) => not_found(err),
        Err(err) => {
            tracing::error!("Get book failed {}", err);
            internal_error()
        }
    })
}

#[api_v2_operation]
pub async fn add_book(
    books_repository: Data<Arc<dyn BooksRepository + Send + Sync>>,
    payload: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
    let payload = payload.into_inner();

    let result = validation::validate_create(&payload);
    if !result.valid {
        return Ok(bad_request(result.violations));
    }

    // Validation has pinned down every field, so this only fails on
    // out-of-range integers
    let book: Book = match serde_json::from_value(payload) {
        Ok(book) => book,
        Err(err) => {
            tracing::error!("Add book payload rejected after validation {}", err);
            return Ok(internal_error());
        }
    };

    Ok(match books_repository.create(book).await {
        Ok(book) => HttpResponse::Created().json(BookResponse { book }),
        Err(err) => {
            tracing::error!("Add book failed {}", err);
            internal_error()
        }
    })
}

#[api_v2_operation]
pub async fn update_book(
    books_repository: Data<Arc<dyn BooksRepository + Send + Sync>>,
    isbn: web::Path<String>,
    payload: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
    let payload = payload.into_inner();

    let result = validation::validate_update(&payload);
    if !result.valid {
        return Ok(bad_request(result.violations));
    }

    let update: BookUpdate = match serde_json::from_value(payload) {
        Ok(update) => update,
        Err(err) => {
            tracing::error!("Update book payload rejected after validation {}", err);
            return Ok(internal_error());
        }
    };

    Ok(match books_repository.update(&isbn, update).await {
        Ok(book) => HttpResponse::Ok().json(BookResponse { book }),
        Err(ref err @ BooksRepositoryError::NotFound(_)) => not_found(err),
        Err(err) => {
            tracing::error!("Update book failed {}", err);
            internal_error()
        }
    })
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BooksRepository + Send + Sync>>,
    isbn: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.remove(&isbn).await {
        Ok(()) => HttpResponse::Ok().json(DeleteBookResponse {
            message: "Book deleted".to_string(),
        }),
        Err(ref err @ BooksRepositoryError::NotFound(_)) => not_found(err),
        Err(err) => {
            tracing::error!("Delete book failed {}", err);
            internal_error()
        }
    })
}
