use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// A single catalog entry, keyed by its isbn
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Replacement values for every book field except isbn, which is immutable
pub struct BookUpdate {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetAllBooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct DeleteBookResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Envelope returned for every failed request
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ErrorBody {
    pub message: ErrorMessage,
    pub status: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
/// Either a single description or the full list of schema violations
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ErrorResponse {
    pub fn single(message: impl Into<String>, status: u16) -> Self {
        Self {
            error: ErrorBody {
                message: ErrorMessage::Single(message.into()),
                status,
            },
        }
    }

    pub fn violations(violations: Vec<String>, status: u16) -> Self {
        Self {
            error: ErrorBody {
                message: ErrorMessage::Many(violations),
                status,
            },
        }
    }
}
