//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent the error conditions the backend distinguishes: the two
//! 401 outcomes of token verification, the 403 of role/identity checks,
//! presence-check failures, and store or unexpected failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` so that handler
//! and middleware errors convert into HTTP responses automatically.
//! Authorization failures carry a `{"message": ...}` JSON body; store and
//! internal failures surface as a bare 500 with no structured body, since
//! nothing recovers from them.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Token verification failed (HTTP 401). Carries either the
    /// missing-header message (`unauthorized access`) or the
    /// invalid-token message (`forbidden access`); both status 401.
    Unauthorized(String),
    /// The caller is verified but lacks the required role or is querying
    /// another identity (HTTP 403).
    Forbidden(String),
    /// A malformed request body, e.g. a failed presence check (HTTP 400).
    BadRequest(String),
    /// An error originating from a document-store operation (HTTP 500).
    Store(String),
    /// Any other unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Store(msg) => write!(f, "Store Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "message": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            // Store and unexpected failures are not part of the JSON
            // contract: they surface with an empty body.
            AppError::Store(_) | AppError::InternalServerError(_) => {
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::Store(error.to_string())
    }
}

/// Document (de)serialization problems are unexpected server-side errors.
impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Failed presence checks on request bodies become 400s.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}
