// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use todo_persistence::PersistenceError;
use todo_query::ValidationError;

/// A convenience alias for API operation results.
pub type ApiResult<T> = Result<T, ApiError>;

/// API-level errors.
///
/// These represent the API contract; the HTTP layer maps each variant
/// onto a status code and error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more query parameters failed validation.
    InvalidQuery {
        /// The accumulated validation errors, sorted by key.
        errors: Vec<ValidationError>,
    },
    /// One or more body attributes failed validation.
    InvalidBody {
        /// The accumulated validation errors, sorted by key.
        errors: Vec<ValidationError>,
    },
    /// The request body is not a JSON object.
    MalformedBody {
        /// A human-readable description of the problem.
        message: String,
    },
    /// No record exists with the requested id.
    NotFound {
        /// The requested record id.
        id: i64,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { errors } => {
                write!(f, "Invalid query parameters ({} errors)", errors.len())
            }
            Self::InvalidBody { errors } => {
                write!(f, "Invalid body attributes ({} errors)", errors.len())
            }
            Self::MalformedBody { message } => write!(f, "Malformed body: {message}"),
            Self::NotFound { id } => write!(f, "Todo {id} not found"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}
