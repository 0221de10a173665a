// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use thiserror::Error;

/// Error message for values that fail RFC-3339 timestamp parsing.
pub const TIME_ERROR_MESSAGE: &str = "value must be in RFC-3339 format";
/// Error message for `page` values that are not positive integers.
pub const PAGE_ERROR_MESSAGE: &str = "value must be an integer greater than 0";
/// Error message for `count` values that are not positive integers.
pub const COUNT_ERROR_MESSAGE: &str = "value must be an integer greater than 0";
/// Error message for unrecognized state names.
pub const STATE_ERROR_MESSAGE: &str = "invalid state";

/// Classification of a query parameter validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The value fails its type-specific grammar (e.g. a bad timestamp).
    Format,
    /// The value parses but violates a domain constraint (e.g. `page` < 1).
    Range,
    /// The value is not a member of the expected enumeration.
    UnknownEnumValue,
}

/// A single invalid query parameter value.
///
/// Parsing never stops at the first failure; every invalid value in a
/// request produces one of these, and the full list is surfaced at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("key: {key}, value: {value}, message: {message}")]
pub struct ValidationError {
    /// The query parameter key as it appeared in the request.
    pub key: String,
    /// The raw value that failed validation.
    pub value: String,
    /// A human-readable description of the failure.
    pub message: String,
    /// The failure classification. Not part of the wire shape.
    #[serde(skip)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a format error for `key`/`value`.
    #[must_use]
    pub fn format(key: &str, value: &str, message: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
            kind: ValidationErrorKind::Format,
        }
    }

    /// Creates a range error for `key`/`value`.
    #[must_use]
    pub fn range(key: &str, value: &str, message: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
            kind: ValidationErrorKind::Range,
        }
    }

    /// Creates an unknown-enum-value error for `key`/`value`.
    #[must_use]
    pub fn unknown_enum(key: &str, value: &str, message: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
            kind: ValidationErrorKind::UnknownEnumValue,
        }
    }
}
