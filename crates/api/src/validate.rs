// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Body attribute validation for create and update requests.
//!
//! Validation accumulates every failing attribute instead of stopping
//! at the first, mirroring the query-parameter pipeline: the caller
//! receives all problems with a request at once, sorted by key.

use serde_json::{Map, Value};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use todo_domain::{NewTodo, TodoPatch, TodoState};
use todo_query::{STATE_ERROR_MESSAGE, TIME_ERROR_MESSAGE, ValidationError};

/// Error message for attributes missing from a create request.
pub const REQUIRED_MESSAGE: &str = "required attribute";
/// Error message for attributes outside the todo schema.
pub const UNRECOGNIZED_MESSAGE: &str = "unrecognized attribute";
/// Error message for attributes that must be JSON strings.
pub const STRING_MESSAGE: &str = "value must be a string";

/// Renders a JSON value for an error report: strings bare, everything
/// else as compact JSON.
fn raw_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_desc(key: &str, value: &Value, errors: &mut Vec<ValidationError>) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(ValidationError::format(key, &raw_value(value), STRING_MESSAGE));
            None
        }
    }
}

fn parse_due(
    key: &str,
    value: &Value,
    errors: &mut Vec<ValidationError>,
) -> Option<OffsetDateTime> {
    let parsed: Option<OffsetDateTime> = value
        .as_str()
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok());
    if parsed.is_none() {
        errors.push(ValidationError::format(key, &raw_value(value), TIME_ERROR_MESSAGE));
    }
    parsed.map(|t| t.to_offset(time::UtcOffset::UTC))
}

fn parse_state(key: &str, value: &Value, errors: &mut Vec<ValidationError>) -> Option<TodoState> {
    let parsed: Option<TodoState> = value.as_str().and_then(|s| TodoState::from_str(s).ok());
    if parsed.is_none() {
        errors.push(ValidationError::unknown_enum(key, &raw_value(value), STATE_ERROR_MESSAGE));
    }
    parsed
}

/// Runs the per-attribute parsers over `body`, rejecting attributes
/// outside the todo schema. Absence is not an error here.
fn parse_attributes(body: &Map<String, Value>) -> (TodoPatch, Vec<ValidationError>) {
    let mut patch: TodoPatch = TodoPatch::default();
    let mut errors: Vec<ValidationError> = Vec::new();

    for (key, value) in body {
        match key.as_str() {
            "desc" => patch.desc = parse_desc(key, value, &mut errors),
            "due" => patch.due = parse_due(key, value, &mut errors),
            "state" => patch.state = parse_state(key, value, &mut errors),
            _ => errors.push(ValidationError::format(
                key,
                &raw_value(value),
                UNRECOGNIZED_MESSAGE,
            )),
        }
    }

    (patch, errors)
}

/// Validates the attributes of a partial update.
///
/// Recognized attributes are optional; unrecognized ones are rejected.
///
/// # Errors
///
/// Returns every failing attribute, sorted by key.
pub fn validate_patch(body: &Map<String, Value>) -> Result<TodoPatch, Vec<ValidationError>> {
    let (patch, mut errors) = parse_attributes(body);

    if errors.is_empty() {
        Ok(patch)
    } else {
        errors.sort_by(|a, b| a.key.cmp(&b.key));
        Err(errors)
    }
}

/// Validates the attributes of a create request.
///
/// `desc`, `due`, and `state` are all required; unrecognized
/// attributes are rejected.
///
/// # Errors
///
/// Returns every failing or missing attribute, sorted by key.
pub fn validate_create(body: &Map<String, Value>) -> Result<NewTodo, Vec<ValidationError>> {
    let (patch, mut errors) = parse_attributes(body);

    for key in ["desc", "due", "state"] {
        if !body.contains_key(key) {
            errors.push(ValidationError::format(key, "", REQUIRED_MESSAGE));
        }
    }

    errors.sort_by(|a, b| a.key.cmp(&b.key));

    match (patch.desc, patch.due, patch.state) {
        (Some(desc), Some(due), Some(state)) if errors.is_empty() => {
            Ok(NewTodo::new(desc, due, state))
        }
        _ => Err(errors),
    }
}
