// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field parsers and the registry that maps query keys onto them.

use crate::error::{
    COUNT_ERROR_MESSAGE, PAGE_ERROR_MESSAGE, STATE_ERROR_MESSAGE, TIME_ERROR_MESSAGE,
    ValidationError,
};
use crate::predicate::{CompareOp, Predicate};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use todo_domain::TodoState;

/// A pure function converting the raw values of one recognized query
/// key into a predicate, or into the full list of validation errors
/// for that key. It never returns an empty error list.
pub type FieldParser = fn(&str, &[String]) -> Result<Predicate, Vec<ValidationError>>;

/// An explicit mapping from recognized query keys to field parsers.
///
/// Constructed and passed into parsing rather than living in global
/// state, so tests can substitute a reduced or extended vocabulary.
pub struct ParserRegistry {
    parsers: BTreeMap<&'static str, FieldParser>,
}

impl ParserRegistry {
    /// Creates the registry of all recognized query keys: the `due`
    /// comparison family, `state`, `page`, and `count`.
    #[must_use]
    pub fn recognized() -> Self {
        let mut parsers: BTreeMap<&'static str, FieldParser> = BTreeMap::new();
        parsers.insert("due", parse_due_eq);
        parsers.insert("due:gt", parse_due_gt);
        parsers.insert("due:lt", parse_due_lt);
        parsers.insert("due:gte", parse_due_gte);
        parsers.insert("due:lte", parse_due_lte);
        parsers.insert("state", parse_state);
        parsers.insert("page", parse_page);
        parsers.insert("count", parse_count);
        Self { parsers }
    }

    /// Creates an empty registry. Every key is unrecognized.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Registers `parser` for `key`, replacing any existing parser.
    pub fn register(&mut self, key: &'static str, parser: FieldParser) {
        self.parsers.insert(key, parser);
    }

    /// Looks up the parser for `key`, if the key is recognized.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldParser> {
        self.parsers.get(key).copied()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::recognized()
    }
}

fn parse_due(
    key: &str,
    op: CompareOp,
    values: &[String],
) -> Result<Predicate, Vec<ValidationError>> {
    let mut parsed: Vec<OffsetDateTime> = Vec::with_capacity(values.len());
    let mut errors: Vec<ValidationError> = Vec::new();

    for value in values {
        match OffsetDateTime::parse(value, &Rfc3339) {
            Ok(t) => parsed.push(t.to_offset(UtcOffset::UTC)),
            Err(_) => errors.push(ValidationError::format(key, value, TIME_ERROR_MESSAGE)),
        }
    }

    if parsed.is_empty() && errors.is_empty() {
        errors.push(ValidationError::format(key, "", TIME_ERROR_MESSAGE));
    }

    if errors.is_empty() {
        Ok(Predicate::Comparison {
            column: "due",
            op,
            values: parsed,
        })
    } else {
        Err(errors)
    }
}

fn parse_due_eq(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    parse_due(key, CompareOp::Eq, values)
}

fn parse_due_gt(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    parse_due(key, CompareOp::Gt, values)
}

fn parse_due_lt(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    parse_due(key, CompareOp::Lt, values)
}

fn parse_due_gte(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    parse_due(key, CompareOp::Gte, values)
}

fn parse_due_lte(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    parse_due(key, CompareOp::Lte, values)
}

fn parse_state(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    let mut states: Vec<TodoState> = Vec::with_capacity(values.len());
    let mut errors: Vec<ValidationError> = Vec::new();

    for value in values {
        match TodoState::from_str(value) {
            Ok(state) => states.push(state),
            Err(_) => errors.push(ValidationError::unknown_enum(key, value, STATE_ERROR_MESSAGE)),
        }
    }

    if states.is_empty() && errors.is_empty() {
        errors.push(ValidationError::unknown_enum(key, "", STATE_ERROR_MESSAGE));
    }

    if errors.is_empty() {
        Ok(Predicate::Membership {
            column: "state",
            values: states,
        })
    } else {
        Err(errors)
    }
}

fn parse_positive_int(key: &str, values: &[String], message: &str) -> Result<i64, ValidationError> {
    let raw: &str = values.first().map_or("", String::as_str);

    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        Ok(_) => Err(ValidationError::range(key, raw, message)),
        Err(_) => Err(ValidationError::format(key, raw, message)),
    }
}

fn parse_page(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    match parse_positive_int(key, values, PAGE_ERROR_MESSAGE) {
        Ok(page) => Ok(Predicate::Offset { page, skip: 0 }),
        Err(e) => Err(vec![e]),
    }
}

fn parse_count(key: &str, values: &[String]) -> Result<Predicate, Vec<ValidationError>> {
    match parse_positive_int(key, values, COUNT_ERROR_MESSAGE) {
        Ok(rows) => Ok(Predicate::Limit { rows }),
        Err(e) => Err(vec![e]),
    }
}
