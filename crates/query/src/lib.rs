// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query-string handling for todo list requests.
//!
//! This crate turns the untrusted query parameters of a list request
//! into a safe, parameterized SQL clause plus pagination links:
//!
//! 1. [`RawQuery`] holds the decoded, multi-valued parameter map.
//! 2. A [`ParserRegistry`] of per-key field parsers converts raw values
//!    into typed [`Predicate`]s, accumulating every [`ValidationError`]
//!    instead of stopping at the first.
//! 3. The resulting [`ParamSet`] is decorated with pagination defaults
//!    and compiled into a [`CompiledQuery`] — a clause string with `?`
//!    placeholders and the matching ordered [`BindValue`]s.
//! 4. [`next_link`]/[`prev_link`] re-derive page-shifted URLs that
//!    preserve every other parameter of the original request.
//!
//! Compilation is deterministic: filter fragments are emitted in
//! lexicographic key order, so two logically equal parameter sets
//! always compile to byte-identical clauses.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod compile;
mod error;
mod pagination;
mod params;
mod predicate;
mod registry;

#[cfg(test)]
mod tests;

pub use compile::{CompiledQuery, compile};
pub use error::{
    COUNT_ERROR_MESSAGE, PAGE_ERROR_MESSAGE, STATE_ERROR_MESSAGE, TIME_ERROR_MESSAGE,
    ValidationError, ValidationErrorKind,
};
pub use pagination::{next_link, prev_link};
pub use params::{ParamSet, ParseOutcome, RawQuery};
pub use predicate::{BindValue, CompareOp, Predicate};
pub use registry::{FieldParser, ParserRegistry};
