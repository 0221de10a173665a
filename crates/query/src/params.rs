// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ValidationError;
use crate::predicate::Predicate;
use crate::registry::ParserRegistry;
use std::collections::BTreeMap;

/// The query key carrying the 1-based page number.
pub(crate) const PAGE_KEY: &str = "page";
/// The query key carrying the page size.
pub(crate) const COUNT_KEY: &str = "count";

/// A decoded, multi-valued query parameter map.
///
/// Values for a repeated key keep their order of appearance; keys
/// iterate in sorted order so that parsing is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    entries: BTreeMap<String, Vec<String>>,
}

impl RawQuery {
    /// Builds a raw query from decoded `(key, value)` pairs, grouping
    /// repeated keys.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in pairs {
            entries.entry(key).or_default().push(value);
        }
        Self { entries }
    }

    /// Iterates over keys and their values in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Returns whether the query carries no parameters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for RawQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// The result of running a raw query through the parser registry: the
/// predicates that parsed, plus every validation error encountered.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The predicates successfully parsed from recognized keys.
    pub params: ParamSet,
    /// Every validation failure, sorted by key. Empty on success.
    pub errors: Vec<ValidationError>,
}

impl ParseOutcome {
    /// Converts this outcome into a result, treating any validation
    /// error as a rejection of the whole request.
    ///
    /// # Errors
    ///
    /// Returns the accumulated validation errors if any value failed.
    pub fn into_result(self) -> Result<ParamSet, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.params)
        } else {
            Err(self.errors)
        }
    }
}

/// The aggregate of predicates parsed from one request's query string,
/// keyed by recognized parameter name.
///
/// A `ParamSet` is a plain value: cloning yields an independent set, so
/// deriving a count-only variant never disturbs the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: BTreeMap<String, Predicate>,
}

impl ParamSet {
    /// Runs every recognized key of `raw` through its registered parser.
    ///
    /// Unrecognized keys are silently ignored so that forward-compatible
    /// query strings keep working. Validation errors accumulate across
    /// all keys (never short-circuiting) and are reported sorted by key.
    #[must_use]
    pub fn parse(registry: &ParserRegistry, raw: &RawQuery) -> ParseOutcome {
        let mut entries: BTreeMap<String, Predicate> = BTreeMap::new();
        let mut errors: Vec<ValidationError> = Vec::new();

        for (key, values) in raw.iter() {
            let Some(parser) = registry.get(key) else {
                continue;
            };
            match parser(key, values) {
                Ok(predicate) => {
                    entries.insert(key.clone(), predicate);
                }
                Err(mut key_errors) => errors.append(&mut key_errors),
            }
        }

        errors.sort_by(|a, b| a.key.cmp(&b.key));

        let mut params: Self = Self { entries };
        params.rederive_offset();
        ParseOutcome { params, errors }
    }

    /// Returns a copy with pagination defaults filled in: a limit of
    /// `default_limit` if none was requested, page 1 if none was
    /// requested, and the offset skip re-derived from the effective
    /// limit either way.
    #[must_use]
    pub fn with_pagination_defaults(&self, default_limit: i64) -> Self {
        let mut params: Self = self.clone();
        params
            .entries
            .entry(String::from(COUNT_KEY))
            .or_insert(Predicate::Limit { rows: default_limit });
        params
            .entries
            .entry(String::from(PAGE_KEY))
            .or_insert(Predicate::Offset { page: 1, skip: 0 });
        params.rederive_offset();
        params
    }

    /// Returns a copy with the limit and offset removed, suitable for
    /// counting all matching rows regardless of page.
    #[must_use]
    pub fn without_pagination(&self) -> Self {
        let mut params: Self = self.clone();
        params.entries.remove(COUNT_KEY);
        params.entries.remove(PAGE_KEY);
        params
    }

    /// The requested page, defaulting to 1 when absent.
    #[must_use]
    pub fn current_page(&self) -> i64 {
        match self.entries.get(PAGE_KEY) {
            Some(Predicate::Offset { page, .. }) => *page,
            _ => 1,
        }
    }

    /// The requested row cap, or 0 when no limit is present.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        match self.entries.get(COUNT_KEY) {
            Some(Predicate::Limit { rows }) => *rows,
            _ => 0,
        }
    }

    /// The zero-based row skip, `(page - 1) * limit`.
    #[must_use]
    pub fn effective_offset(&self) -> i64 {
        (self.current_page() - 1) * self.effective_limit()
    }

    /// Iterates over the filter predicates (everything except limit and
    /// offset) in lexicographic key order.
    pub(crate) fn filters(&self) -> impl Iterator<Item = (&String, &Predicate)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.as_str() != PAGE_KEY && key.as_str() != COUNT_KEY)
    }

    /// The limit predicate, if present.
    pub(crate) fn limit(&self) -> Option<&Predicate> {
        self.entries.get(COUNT_KEY)
    }

    /// The offset predicate, if present.
    pub(crate) fn offset(&self) -> Option<&Predicate> {
        self.entries.get(PAGE_KEY)
    }

    /// The number of predicates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the set holds no predicates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-derives the offset's skip from the effective limit. The skip
    /// is stored so that the offset predicate can render its own bind
    /// value; it must be refreshed whenever the limit changes.
    fn rederive_offset(&mut self) {
        let limit: i64 = self.effective_limit();
        if let Some(Predicate::Offset { page, skip }) = self.entries.get_mut(PAGE_KEY) {
            *skip = (*page - 1) * limit;
        }
    }
}
