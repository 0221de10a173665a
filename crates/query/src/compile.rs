// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::params::ParamSet;
use crate::predicate::BindValue;

/// A parameterized WHERE/LIMIT/OFFSET clause ready for execution.
///
/// `binds` holds one value per `?` placeholder of `clause`, in
/// left-to-right placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// The clause text, always terminated with `;`. May be just `";"`
    /// when the set is empty.
    pub clause: String,
    /// The ordered bind values.
    pub binds: Vec<BindValue>,
}

/// Compiles a parameter set into a deterministic parameterized clause.
///
/// Filter fragments are emitted in lexicographic key order and joined
/// with `AND`; a `WHERE` prefix is added when any filter exists; the
/// limit and offset fragments follow in that order when present. Two
/// sets holding the same predicates always compile to byte-identical
/// clause strings, regardless of insertion order.
#[must_use]
pub fn compile(params: &ParamSet) -> CompiledQuery {
    let mut fragments: Vec<String> = Vec::new();
    let mut binds: Vec<BindValue> = Vec::new();

    for (_, predicate) in params.filters() {
        fragments.push(predicate.render());
        binds.extend(predicate.binds());
    }

    let mut parts: Vec<String> = Vec::new();
    if !fragments.is_empty() {
        parts.push(format!("WHERE {}", fragments.join(" AND ")));
    }

    if let Some(limit) = params.limit() {
        parts.push(limit.render());
        binds.extend(limit.binds());
    }

    if let Some(offset) = params.offset() {
        parts.push(offset.render());
        binds.extend(offset.binds());
    }

    let clause: String = format!("{};", parts.join(" "));
    CompiledQuery { clause, binds }
}
