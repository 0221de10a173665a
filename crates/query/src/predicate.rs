// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use todo_domain::TodoState;

/// A value bound to one `?` placeholder of a compiled clause.
///
/// A closed union rather than a bag of opaque values: the storage
/// layer can map each variant to a concrete SQL type without runtime
/// type assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// A text value (state names).
    Text(String),
    /// An integer value (limits and offsets).
    Int(i64),
    /// A UTC-normalized timestamp (due-date comparisons).
    Timestamp(OffsetDateTime),
}

/// A comparison operator accepted by the `due` key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
}

impl CompareOp {
    /// The SQL spelling of this operator.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// A typed filter or pagination fragment.
///
/// Every variant renders a clause fragment with exactly as many `?`
/// placeholders as it has bind values, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Column comparison against one or more timestamps, AND-combined.
    Comparison {
        /// The column being compared.
        column: &'static str,
        /// The comparison operator.
        op: CompareOp,
        /// The comparison operands. Never empty.
        values: Vec<OffsetDateTime>,
    },
    /// Column membership in a set of states: `column IN (?, …)`.
    Membership {
        /// The column being tested.
        column: &'static str,
        /// The accepted states. Never empty.
        values: Vec<TodoState>,
    },
    /// Row cap: `LIMIT ?`.
    Limit {
        /// The maximum number of rows. Always >= 1.
        rows: i64,
    },
    /// Row skip: `OFFSET ?`.
    Offset {
        /// The 1-based page number. Always >= 1.
        page: i64,
        /// The derived zero-based skip, `(page - 1) * limit`.
        skip: i64,
    },
}

impl Predicate {
    /// Renders this predicate as a clause fragment with `?` placeholders.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Comparison { column, op, values } => values
                .iter()
                .map(|_| format!("{column} {} ?", op.as_sql()))
                .collect::<Vec<String>>()
                .join(" AND "),
            Self::Membership { column, values } => {
                let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
                format!("{column} IN ({})", placeholders.join(", "))
            }
            Self::Limit { .. } => String::from("LIMIT ?"),
            Self::Offset { .. } => String::from("OFFSET ?"),
        }
    }

    /// Returns the bind values for this predicate, in placeholder order.
    #[must_use]
    pub fn binds(&self) -> Vec<BindValue> {
        match self {
            Self::Comparison { values, .. } => {
                values.iter().map(|t| BindValue::Timestamp(*t)).collect()
            }
            Self::Membership { values, .. } => values
                .iter()
                .map(|s| BindValue::Text(s.as_str().to_string()))
                .collect(),
            Self::Limit { rows } => vec![BindValue::Int(*rows)],
            Self::Offset { skip, .. } => vec![BindValue::Int(*skip)],
        }
    }
}
