// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{ParamSet, ParserRegistry, RawQuery};

/// Builds a raw query from borrowed pairs.
pub fn raw(pairs: &[(&str, &str)]) -> RawQuery {
    RawQuery::from_pairs(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
    )
}

/// Parses `pairs` with the full registry, panicking on validation errors.
pub fn parse_ok(pairs: &[(&str, &str)]) -> ParamSet {
    let registry: ParserRegistry = ParserRegistry::recognized();
    ParamSet::parse(&registry, &raw(pairs))
        .into_result()
        .unwrap()
}
