// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::params::ParamSet;
use url::Url;

/// Builds the URL of the next page, or `None` when the current window
/// already reaches `total_count`.
///
/// The returned URL is `base` with every original query parameter
/// preserved — repeated values included — except `page`, which is set
/// to the following page. Keys are re-encoded in sorted order so the
/// output is stable for a given logical parameter set.
#[must_use]
pub fn next_link(params: &ParamSet, base: &Url, total_count: i64) -> Option<Url> {
    if params.effective_offset() + params.effective_limit() < total_count {
        Some(with_page(base, params.current_page() + 1))
    } else {
        None
    }
}

/// Builds the URL of the previous page, or `None` when already on the
/// first page.
#[must_use]
pub fn prev_link(params: &ParamSet, base: &Url) -> Option<Url> {
    if params.current_page() > 1 {
        Some(with_page(base, params.current_page() - 1))
    } else {
        None
    }
}

/// Returns `base` with its `page` parameter replaced by `page` and the
/// query string re-encoded canonically with sorted keys.
fn with_page(base: &Url, page: i64) -> Url {
    let mut pairs: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.push((String::from("page"), page.to_string()));
    // Stable sort: repeated values of one key keep their original order.
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut url: Url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    url
}
