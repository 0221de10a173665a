// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API response data transfer objects.

use serde::{Deserialize, Serialize};
use todo_domain::Todo;

/// One page of a filtered todo listing.
///
/// `next` and `previous` are complete request URLs that reproduce the
/// listing with only the page shifted; either is the empty string when
/// no such page exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedTodos {
    /// The URL of the following page, or `""` on the last page.
    pub next: String,
    /// The URL of the preceding page, or `""` on the first page.
    pub previous: String,
    /// The records of the current page.
    pub results: Vec<Todo>,
}
