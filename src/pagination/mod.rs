//! Pagination module
//!
//! # Overview
//!
//! Paginated endpoints return a cursor with each page; the next request
//! sends it back as the `cursor` parameter. [`extract_cursors`] finds the
//! cursors in a payload and [`PageIterator`] drives the loop, stopping when
//! the cursor runs out, repeats itself, or the page limit is hit.

mod cursor;
mod iterator;
mod types;

pub use cursor::{extract_cursors, extract_cursors_str, Cursors, CURSOR_BOTTOM, CURSOR_TOP};
pub use iterator::PageIterator;
pub use types::{CollectError, NextPage, PageResult, PageState, CURSOR_PARAM};
