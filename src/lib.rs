//! Pagination and table sorting core.
//!
//! `Paginator` holds a dataset and derives the visible slice and page count,
//! `sorter` reorders rows by a field with mixed-type normalization, and
//! `window` computes the bounded run of page numbers shown as navigation
//! buttons. The binary in this crate is a tui viewer built on top of these.

pub mod domain;
pub mod paginator;
pub mod sorter;
pub mod window;

pub use domain::{PageableError, Row, Value};
pub use paginator::Paginator;
pub use sorter::{SortDirection, SortKey, compare, normalize, sort_rows};
pub use window::{DEFAULT_WINDOW_SIZE, page_window};
