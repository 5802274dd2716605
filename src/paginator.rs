use tracing::trace;

use crate::domain::{PageableError, Row};
use crate::sorter::{self, SortDirection};
use crate::window;

/// Holds a dataset together with its pagination and sort state.
///
/// Rows are stored once; sorting reorders a row index instead of the rows
/// themselves. The current page is 1-based and always stays inside
/// `[1, total_pages()]`.
pub struct Paginator {
    data: Vec<Row>,
    rows: Vec<usize>,
    current_page: usize,
    per_page: usize,
    sort_by: Option<String>,
    sort_direction: SortDirection,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            data: Vec::new(),
            rows: Vec::new(),
            current_page: 1,
            per_page: per_page.max(1),
            sort_by: None,
            sort_direction: SortDirection::Ascending,
        }
    }

    pub fn with_data(data: Vec<Row>, per_page: usize) -> Self {
        let mut paginator = Self::new(per_page);
        paginator.set_data(data);
        paginator
    }

    /// Replaces the dataset. Ordering, page and sort state start over.
    pub fn set_data(&mut self, data: Vec<Row>) {
        self.rows = (0..data.len()).collect();
        self.data = data;
        self.current_page = 1;
        self.sort_by = None;
        self.sort_direction = SortDirection::Ascending;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.per_page).max(1)
    }

    /// The rows of the current page, in display order.
    pub fn content(&self) -> Vec<&Row> {
        let start = (self.current_page - 1) * self.per_page;
        let end = std::cmp::min(start + self.per_page, self.rows.len());
        if start >= end {
            return Vec::new();
        }
        self.rows[start..end].iter().map(|&idx| &self.data[idx]).collect()
    }

    /// The page numbers to offer as navigation buttons.
    pub fn pages(&self, window_size: usize) -> Vec<usize> {
        window::page_window(self.total_pages(), self.current_page, window_size)
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn next_page(&mut self) {
        // Make sure we can go forward first
        if self.current_page == self.total_pages() {
            return;
        }
        self.current_page += 1;
    }

    pub fn previous_page(&mut self) {
        // Make sure we can go backwards first
        if self.current_page == 1 {
            return;
        }
        self.current_page -= 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Sorts the dataset by `field` and jumps back to the first page.
    ///
    /// With no explicit direction, re-sorting the field that is already
    /// active toggles the direction; any other field starts ascending.
    pub fn sort_by_property(
        &mut self,
        field: &str,
        direction: Option<SortDirection>,
    ) -> Result<(), PageableError> {
        let direction = match direction {
            Some(direction) => direction,
            None if self.sort_by.as_deref() == Some(field) => self.sort_direction.toggled(),
            None => SortDirection::Ascending,
        };

        sorter::sort_rows(&self.data, &mut self.rows, field, direction)?;

        trace!("Sort state: {field} {direction:?}");
        self.sort_by = Some(field.to_string());
        self.sort_direction = direction;
        self.current_page = 1;
        Ok(())
    }
}
