/// Number of page buttons shown when the caller does not ask for a width.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Computes the run of page numbers to offer as navigation buttons.
///
/// The window is centered on the current page and clamped so it never starts
/// before page 1 and never runs past the last page. A single page needs no
/// navigation, so it yields no window at all.
pub fn page_window(total_pages: usize, current_page: usize, window_size: usize) -> Vec<usize> {
    if total_pages <= 1 || window_size == 0 {
        return Vec::new();
    }

    let len = std::cmp::min(window_size, total_pages);
    let start = current_page.saturating_sub(window_size / 2).max(1);
    let start = std::cmp::min(start, total_pages - len + 1);

    (start..start + len).collect()
}
