use serde::{Deserialize, Serialize};

/// Pagination request parameters.
///
/// Deserializes from partial input (for example query-string parameters),
/// filling the gaps with the defaults: page 1, 15 items per page, a window
/// of 3 page links and no externally supplied total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Requested page (1-based)
    pub current_page: usize,

    /// Items per page
    pub per_page: usize,

    /// Number of page links in the navigation window
    pub number_of_pages: usize,

    /// Size of the full result when the collection already holds only the
    /// current page; 0 when the collection holds everything
    pub total_count: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: 15,
            number_of_pages: 3,
            total_count: 0,
        }
    }
}

impl PaginationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested page
    pub fn page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    /// Set items per page
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the size of the page-link window
    pub fn number_of_pages(mut self, number_of_pages: usize) -> Self {
        self.number_of_pages = number_of_pages;
        self
    }

    /// Declare the size of the full, externally paginated result
    pub fn total_count(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        self
    }
}
