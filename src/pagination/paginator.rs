use crate::collection::Collection;
use crate::core::{CollectionError, Result};
use log::debug;
use serde::Serialize;
use serde_json::Value;

/// A page of a collection together with its navigation metadata.
///
/// Two modes, picked by `total_count`:
/// - `0`: the collection holds the whole result and the current page is cut
///   out of it;
/// - anything else: the collection already is the current page of a result
///   of `total_count` items (paginated upstream), so all of it is the page.
#[derive(Debug, Clone, Serialize)]
pub struct Paginator {
    items: Vec<Value>,
    current_page: usize,
    per_page: usize,
    total: usize,
    total_pages: usize,
    pages: Vec<usize>,
}

impl Paginator {
    /// Builds a page view of `source`. `per_page` and `current_page` are
    /// raised to at least 1.
    pub fn new(
        source: &Collection,
        per_page: usize,
        number_of_pages: usize,
        current_page: usize,
        total_count: usize,
    ) -> Self {
        let per_page = per_page.max(1);
        let current_page = current_page.max(1);

        let (total, items) = if total_count == 0 {
            let offset = (current_page - 1).saturating_mul(per_page);
            let items = source
                .to_array()
                .into_iter()
                .skip(offset)
                .take(per_page)
                .collect();
            (source.count(), items)
        } else {
            (total_count, source.to_array())
        };

        let total_pages = total.div_ceil(per_page);
        let pages = page_window(current_page, total_pages, number_of_pages);

        debug!(
            "paginate: page {} of {} ({} items, {} per page)",
            current_page, total_pages, total, per_page
        );

        Self {
            items,
            current_page,
            per_page,
            total,
            total_pages,
            pages,
        }
    }

    /// Like [`new`](Self::new), but rejects a zero page size instead of
    /// raising it to 1.
    pub fn try_new(
        source: &Collection,
        per_page: usize,
        number_of_pages: usize,
        current_page: usize,
        total_count: usize,
    ) -> Result<Self> {
        if per_page == 0 {
            return Err(CollectionError::InvalidPage(
                "per_page must be at least 1".to_string(),
            ));
        }
        Ok(Self::new(
            source,
            per_page,
            number_of_pages,
            current_page,
            total_count,
        ))
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Page numbers to render as navigation links, centered on the current
    /// page when possible.
    pub fn page_range(&self) -> &[usize] {
        &self.pages
    }

    pub fn has_pages(&self) -> bool {
        self.total_pages > 1
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous_page(&self) -> Option<usize> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_more_pages().then(|| self.current_page + 1)
    }

    /// 1-based position of the first item of this page within the result.
    /// `None` for an empty page or a position past `usize::MAX`.
    pub fn first_item(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        (self.current_page - 1)
            .checked_mul(self.per_page)?
            .checked_add(1)
    }

    /// 1-based position of the last item of this page within the result.
    pub fn last_item(&self) -> Option<usize> {
        self.first_item()?.checked_add(self.items.len() - 1)
    }

    /// The page's items as a new collection.
    pub fn into_collection(self) -> Collection {
        Collection::new(self.items)
    }
}

fn page_window(current_page: usize, total_pages: usize, number_of_pages: usize) -> Vec<usize> {
    let window = number_of_pages.min(total_pages);
    if window == 0 {
        return Vec::new();
    }

    let start = current_page
        .saturating_sub(window / 2)
        .max(1)
        .min(total_pages - window + 1);

    (start..start + window).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbers(n: i64) -> Collection {
        (1..=n).map(Value::from).collect()
    }

    #[test]
    fn test_local_pagination() {
        let page = numbers(40).paginate(2, 15, 3, 0);
        assert_eq!(page.total(), 40);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items().len(), 15);
        assert_eq!(page.items()[0], json!(16));
        assert_eq!(page.first_item(), Some(16));
        assert_eq!(page.last_item(), Some(30));
        assert_eq!(page.previous_page(), Some(1));
        assert_eq!(page.next_page(), Some(3));
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = numbers(40).paginate(3, 15, 3, 0);
        assert_eq!(page.items().len(), 10);
        assert!(!page.has_more_pages());
        assert_eq!(page.next_page(), None);
        assert_eq!(page.last_item(), Some(40));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = numbers(5).paginate(4, 2, 3, 0);
        assert!(page.items().is_empty());
        assert_eq!(page.first_item(), None);
        assert_eq!(page.page_range(), &[1, 2, 3]);
    }

    #[test]
    fn test_external_total_keeps_every_item() {
        let page = numbers(10).paginate(3, 10, 3, 95);
        assert_eq!(page.total(), 95);
        assert_eq!(page.total_pages(), 10);
        assert_eq!(page.items().len(), 10);
        assert_eq!(page.first_item(), Some(21));
        assert_eq!(page.page_range(), &[2, 3, 4]);
    }

    #[test]
    fn test_huge_page_number_has_no_item_positions() {
        let page = Collection::new(vec![json!(1)]).paginate(usize::MAX, 2, 3, 5);
        assert_eq!(page.items().len(), 1);
        assert_eq!(page.first_item(), None);
        assert_eq!(page.last_item(), None);
        assert_eq!(page.next_page(), None);
        assert_eq!(page.page_range(), &[1, 2, 3]);
    }

    #[test]
    fn test_page_window_is_clamped() {
        assert_eq!(page_window(1, 10, 3), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10, 3), vec![4, 5, 6]);
        assert_eq!(page_window(10, 10, 3), vec![8, 9, 10]);
        assert_eq!(page_window(2, 2, 5), vec![1, 2]);
        assert_eq!(page_window(1, 0, 3), Vec::<usize>::new());
    }

    #[test]
    fn test_empty_collection() {
        let page = Collection::default().paginate(1, 15, 3, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_pages());
        assert!(page.on_first_page());
        assert!(page.page_range().is_empty());
    }

    #[test]
    fn test_zero_page_size() {
        assert_eq!(numbers(3).paginate(1, 0, 3, 0).per_page(), 1);
        assert!(matches!(
            Paginator::try_new(&numbers(3), 0, 3, 1, 0),
            Err(CollectionError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_serializes_metadata() {
        let value = serde_json::to_value(numbers(3).paginate(1, 2, 3, 0)).unwrap();
        assert_eq!(
            value,
            json!({
                "items": [1, 2],
                "current_page": 1,
                "per_page": 2,
                "total": 3,
                "total_pages": 2,
                "pages": [1, 2]
            })
        );
    }
}
