//! Fixed-size pagination over an ordered sequence.
//!
//! Page numbers are 1-based. A missing, malformed or non-positive page number
//! serves the first page; a number past the end serves the last page. An empty
//! sequence still has one (empty) page.

use std::num::{IntErrorKind, NonZeroUsize};

/// Number of posts shown per listing page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// A positive integer too large for `usize` is still a number past the end.
fn parse_number(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}

/// The resolved page number and the range of items it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub number: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Splits ordered items into pages of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: NonZeroUsize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(per_page: NonZeroUsize) -> Self {
        Self { per_page }
    }

    pub fn per_page(&self) -> usize {
        self.per_page.get()
    }

    /// Total pages for `count` items. Never less than one.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page()).max(1)
    }

    /// Resolve a raw `page` query value into a page number in `1..=num_pages`.
    pub fn resolve_number(&self, raw: Option<&str>, count: usize) -> usize {
        let requested = raw.and_then(parse_number).filter(|&n| n >= 1).unwrap_or(1);

        requested.min(self.num_pages(count))
    }

    /// Which slice of `count` ordered items the requested page covers.
    pub fn window(&self, raw_number: Option<&str>, count: usize) -> Window {
        let number = self.resolve_number(raw_number, count);

        Window {
            number,
            offset: (number - 1) * self.per_page(),
            limit: self.per_page(),
        }
    }

    /// Wrap the items a storage query returned for `window`.
    pub fn page_in_window<T>(&self, items: Vec<T>, window: Window, count: usize) -> Page<T> {
        Page {
            items,
            number: window.number,
            num_pages: self.num_pages(count),
            count,
            per_page: self.per_page(),
        }
    }

    /// Cut the requested page out of `items`, preserving their order.
    pub fn page<T>(&self, items: Vec<T>, raw_number: Option<&str>) -> Page<T> {
        let count = items.len();
        let window = self.window(raw_number, count);

        let items: Vec<T> = items
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .collect();

        self.page_in_window(items, window, count)
    }
}

/// One page of items plus the metadata needed to render page links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    num_pages: usize,
    count: usize,
    per_page: usize,
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The page number actually served.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Total number of items across all pages.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 when there are no items.
    pub fn start_index(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page, 0 when there are no items.
    pub fn end_index(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }

    /// Transform the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }

    /// Like [`Page::map`], stopping at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<U>, E>>()?;

        Ok(Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        })
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(per_page: usize) -> Paginator {
        Paginator::new(NonZeroUsize::new(per_page).unwrap())
    }

    fn thirteen() -> Vec<u32> {
        (1..=13).collect()
    }

    #[test]
    fn test_thirteen_items_split_ten_and_three() {
        let p = Paginator::default();

        let first = p.page(thirteen(), None);
        assert_eq!(first.len(), 10);
        assert_eq!(first.items(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        let second = p.page(thirteen(), Some("2"));
        assert_eq!(second.len(), 3);
        assert_eq!(second.items(), &[11, 12, 13]);
    }

    #[test]
    fn test_metadata() {
        let page = Paginator::default().page(thirteen(), Some("1"));

        assert_eq!(page.number(), 1);
        assert_eq!(page.num_pages(), 2);
        assert_eq!(page.count(), 13);
        assert_eq!(page.per_page(), 10);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.next_page_number(), Some(2));
        assert_eq!(page.previous_page_number(), None);
        assert_eq!(page.start_index(), 1);
        assert_eq!(page.end_index(), 10);

        let last = Paginator::default().page(thirteen(), Some("2"));
        assert!(!last.has_next());
        assert_eq!(last.previous_page_number(), Some(1));
        assert_eq!(last.start_index(), 11);
        assert_eq!(last.end_index(), 13);
    }

    #[test]
    fn test_full_last_page_when_count_divides_evenly() {
        let items: Vec<u32> = (0..20).collect();
        let page = Paginator::default().page(items, Some("2"));

        assert_eq!(page.num_pages(), 2);
        assert_eq!(page.len(), 10);
    }

    #[test]
    fn test_page_past_the_end_serves_last_page() {
        let page = Paginator::default().page(thirteen(), Some("99"));

        assert_eq!(page.number(), 2);
        assert_eq!(page.items(), &[11, 12, 13]);
    }

    #[test]
    fn test_page_beyond_usize_serves_last_page() {
        let page = Paginator::default().page(thirteen(), Some("99999999999999999999999"));

        assert_eq!(page.number(), 2);
        assert_eq!(page.items(), &[11, 12, 13]);
    }

    #[test]
    fn test_malformed_or_non_positive_page_serves_first_page() {
        for raw in ["", "abc", "0", "-1", "-99999999999999999999999", "1.5"] {
            let page = Paginator::default().page(thirteen(), Some(raw));
            assert_eq!(page.number(), 1, "page={raw:?}");
            assert_eq!(page.len(), 10, "page={raw:?}");
        }
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let page = Paginator::default().page(Vec::<u32>::new(), Some("3"));

        assert_eq!(page.number(), 1);
        assert_eq!(page.num_pages(), 1);
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
    }

    #[test]
    fn test_window_for_storage_queries() {
        let p = Paginator::default();

        assert_eq!(
            p.window(Some("2"), 13),
            Window {
                number: 2,
                offset: 10,
                limit: 10
            }
        );
        assert_eq!(p.window(Some("7"), 13).offset, 10);
        assert_eq!(p.window(None, 0).offset, 0);

        let window = p.window(Some("2"), 13);
        let page = p.page_in_window(vec![11, 12, 13], window, 13);
        assert_eq!(page.number(), 2);
        assert_eq!(page.start_index(), 11);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = paginator(4).page(thirteen(), Some("4"));
        let doubled = page.map(|n| n * 2);

        assert_eq!(doubled.items(), &[26]);
        assert_eq!(doubled.number(), 4);
        assert_eq!(doubled.num_pages(), 4);
        assert_eq!(doubled.count(), 13);
    }
}
