//! Zero-based page requests and the pages returned for them.

/// A zero-based page index with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 100;

    /// Clamps `size` into `1..=MAX_SIZE`.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            request,
            total,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.request.size);
        u32::try_from(self.total.div_ceil(size)).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.request.page) + 1 < u64::from(self.total_pages())
    }

    pub fn has_previous(&self) -> bool {
        self.request.page > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_request_is_first_page_of_twenty() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_follows_zero_based_page() {
        assert_eq!(PageRequest::new(3, 20).offset(), 60);
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 500).size, 100);
    }

    #[test]
    fn navigation_flags() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(0, 10), 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let last: Page<u8> = Page::new(vec![], PageRequest::new(2, 10), 25);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let empty: Page<u8> = Page::new(vec![], PageRequest::new(0, 10), 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 4);
        assert_eq!(page.request.page, 1);
    }

    proptest! {
        #[test]
        fn total_pages_cover_all_items(total in 0u64..100_000, size in 1u32..=100) {
            let page: Page<()> = Page::new(vec![], PageRequest::new(0, size), total);
            let pages = u64::from(page.total_pages());
            prop_assert!(pages * u64::from(size) >= total);
            prop_assert!(pages == 0 || (pages - 1) * u64::from(size) < total);
        }
    }
}
