//! Fixed-size page slicing.

use std::num::NonZeroUsize;

/// One page of an ordered, filtered result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, R> {
    pub rows: Vec<&'a R>,
    /// Number of records after filtering, across all pages.
    pub total: usize,
    /// Zero-based page index that was requested.
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl<'a, R> Page<'a, R> {
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size.get())
    }

    /// 1-based inclusive display range ("Showing 11–12 of 12"); `(0, 0)` when empty.
    pub fn display_range(&self) -> (usize, usize) {
        if self.rows.is_empty() {
            return (0, 0);
        }
        let start = self.page * self.page_size.get() + 1;
        (start, start + self.rows.len() - 1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0 && self.total > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Slice `[page*size, page*size+size)` out of `rows`, clipped to bounds.
///
/// Never fails: a page past the end yields no rows.
pub fn paginate<'a, R>(rows: &[&'a R], page: usize, page_size: NonZeroUsize) -> Page<'a, R> {
    let total = rows.len();
    let start = page.saturating_mul(page_size.get()).min(total);
    let end = start.saturating_add(page_size.get()).min(total);

    Page {
        rows: rows[start..end].to_vec(),
        total,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn twelve_rows_size_ten() {
        let data: Vec<u32> = (0..12).collect();
        let refs: Vec<&u32> = data.iter().collect();

        let first = paginate(&refs, 0, size(10));
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.total, 12);
        assert_eq!(first.page_count(), 2);
        assert_eq!(first.display_range(), (1, 10));
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = paginate(&refs, 1, size(10));
        assert_eq!(second.rows, vec![&10, &11]);
        assert_eq!(second.display_range(), (11, 12));
        assert!(!second.has_next());
    }

    #[test]
    fn past_the_end_is_empty_not_an_error() {
        let data = [1, 2, 3];
        let refs: Vec<&i32> = data.iter().collect();

        let page = paginate(&refs, 7, size(5));
        assert!(page.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.display_range(), (0, 0));

        let huge = paginate(&refs, usize::MAX, size(usize::MAX));
        assert!(huge.is_empty());

        let last = paginate(&refs, usize::MAX, size(10));
        assert!(last.is_empty());
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let refs: Vec<&u8> = Vec::new();
        let page = paginate(&refs, 0, size(10));
        assert_eq!(page.page_count(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every page fits the page size and pages sum to the total.
            #[test]
            fn pages_partition_the_input(len in 0usize..300, page_size in 1usize..60) {
                let data: Vec<usize> = (0..len).collect();
                let refs: Vec<&usize> = data.iter().collect();
                let size = NonZeroUsize::new(page_size).unwrap();

                let pages = paginate(&refs, 0, size).page_count();
                let mut seen = 0;
                for p in 0..=pages {
                    let page = paginate(&refs, p, size);
                    prop_assert!(page.rows.len() <= page_size);
                    seen += page.rows.len();
                }
                prop_assert_eq!(seen, len);
            }
        }
    }
}
