//! Abstractions for pagination.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A page of a collection, as returned by a list endpoint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// Total number of items in the whole collection.
    pub total: u64,
}

impl<I> Default for Page<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Page-number pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arguments {
    /// 1-based number of the requested page.
    page: u32,

    /// Number of items per page.
    page_size: u32,
}

impl Arguments {
    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if either `page` or `page_size` is zero.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Option<Self> {
        (page > 0 && page_size > 0).then_some(Self { page, page_size })
    }

    /// Creates [`Arguments`] requesting the first page.
    ///
    /// [`None`] is returned if `page_size` is zero.
    #[must_use]
    pub fn first(page_size: u32) -> Option<Self> {
        Self::new(1, page_size)
    }

    /// Returns the 1-based page number requested by these [`Arguments`].
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size requested by these [`Arguments`].
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns [`Arguments`] requesting the provided page of the same size.
    #[must_use]
    pub const fn nth(&self, page: NonZeroU32) -> Self {
        Self {
            page: page.get(),
            page_size: self.page_size,
        }
    }

    /// Indicates whether a collection of `total` items has more items after
    /// the page requested by these [`Arguments`].
    #[must_use]
    pub fn has_more(&self, total: u64) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < total
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroU32;

    use super::{Arguments, Page};

    #[test]
    fn rejects_zero_arguments() {
        assert!(Arguments::new(0, 10).is_none());
        assert!(Arguments::new(1, 0).is_none());
        assert!(Arguments::first(10).is_some());
    }

    #[test]
    fn has_more_until_total_is_covered() {
        let first = Arguments::first(10).unwrap();

        assert!(first.has_more(25));
        assert!(Arguments::new(2, 10).unwrap().has_more(25));
        assert!(!Arguments::new(3, 10).unwrap().has_more(25));

        assert!(!first.has_more(10));
        assert!(!first.has_more(0));
        assert!(first.has_more(11));
    }

    #[test]
    fn nth_keeps_page_size() {
        let nth = Arguments::first(20)
            .unwrap()
            .nth(NonZeroU32::new(3).unwrap());
        assert_eq!((nth.page(), nth.page_size()), (3, 20));
    }

    #[test]
    fn deserializes_list_shape() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items": [1, 2, 3], "total": 30}"#)
                .unwrap();
        assert_eq!(page.items, [1, 2, 3]);
        assert_eq!(page.total, 30);
    }

    #[test]
    fn serializes_as_query() {
        let args = Arguments::new(3, 20).unwrap();
        assert_eq!(
            serde_json::to_string(&args).unwrap(),
            r#"{"page":3,"pageSize":20}"#,
        );
    }
}
