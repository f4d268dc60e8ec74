//! Interactive table state.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use adminconsole_core::{DomainError, DomainResult};

use crate::filter::Selection;
use crate::sort::{SortDirection, SortSpec};

/// Page sizes offered by the table footer.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Search text, filter selections, sort and page position of one table.
///
/// Changing the search text, any filter or the page size moves back to the
/// first page. Sorting keeps the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    search: String,
    filters: BTreeMap<String, Selection>,
    sort: Option<SortSpec>,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Selection for `filter_id`; filters never touched read as `All`.
    pub fn selection(&self, filter_id: &str) -> &Selection {
        const ALL: &Selection = &Selection::All;
        self.filters.get(filter_id).unwrap_or(ALL)
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 0;
    }

    pub fn set_filter(&mut self, filter_id: impl Into<String>, selection: Selection) {
        self.filters.insert(filter_id.into(), selection);
        self.page = 0;
    }

    /// Reset every filter to `All`.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
    }

    /// Only sizes from [`PAGE_SIZE_OPTIONS`] are accepted; anything else leaves
    /// the state untouched.
    pub fn set_page_size(&mut self, size: usize) -> DomainResult<()> {
        let size = NonZeroUsize::new(size)
            .filter(|n| PAGE_SIZE_OPTIONS.contains(&n.get()))
            .ok_or_else(|| {
                DomainError::field(
                    "pageSize",
                    format!("page size must be one of {PAGE_SIZE_OPTIONS:?}"),
                )
            })?;
        self.page_size = size;
        self.page = 0;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Header click: the active key flips direction, a new key starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.field == field => SortSpec {
                direction: current.direction.flipped(),
                ..current
            },
            _ => SortSpec {
                field: field.to_string(),
                direction: SortDirection::Asc,
            },
        });
    }
}
