//! Table composition: collection → search → filters → sort → page.

use crate::filter::{RecordFilter, apply_filter};
use crate::paginate::{Page, paginate};
use crate::search::SearchPredicate;
use crate::sort::sort_rows;
use crate::state::ViewState;
use crate::Record;

/// Static description of a table: which fields are searched and which
/// filters exist. Per-interaction values live in [`ViewState`].
pub struct TableView<R> {
    search_fields: Vec<String>,
    filters: Vec<Box<dyn RecordFilter<R>>>,
}

impl<R> Default for TableView<R> {
    fn default() -> Self {
        Self {
            search_fields: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl<R: Record> TableView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_on<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Register a filter; filters run in registration order.
    pub fn with_filter(mut self, filter: impl RecordFilter<R> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn filter_ids(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.id())
    }

    /// All rows that survive search and filters, in sorted order.
    pub fn filtered<'a>(&self, records: &'a [R], state: &ViewState) -> Vec<&'a R> {
        let search = SearchPredicate::new(state.search(), self.search_fields.iter().cloned());
        let mut rows = search.apply(records.iter().collect());

        for filter in &self.filters {
            rows = apply_filter(rows, filter.as_ref(), state.selection(filter.id()));
        }

        if let Some(spec) = state.sort() {
            sort_rows(&mut rows, spec);
        }
        rows
    }

    /// The page currently selected by `state`.
    pub fn compute<'a>(&self, records: &'a [R], state: &ViewState) -> Page<'a, R> {
        let rows = self.filtered(records, state);
        paginate(&rows, state.page(), state.page_size())
    }
}
