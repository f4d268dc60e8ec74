//! `adminconsole-view`: client-side tabular data view engine.
//!
//! Pipeline: [`RecordCollection`] → [`SearchPredicate`] → categorical
//! [`RecordFilter`]s → single-key sort → [`paginate`]. Everything here is pure
//! and synchronous; [`TableView::compute`] runs the whole pipeline for one
//! [`ViewState`].

pub mod filter;
pub mod paginate;
pub mod record;
pub mod search;
pub mod sort;
pub mod state;
pub mod table;

pub use filter::{CategoricalFilter, FnFilter, RecordFilter, Selection, apply_filter, distinct_values};
pub use paginate::{Page, paginate};
pub use record::{DynRecord, Record, RecordCollection};
pub use search::SearchPredicate;
pub use sort::{SortDirection, SortSpec, collate, compare_fields, compare_values, sort_rows};
pub use state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, ViewState};
pub use table::TableView;
