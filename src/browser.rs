use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::domain::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES, SVError};
use crate::record::{Cell, Record, render_cell};

/// Filter value that disables filtering on a column.
pub const ALL_OPTION: &str = "all";
pub const NO_MATCHES_TEXT: &str = "No matching records found";
pub const ACTIONS_HEADER: &str = "Actions";

// Up to this many pages every page number is shown.
const FULL_PAGE_LIST_LIMIT: usize = 5;

pub type CellRenderer = Box<dyn Fn(&Record, &str) -> String + Send + Sync>;
pub type RowActions = Box<dyn Fn(&Record) -> String + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A closed set of options for one column, plus the implicit `all` option.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub column: String,
    pub options: Vec<FilterOption>,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            column: column.into(),
            options,
        }
    }

    /// Builds the options from the distinct, non-empty values a column takes in `records`.
    pub fn from_records(column: &str, records: &[Record]) -> Self {
        let mut seen = HashSet::new();
        let mut values: Vec<&Cell> = records
            .iter()
            .filter_map(|r| r.get(column))
            .filter(|cell| !cell.is_nested() && !cell.stringify().is_empty())
            .filter(|cell| seen.insert(cell.stringify()))
            .collect();
        values.sort_by(|a, b| compare_cells(Some(*a), Some(*b)));

        let options = values
            .into_iter()
            .map(|cell| {
                let value = cell.stringify();
                FilterOption::new(value.clone(), value)
            })
            .collect();
        Self::new(column, options)
    }

    pub fn with_labels(mut self, label: impl Fn(&str) -> String) -> Self {
        for option in self.options.iter_mut() {
            option.label = label(&option.value);
        }
        self
    }

    pub fn label_for(&self, value: &str) -> String {
        if value == ALL_OPTION {
            return "All".to_string();
        }
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string())
    }
}

/// Ephemeral view state owned by one browser.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub filters: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortOrder {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<Vec<String>>),
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterView {
    pub column: String,
    pub value: String,
    pub label: String,
}

/// Everything a renderer needs to draw the browser once.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserView {
    pub header: Vec<String>,
    pub body: TableBody,
    pub page: usize,
    pub total_pages: usize,
    pub page_items: Vec<PageItem>,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub first_shown: usize,
    pub last_shown: usize,
    pub search: String,
    pub filters: Vec<FilterView>,
    pub sort: Option<SortOrder>,
}

/// Searchable, filterable, sortable and paginated view over an in-memory record set.
pub struct Browser {
    columns: Vec<String>,
    data: Vec<Record>,
    filters: Vec<FilterSpec>,
    state: PageState,
    page_sizes: Vec<usize>,
    sort: Option<SortOrder>,
    rows: Arc<Vec<usize>>, // Indices into data that pass search and filters, in display order.
    cell_renderer: CellRenderer,
    row_actions: Option<RowActions>,
}

impl Browser {
    pub fn new(columns: Vec<String>, data: Vec<Record>) -> Result<Self, SVError> {
        if columns.is_empty() {
            return Err(SVError::NoColumns);
        }
        let mut browser = Self {
            columns,
            data,
            filters: Vec::new(),
            state: PageState {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
                search: String::new(),
                filters: HashMap::new(),
            },
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            sort: None,
            rows: Arc::new(Vec::new()),
            cell_renderer: Box::new(render_cell),
            row_actions: None,
        };
        browser.recompute();
        Ok(browser)
    }

    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_cell_renderer(
        mut self,
        renderer: impl Fn(&Record, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell_renderer = Box::new(renderer);
        self
    }

    pub fn with_row_actions(
        mut self,
        actions: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        self.row_actions = Some(Box::new(actions));
        self
    }

    /// Sets the selectable page sizes. The default size joins the set if missing, zero is dropped.
    pub fn with_page_sizes(mut self, sizes: &[usize], default_size: usize) -> Self {
        let mut sizes: Vec<usize> = sizes.iter().copied().filter(|&s| s > 0).collect();
        let default_size = if default_size > 0 {
            default_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        if !sizes.contains(&default_size) {
            sizes.push(default_size);
        }
        sizes.sort_unstable();
        sizes.dedup();
        self.page_sizes = sizes;
        self.state.page_size = default_size;
        self.state.page = 1;
        self.clamp_page();
        self
    }

    // ------------------------------ Accessors ------------------------------ //

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn sort(&self) -> Option<&SortOrder> {
        self.sort.as_ref()
    }

    pub fn total_count(&self) -> usize {
        self.data.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.state.page_size)
    }

    /// All records that pass search and filters, in display order.
    pub fn filtered_records(&self) -> Vec<&Record> {
        self.rows.iter().map(|&idx| &self.data[idx]).collect()
    }

    /// Records of the current page.
    pub fn page_records(&self) -> Vec<&Record> {
        self.page_indices()
            .iter()
            .map(|&idx| &self.data[idx])
            .collect()
    }

    pub fn page_record(&self, position: usize) -> Option<&Record> {
        self.page_indices()
            .get(position)
            .map(|&idx| &self.data[idx])
    }

    fn page_indices(&self) -> &[usize] {
        let begin = (self.state.page - 1) * self.state.page_size;
        if begin >= self.rows.len() {
            return &[];
        }
        let end = std::cmp::min(begin + self.state.page_size, self.rows.len());
        &self.rows[begin..end]
    }

    // ----------------------------- Operations ----------------------------- //

    /// Replaces the record set. Search, filters and sort stay, the page is clamped.
    pub fn set_data(&mut self, data: Vec<Record>) {
        self.data = data;
        self.recompute();
    }

    pub fn set_search(&mut self, term: &str) {
        if self.state.search == term {
            return;
        }
        self.state.search = term.to_string();
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_filter(&mut self, column: &str, value: &str) {
        if value == ALL_OPTION {
            self.state.filters.remove(column);
        } else {
            self.state
                .filters
                .insert(column.to_string(), value.to_string());
        }
        self.state.page = 1;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.page = 1;
        self.recompute();
    }

    pub fn selected_filter(&self, column: &str) -> &str {
        self.state
            .filters
            .get(column)
            .map(String::as_str)
            .unwrap_or(ALL_OPTION)
    }

    /// Advances the filter at `index` to its next option, wrapping back to `all`.
    pub fn cycle_filter(&mut self, index: usize) -> Option<String> {
        let spec = self.filters.get(index)?;
        let current = self.selected_filter(&spec.column);
        let choices: Vec<&str> = std::iter::once(ALL_OPTION)
            .chain(spec.options.iter().map(|o| o.value.as_str()))
            .collect();
        let position = choices.iter().position(|&c| c == current).unwrap_or(0);
        let next = choices[(position + 1) % choices.len()].to_string();
        let column = spec.column.clone();
        self.set_filter(&column, &next);
        Some(next)
    }

    /// Switches to `size` if it is one of the selectable sizes. Always goes back to page 1.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.page_sizes.contains(&size) {
            return false;
        }
        self.state.page_size = size;
        self.state.page = 1;
        self.clamp_page();
        true
    }

    pub fn cycle_page_size(&mut self) -> usize {
        let position = self
            .page_sizes
            .iter()
            .position(|&s| s == self.state.page_size)
            .unwrap_or(0);
        let next = self.page_sizes[(position + 1) % self.page_sizes.len()];
        self.set_page_size(next);
        next
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.state.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages());
    }

    pub fn sort_by(&mut self, column: &str, ascending: bool) {
        self.sort = Some(SortOrder {
            column: column.to_string(),
            ascending,
        });
        self.state.page = 1;
        self.recompute();
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.state.page = 1;
        self.recompute();
    }

    // Re-evaluates search and filters over the full data set, then keeps the page in range.
    fn recompute(&mut self) {
        let start_time = Instant::now();
        let term = self.state.search.to_lowercase();
        let filters = &self.state.filters;
        let data = &self.data;

        let mut rows: Vec<usize> = (0..data.len())
            .into_par_iter()
            .filter(|&idx| matches_search(&data[idx], &term) && matches_filters(&data[idx], filters))
            .collect();

        if let Some(order) = &self.sort {
            rows.sort_by(|&a, &b| {
                let (x, y) = (data[a].get(&order.column), data[b].get(&order.column));
                // Only values of the same kind swap places when descending
                match sort_group(x).cmp(&sort_group(y)) {
                    Ordering::Equal if order.ascending => compare_cells(x, y),
                    Ordering::Equal => compare_cells(x, y).reverse(),
                    by_group => by_group,
                }
            });
        }

        trace!(
            "Filtered {} of {} records in {}µs",
            rows.len(),
            data.len(),
            start_time.elapsed().as_micros()
        );
        self.rows = Arc::new(rows);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let last = std::cmp::max(1, self.total_pages());
        if self.state.page > last {
            debug!("Clamping page {} to {}", self.state.page, last);
            self.state.page = last;
        }
        if self.state.page < 1 {
            self.state.page = 1;
        }
    }

    pub fn view(&self) -> BrowserView {
        let mut header = self.columns.clone();
        if self.row_actions.is_some() {
            header.push(ACTIONS_HEADER.to_string());
        }

        let records = self.page_records();
        let body = if records.is_empty() {
            TableBody::NoMatches
        } else {
            TableBody::Rows(
                records
                    .iter()
                    .map(|record| {
                        let mut cells: Vec<String> = self
                            .columns
                            .iter()
                            .map(|column| (self.cell_renderer)(record, column))
                            .collect();
                        if let Some(actions) = &self.row_actions {
                            cells.push(actions(record));
                        }
                        cells
                    })
                    .collect(),
            )
        };

        let total_pages = self.total_pages();
        let (first_shown, last_shown) = if records.is_empty() {
            (0, 0)
        } else {
            let first = (self.state.page - 1) * self.state.page_size + 1;
            (first, first + records.len() - 1)
        };

        let filters = self
            .filters
            .iter()
            .map(|spec| {
                let value = self.selected_filter(&spec.column).to_string();
                FilterView {
                    column: spec.column.clone(),
                    label: spec.label_for(&value),
                    value,
                }
            })
            .collect();

        BrowserView {
            header,
            body,
            page: self.state.page,
            total_pages,
            page_items: page_items(self.state.page, total_pages),
            page_size: self.state.page_size,
            page_sizes: self.page_sizes.clone(),
            filtered_count: self.rows.len(),
            total_count: self.data.len(),
            first_shown,
            last_shown,
            search: self.state.search.clone(),
            filters,
            sort: self.sort.clone(),
        }
    }
}

/// True if any primitive field contains `term_lowercase`. Nested payloads are skipped.
pub fn matches_search(record: &Record, term_lowercase: &str) -> bool {
    if term_lowercase.is_empty() {
        return true;
    }
    record
        .iter()
        .filter(|(_, cell)| !cell.is_nested())
        .any(|(_, cell)| cell.stringify().to_lowercase().contains(term_lowercase))
}

/// True if every active (non-`all`) filter equals the stringified field exactly.
pub fn matches_filters(record: &Record, filters: &HashMap<String, String>) -> bool {
    filters
        .iter()
        .filter(|(_, value)| value.as_str() != ALL_OPTION)
        .all(|(column, value)| record.text(column).is_some_and(|text| text == *value))
}

/// Page numbers to render. Beyond five pages the list is compressed around `current` with ellipses.
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total <= FULL_PAGE_LIST_LIMIT {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }
    let window_begin = std::cmp::max(2, current.saturating_sub(1));
    let window_end = std::cmp::min(total - 1, current + 1);
    for page in window_begin..=window_end {
        items.push(PageItem::Page(page));
    }
    if current + 2 < total {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

// Numbers order numerically and come before everything else, NaN after all other numbers.
// The rest orders as text.
fn compare_cells(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    match (a, b) {
        (Some(Cell::Number(x)), Some(Cell::Number(y))) => match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => x.total_cmp(y),
        },
        (Some(Cell::Number(_)), _) => Ordering::Less,
        (_, Some(Cell::Number(_))) => Ordering::Greater,
        (a, b) => {
            let a = a.map(Cell::stringify).unwrap_or_default();
            let b = b.map(Cell::stringify).unwrap_or_default();
            a.cmp(&b)
        }
    }
}

// Numbers, then NaN, then everything else. Kept in this order in both sort directions.
fn sort_group(cell: Option<&Cell>) -> u8 {
    match cell {
        Some(Cell::Number(n)) if n.is_nan() => 1,
        Some(Cell::Number(_)) => 0,
        _ => 2,
    }
}
