//! Paginated, filterable key-browser state machine.
//!
//! The controller owns the pagination cursor and filter text. Every issued
//! query carries a monotonically increasing sequence number; a result is
//! applied only when its sequence matches the most recently issued query, so
//! a slow early page load can never clobber a faster later one
//! (last-request-wins).

use serde::Deserialize;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 50;

/// Cursor and filter owned by the controller. Mutated only by explicit
/// transitions; the page resets to 1 whenever the filter is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    page: u64,
    page_size: usize,
    filter: String,
}

impl ListingState {
    fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            filter: String::new(),
        }
    }

    /// Current 1-based page cursor.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Current filter text (empty means unfiltered).
    pub fn filter(&self) -> &str {
        &self.filter
    }
}

/// One key/value row from the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyRow {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A full listing reply. Replaces the previous rows wholesale; never merged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingResult {
    pub keys: Vec<KeyRow>,
    /// Page echoed by the service, which may differ from the local cursor
    /// when the service clamps.
    pub page: u64,
}

/// A sequence-tagged query to issue against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub seq: u64,
    pub page: u64,
    pub page_size: usize,
    /// Included only when non-empty.
    pub filter: Option<String>,
}

/// What the key browser currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingView {
    /// No query has completed yet.
    #[default]
    Pending,
    /// Rows from the latest applied result, with the service-echoed page.
    /// An empty `rows` renders as "no rows", not as an error.
    Rows { rows: Vec<KeyRow>, page: u64 },
    /// Inline error; pagination state is untouched so the user can retry.
    Failed(String),
}

/// State machine driving the key browser.
#[derive(Debug, Clone)]
pub struct ListingController {
    state: ListingState,
    latest_seq: u64,
    view: ListingView,
}

impl ListingController {
    /// Initial state: page 1, empty filter, nothing rendered yet.
    pub fn new(page_size: usize) -> Self {
        Self {
            state: ListingState::new(page_size),
            latest_seq: 0,
            view: ListingView::default(),
        }
    }

    /// The owned cursor and filter.
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// The currently rendered view.
    pub fn view(&self) -> &ListingView {
        &self.view
    }

    /// Replace the filter, reset to page 1, and issue a query.
    pub fn set_filter_and_reload(&mut self, text: impl Into<String>) -> ListingQuery {
        self.state.filter = text.into();
        self.state.page = 1;
        self.issue()
    }

    /// Advance the cursor and issue a query. No upper bound is enforced;
    /// an out-of-range page yields an empty result set from the service.
    pub fn next_page(&mut self) -> ListingQuery {
        self.state.page += 1;
        self.issue()
    }

    /// Step the cursor back and issue a query. No-op at page 1.
    pub fn prev_page(&mut self) -> Option<ListingQuery> {
        if self.state.page <= 1 {
            return None;
        }
        self.state.page -= 1;
        Some(self.issue())
    }

    /// Re-issue a query with the current state unchanged.
    pub fn reload(&mut self) -> ListingQuery {
        self.issue()
    }

    fn issue(&mut self) -> ListingQuery {
        self.latest_seq += 1;
        ListingQuery {
            seq: self.latest_seq,
            page: self.state.page,
            page_size: self.state.page_size,
            filter: (!self.state.filter.is_empty()).then(|| self.state.filter.clone()),
        }
    }

    /// Apply a successful result. Returns `false` (and leaves the view
    /// untouched) when a newer query has been issued since `seq`.
    pub fn apply_success(&mut self, seq: u64, result: ListingResult) -> bool {
        if seq != self.latest_seq {
            tracing::warn!(seq, latest = self.latest_seq, "discarding stale listing result");
            return false;
        }
        self.view = ListingView::Rows {
            rows: result.keys,
            page: result.page,
        };
        true
    }

    /// Apply a failed result. Stale failures are discarded the same way;
    /// a rendered failure leaves the cursor and filter unchanged.
    pub fn apply_error(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.latest_seq {
            tracing::warn!(seq, latest = self.latest_seq, "discarding stale listing error");
            return false;
        }
        self.view = ListingView::Failed(message.into());
        true
    }
}

impl Default for ListingController {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
