//! Console orchestration.
//!
//! Ties the gate, client, classifier, activity log, listing controller and
//! stats synchronizer into per-command handlers, and owns the view model the
//! binary projects onto the terminal. Handlers compute the next view state;
//! [`Console::render`] is the only place that turns state into text.
//!
//! Control flow: user action, gate acquires the originating control, the
//! service round-trip runs, the reply is classified, the activity log records
//! the outcome, the view updates, and the gate releases the control. No
//! handler ever propagates a failure; every path ends in a view update.

use std::fmt::Write as _;

use serde_json::Value;

use crate::activity::{ActivityEntry, ActivityLog, ActivityOutcome};
use crate::classify::Outcome;
use crate::client::StoreClient;
use crate::config::Config;
use crate::gate::{self, ControlHandle};
use crate::listing::{ListingController, ListingQuery, ListingResult, ListingView};
use crate::stats::{SharedStatsPanel, StatsPanel, StatsSynchronizer};

/// Busy indicator shown on a gated control while its request is in flight.
const BUSY_LABEL: &str = "...";

/// View model for the PUT and GET regions. The listing and stats regions
/// live on their own controllers and sinks.
#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    /// PUT key input; cleared on a successful save.
    pub put_key: String,
    /// PUT value input; cleared on a successful save.
    pub put_value: String,
    /// Raw result area under the PUT form.
    pub put_result: String,
    /// One-line save status, e.g. "[ok] Key saved: a".
    pub put_status: String,
    /// GET key input.
    pub get_key: String,
    /// Raw result area under the GET form.
    pub get_result: String,
    /// Not-found indicator. Distinct from error styling: an absent key is a
    /// successful lookup.
    pub get_not_found: bool,
    /// Error styling on the GET region. Never set for a not-found reply.
    pub get_error: bool,
}

/// The operator console for one storage service.
pub struct Console {
    client: StoreClient,
    activity: ActivityLog,
    listing: ListingController,
    stats: StatsSynchronizer,
    stats_main: SharedStatsPanel,
    stats_side: SharedStatsPanel,
    put_button: ControlHandle,
    get_button: ControlHandle,
    view: ConsoleView,
}

impl Console {
    /// Build a console from configuration. Registers the primary and side
    /// stats panels as sinks of the same synchronizer.
    pub fn new(config: &Config) -> Self {
        let stats_main = SharedStatsPanel::default();
        let stats_side = SharedStatsPanel::default();
        let mut stats = StatsSynchronizer::new();
        stats.register(Box::new(stats_main.clone()));
        stats.register(Box::new(stats_side.clone()));

        Self {
            client: StoreClient::new(&config.service.url),
            activity: ActivityLog::new(config.console.recent_limit),
            listing: ListingController::new(config.console.page_size),
            stats,
            stats_main,
            stats_side,
            put_button: gate::control("Save"),
            get_button: gate::control("Lookup"),
            view: ConsoleView::default(),
        }
    }

    /// The recent-activity log.
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// The key-browser controller.
    pub fn listing(&self) -> &ListingController {
        &self.listing
    }

    /// The PUT/GET view regions.
    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    /// The primary stats panel.
    pub fn stats_main(&self) -> StatsPanel {
        self.stats_main.get()
    }

    /// The mirrored side-panel stats.
    pub fn stats_side(&self) -> StatsPanel {
        self.stats_side.get()
    }

    /// The PUT submit control.
    pub fn put_button(&self) -> &ControlHandle {
        &self.put_button
    }

    /// The GET submit control.
    pub fn get_button(&self) -> &ControlHandle {
        &self.get_button
    }

    /// Page-load behavior: one stats refresh and one key listing.
    pub async fn initial_load(&mut self) {
        self.refresh_stats().await;
        self.reload_keys().await;
    }

    /// Store a key/value pair. The value is required; an empty value renders
    /// inline without a service call.
    pub async fn put(&mut self, key: &str, value: &str) {
        let key = key.trim().to_string();
        let value = value.trim().to_string();
        self.view.put_key = key.clone();
        self.view.put_value = value.clone();

        if value.is_empty() {
            self.view.put_result = "value is required.".to_string();
            return;
        }

        let button = self.put_button.clone();
        gate::run(&button, BUSY_LABEL, async {
            let outcome = match self.client.put(&key, &value).await {
                Ok(outcome) => outcome,
                Err(err) => Outcome::Error(err.to_string()),
            };
            self.apply_put_outcome(&key, outcome);
        })
        .await;
    }

    fn apply_put_outcome(&mut self, key: &str, outcome: Outcome) {
        match outcome {
            // PUT replies never carry a found marker.
            Outcome::Success(body) | Outcome::NotFound(body) => {
                let saved = body
                    .get("key")
                    .and_then(Value::as_str)
                    .unwrap_or(if key.is_empty() { "(unknown)" } else { key })
                    .to_string();
                self.view.put_result = pretty(&body);
                self.view.put_status = format!("[ok] Key saved: {saved}");
                self.activity.record(ActivityEntry::new(
                    format!("PUT key={saved}"),
                    ActivityOutcome::Ok,
                ));
                // Clear both inputs so the next entry is fast.
                self.view.put_key.clear();
                self.view.put_value.clear();
            }
            Outcome::Error(message) => {
                self.view.put_result = format!("Error: {message}");
                self.view.put_status = "[!] Failed to save key".to_string();
                self.activity.record(ActivityEntry::new(
                    format!("PUT key={}", if key.is_empty() { "(generated)" } else { key }),
                    ActivityOutcome::Error(message),
                ));
            }
        }
    }

    /// Look a key up. The key is required; an empty key renders inline
    /// without a service call.
    pub async fn get(&mut self, key: &str) {
        let key = key.trim().to_string();
        self.view.get_key = key.clone();

        if key.is_empty() {
            self.view.get_result = "key is required.".to_string();
            return;
        }

        let button = self.get_button.clone();
        gate::run(&button, BUSY_LABEL, async {
            let outcome = match self.client.get(&key).await {
                Ok(outcome) => outcome,
                Err(err) => Outcome::Error(err.to_string()),
            };
            self.apply_get_outcome(&key, outcome);
        })
        .await;
    }

    fn apply_get_outcome(&mut self, key: &str, outcome: Outcome) {
        match outcome {
            Outcome::Success(body) => {
                self.view.get_result = pretty(&body);
                self.view.get_not_found = false;
                self.view.get_error = false;
                self.activity
                    .record(ActivityEntry::new(format!("GET key={key}"), ActivityOutcome::Ok));
            }
            Outcome::NotFound(body) => {
                self.view.get_result = pretty(&body);
                self.view.get_not_found = true;
                self.view.get_error = false;
                self.activity.record(ActivityEntry::new(
                    format!("GET key={key}"),
                    ActivityOutcome::NotFound,
                ));
            }
            Outcome::Error(message) => {
                self.view.get_result = format!("Error: {message}");
                self.view.get_not_found = false;
                self.view.get_error = true;
                self.activity.record(ActivityEntry::new(
                    format!("GET key={key}"),
                    ActivityOutcome::Error(message),
                ));
            }
        }
    }

    /// Refresh both stats panels.
    pub async fn refresh_stats(&mut self) {
        self.stats.refresh(&self.client).await;
    }

    /// Submit the filter: reset to page 1 and reload the listing.
    pub async fn set_filter_and_load(&mut self, text: &str) {
        let query = self.listing.set_filter_and_reload(text.trim());
        self.run_listing(query).await;
    }

    /// Load the next listing page.
    pub async fn next_page(&mut self) {
        let query = self.listing.next_page();
        self.run_listing(query).await;
    }

    /// Load the previous listing page. No-op at page 1.
    pub async fn prev_page(&mut self) {
        if let Some(query) = self.listing.prev_page() {
            self.run_listing(query).await;
        }
    }

    /// Reload the listing with cursor and filter unchanged.
    pub async fn reload_keys(&mut self) {
        let query = self.listing.reload();
        self.run_listing(query).await;
    }

    async fn run_listing(&mut self, query: ListingQuery) {
        match self.client.list_keys(&query).await {
            Ok(Outcome::Success(body)) | Ok(Outcome::NotFound(body)) => {
                match serde_json::from_value::<ListingResult>(body) {
                    Ok(result) => {
                        self.listing.apply_success(query.seq, result);
                    }
                    Err(err) => {
                        self.listing
                            .apply_error(query.seq, format!("Failed to load keys: {err}"));
                    }
                }
            }
            Ok(Outcome::Error(message)) => {
                self.listing.apply_error(query.seq, message);
            }
            Err(err) => {
                self.listing.apply_error(query.seq, err.to_string());
            }
        }
    }

    /// Record a client-side compaction marker in the activity log. No
    /// service call is made.
    pub fn simulate_compaction(&mut self) {
        self.activity
            .record(ActivityEntry::new("COMPACT", ActivityOutcome::Ok));
    }

    /// Project the whole console onto text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let main = self.stats_main.get();
        let side = self.stats_side.get();
        let _ = writeln!(out, "== Store stats ==");
        let _ = writeln!(
            out,
            "memtable size: {}  SST files: {}",
            main.memtable_size, main.num_sst_files
        );
        let _ = writeln!(
            out,
            "(side panel)   {}            {}",
            side.memtable_size, side.num_sst_files
        );

        if !self.view.put_status.is_empty() || !self.view.put_result.is_empty() {
            let _ = writeln!(out, "\n== PUT ==");
            if !self.view.put_status.is_empty() {
                let _ = writeln!(out, "{}", self.view.put_status);
            }
            if !self.view.put_result.is_empty() {
                let _ = writeln!(out, "{}", self.view.put_result);
            }
        }

        if !self.view.get_result.is_empty() {
            let _ = writeln!(out, "\n== GET ==");
            if self.view.get_not_found {
                let _ = writeln!(out, "[!] Key not found");
            }
            let _ = writeln!(out, "{}", self.view.get_result);
        }

        let _ = writeln!(out, "\n== Recent activity ==");
        if self.activity.is_empty() {
            let _ = writeln!(out, "(none)");
        }
        for entry in self.activity.iter_newest_first() {
            let _ = writeln!(out, "- {entry}");
        }

        let state = self.listing.state();
        let _ = writeln!(out, "\n== Keys (filter: {:?}) ==", state.filter());
        match self.listing.view() {
            ListingView::Pending => {
                let _ = writeln!(out, "(loading)");
            }
            ListingView::Rows { rows, page } => {
                let _ = writeln!(out, "page {page}");
                if rows.is_empty() {
                    let _ = writeln!(out, "(no rows)");
                }
                for row in rows {
                    let _ = writeln!(out, "{}\t{}", row.key, row.value.as_deref().unwrap_or(""));
                }
            }
            ListingView::Failed(message) => {
                let _ = writeln!(out, "Error: {message}");
            }
        }
        out
    }
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}
