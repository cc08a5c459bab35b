//! Store-statistics fetch and fan-out.
//!
//! Statistics are mirrored to every registered sink (a primary panel plus any
//! side panels) through one code path. A field the service omitted renders as
//! the unknown sentinel; a failed fetch renders as the unavailable sentinel on
//! every sink, so "service said nothing" and "service unreachable" stay
//! distinguishable.

use serde::Deserialize;

use std::cell::RefCell;
use std::rc::Rc;

use crate::classify::Outcome;
use crate::client::StoreClient;

/// Rendered for a field the service answered without.
pub const UNKNOWN: &str = "-";

/// Rendered on every field when the stats fetch itself failed.
pub const UNAVAILABLE: &str = "!";

/// Aggregate counters reported by the storage service. Transient; replaced
/// wholesale on each refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub memtable_size: Option<u64>,
    #[serde(default)]
    pub num_sst_files: Option<u64>,
}

/// A display surface for the two stats fields.
pub trait StatsSink {
    /// Overwrite both fields with already-rendered text.
    fn show(&mut self, memtable_size: &str, sst_files: &str);
}

/// Fetches statistics and mirrors them to every registered sink.
pub struct StatsSynchronizer {
    sinks: Vec<Box<dyn StatsSink>>,
}

impl StatsSynchronizer {
    /// A synchronizer with no sinks yet.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Register an additional display surface.
    pub fn register(&mut self, sink: Box<dyn StatsSink>) {
        self.sinks.push(sink);
    }

    /// Fetch a snapshot and write it to all sinks. Transport failures and
    /// service errors both render the unavailable sentinel; the refresh
    /// itself never fails.
    pub async fn refresh(&mut self, client: &StoreClient) {
        match client.stats().await {
            Ok(Outcome::Success(body)) | Ok(Outcome::NotFound(body)) => {
                let snapshot: StatsSnapshot = serde_json::from_value(body).unwrap_or_default();
                self.apply(snapshot);
            }
            Ok(Outcome::Error(message)) => {
                tracing::warn!(%message, "stats request failed");
                self.apply_unavailable();
            }
            Err(err) => {
                tracing::warn!(error = %err, "stats request failed in transport");
                self.apply_unavailable();
            }
        }
    }

    /// Write a completed snapshot to all sinks, substituting the unknown
    /// sentinel for absent fields.
    pub fn apply(&mut self, snapshot: StatsSnapshot) {
        let memtable = render_field(snapshot.memtable_size);
        let sst = render_field(snapshot.num_sst_files);
        for sink in &mut self.sinks {
            sink.show(&memtable, &sst);
        }
    }

    /// Write the unavailable sentinel to both fields of all sinks.
    pub fn apply_unavailable(&mut self) {
        for sink in &mut self.sinks {
            sink.show(UNAVAILABLE, UNAVAILABLE);
        }
    }
}

impl Default for StatsSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_field(value: Option<u64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |n| n.to_string())
}

/// Rendered text of one stats panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsPanel {
    pub memtable_size: String,
    pub num_sst_files: String,
}

/// A stats panel readable from outside the synchronizer. Cloning shares the
/// underlying panel, so one clone registers as a sink while another renders.
#[derive(Debug, Clone, Default)]
pub struct SharedStatsPanel(Rc<RefCell<StatsPanel>>);

impl SharedStatsPanel {
    /// Snapshot the panel's current text.
    pub fn get(&self) -> StatsPanel {
        self.0.borrow().clone()
    }
}

impl StatsSink for SharedStatsPanel {
    fn show(&mut self, memtable_size: &str, sst_files: &str) {
        let mut panel = self.0.borrow_mut();
        panel.memtable_size = memtable_size.to_string();
        panel.num_sst_files = sst_files.to_string();
    }
}
