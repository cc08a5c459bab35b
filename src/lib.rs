//! Operator console for an LSM key-value storage service.
//!
//! The storage engine (memtable, SST files, compaction) is an external
//! service reached over HTTP; this crate is the client-side interaction
//! layer: it issues PUT/GET requests, mirrors store statistics, keeps a
//! bounded recent-activity log, and drives a paginated, filterable key
//! browser. The state machines are view-independent; the bundled binary
//! projects them onto a terminal.
//!
//! # Quick Start
//!
//! ```ignore
//! use lsm_console::{Config, Console};
//!
//! let mut console = Console::new(&Config::default());
//! console.initial_load().await;
//! console.put("a", "1").await;
//! console.get("a").await;
//! println!("{}", console.render());
//! ```
//!
//! # Modules
//!
//! - [`classify`] - Three-way classification of service replies
//! - [`activity`] - Bounded recent-activity log
//! - [`gate`] - Per-control request gating with scoped release
//! - [`listing`] - Paginated key browser with last-request-wins
//! - [`stats`] - Stats fetch mirrored to registered sinks
//! - [`client`] - HTTP client for the four service endpoints
//! - [`console`] - Orchestration and view projection
//! - [`config`] - TOML configuration

pub mod activity;
pub mod classify;
pub mod client;
pub mod config;
pub mod console;
pub mod gate;
pub mod listing;
pub mod stats;

mod error;

// Re-export the unified error type
pub use error::{ConsoleError, Result};

// Re-export the main entry points at crate root for convenience
pub use activity::{ActivityEntry, ActivityLog, ActivityOutcome, RECENT_LIMIT};
pub use classify::{Outcome, classify};
pub use client::StoreClient;
pub use config::{Config, ConfigError, ConsoleConfig, ServiceConfig};
pub use console::{Console, ConsoleView};
pub use gate::{Control, ControlHandle};
pub use listing::{KeyRow, ListingController, ListingQuery, ListingResult, ListingView, PAGE_SIZE};
pub use stats::{
    SharedStatsPanel, StatsPanel, StatsSink, StatsSnapshot, StatsSynchronizer, UNAVAILABLE, UNKNOWN,
};
