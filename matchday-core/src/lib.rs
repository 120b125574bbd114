//! Core of matchday: turning scraped schedule text into calendar events.
//!
//! - `normalize` extracts canonical dates from raw text fragments
//! - `date_set` deduplicates them
//! - `reconcile` decides, per date, whether an event must be created
//! - `sync` drives a whole run against a [`Calendar`] backend
//!
//! Fetching the page and talking to a concrete calendar service live in
//! the outer crates; this one only sees strings and the [`Calendar`] trait.

pub mod calendar;
pub mod date;
pub mod date_set;
pub mod error;
pub mod event;
pub mod normalize;
pub mod reconcile;
pub mod sync;

pub use calendar::Calendar;
pub use date::CanonicalDate;
pub use date_set::DateSet;
pub use error::{MatchdayError, MatchdayResult};
pub use event::{AllDayEvent, EventRef};
pub use normalize::DateNormalizer;
pub use reconcile::{ReconciliationEngine, SyncOutcome};
pub use sync::{DateOutcome, Ingest, RejectedFragment, SyncDriver, SyncReport};
