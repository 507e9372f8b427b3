//! Keg consumption pace tracking and depletion forecasting library.
//!
//! This is a facade crate that re-exports functionality from the tapline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tapline_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = LedgerStore::from_file("party.json").await?;
//!     let series = store.series().to_string();
//!     let barrel = store.barrel_by_order(1).expect("no barrel #1 in ledger");
//!     let policy = store.embedded_policy().unwrap_or_default();
//!
//!     let service = ReportService::new(store, policy)?;
//!     let report = service
//!         .barrel_report(&series, barrel.id, chrono::Utc::now())
//!         .await?;
//!
//!     TextReportFormatter::new().write_barrel_report(&report, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tapline_types::*;

// Re-export the pace engine
#[cfg(feature = "pace")]
pub use tapline_pace::{
    CurrentPace, EventPace, EventPaceAggregator, PaceCalculator, PaceMethod, PaceReading, Session,
    segment_sessions,
};

// Re-export the depletion predictor
#[cfg(feature = "predict")]
pub use tapline_predict::{
    BarrelPrediction, BarrelStatus, DepletionPredictor, EtaEstimate, HistoricalPace, MatchStrategy,
    PredictError, resolve_historical_pace,
};

// Re-export the ledger store
#[cfg(feature = "store")]
pub use tapline_store::{
    BarrelStore, CompletedBarrel, ConsumptionScope, ConsumptionStore, HistoryStore, Ledger,
    LedgerStore, StoreError,
};

// Re-export the report layer
#[cfg(feature = "report")]
pub use tapline_report::{
    BarrelReport, CsvReportFormatter, EventReport, FormatError, JsonReportFormatter, ReportError,
    ReportFormat, ReportFormatter, ReportService, TextReportFormatter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tapline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tapline_types::{
        BarrelId, BarrelSize, BarrelSnapshot, ConsumptionEvent, EventId, HistoricalBarrelRecord,
        PacePolicy, Result, TaplineError,
    };

    #[cfg(feature = "pace")]
    pub use tapline_pace::{EventPace, EventPaceAggregator, PaceCalculator, PaceMethod, Session};

    #[cfg(feature = "predict")]
    pub use tapline_predict::{BarrelPrediction, BarrelStatus, DepletionPredictor, MatchStrategy};

    #[cfg(feature = "store")]
    pub use tapline_store::{
        BarrelStore, ConsumptionScope, ConsumptionStore, HistoryStore, Ledger, LedgerStore,
    };

    #[cfg(feature = "report")]
    pub use tapline_report::{
        BarrelReport, CsvReportFormatter, EventReport, JsonReportFormatter, ReportFormat,
        ReportFormatter, ReportService, TextReportFormatter,
    };
}
