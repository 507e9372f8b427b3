//! Barrel depletion prediction for the tapline keg depletion engine.
//!
//! This crate combines historical and live pace data into predictions:
//!
//! - [`resolve_historical_pace`] - Best-matching rate from completed barrels
//! - [`DepletionPredictor`] - Status classification and empty-at estimates

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod history;
mod predictor;

pub use history::{HistoricalPace, MatchStrategy, resolve_historical_pace};
pub use predictor::{
    BarrelPrediction, BarrelStatus, DepletionPredictor, EtaEstimate, PredictError,
};
