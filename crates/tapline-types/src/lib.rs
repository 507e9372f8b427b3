//! Core types for the tapline keg consumption tracker.
//!
//! This crate provides the fundamental data structures used throughout
//! tapline:
//!
//! - [`ConsumptionEvent`] - A single recorded drink with timestamp and flags
//! - [`BarrelSnapshot`] - Point-in-time view of a keg and its remaining units
//! - [`BarrelSize`] - The three legal keg sizes (15/30/50 litres)
//! - [`HistoricalBarrelRecord`] - Rate reference from a fully depleted barrel
//! - [`PacePolicy`] - Caller-supplied thresholds steering pace computation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod barrel;
mod error;
mod event;
mod history;
mod policy;

pub use barrel::{BarrelSize, BarrelSizeError, BarrelSnapshot};
pub use error::{PolicyError, Result, SnapshotError, TaplineError};
pub use event::{BarrelId, ConsumptionEvent, EventId};
pub use history::HistoricalBarrelRecord;
pub use policy::PacePolicy;
