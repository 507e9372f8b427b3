//! Storage trait boundary and JSON ledger store for the tapline keg depletion engine.
//!
//! This crate provides the collaborator boundary around the pure engine:
//!
//! - [`ConsumptionStore`], [`BarrelStore`], [`HistoryStore`] - Async lookup traits
//! - [`LedgerStore`] - In-memory implementation over a JSON [`Ledger`] document

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ledger;
mod store;

pub use ledger::{CompletedBarrel, Ledger, LedgerStore};
pub use store::{BarrelStore, ConsumptionScope, ConsumptionStore, HistoryStore, Result, StoreError};
