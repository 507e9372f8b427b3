//! Consumption pace calculation for the tapline keg depletion engine.
//!
//! This crate provides the two pace engines:
//!
//! - [`PaceCalculator`] - Rolling-window vs from-start pace with warm-up selection
//! - [`EventPaceAggregator`] - Session segmentation and event-wide activity metrics

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod session;
mod window;

pub use session::{EventPace, EventPaceAggregator, Session, segment_sessions};
pub use window::{CurrentPace, PaceCalculator, PaceMethod, PaceReading};
