//! CLI command implementations.

pub(crate) mod barrels;
pub(crate) mod pace;
pub(crate) mod predict;
pub(crate) mod sessions;
