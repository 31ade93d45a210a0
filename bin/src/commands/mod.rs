//! CLI command implementations.

pub(crate) mod estimate;
pub(crate) mod history;
pub(crate) mod locations;
pub(crate) mod predict;
pub(crate) mod serve;
