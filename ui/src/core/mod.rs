//! Platform-agnostic dashboard logic: formatting, data model, loading.

pub mod config;
pub mod filters;
pub mod format;
pub mod loader;
pub mod model;
pub mod platform;
pub mod sparkline;
pub mod timing;
