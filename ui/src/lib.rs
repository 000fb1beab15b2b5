//! Shared crate for Pulseboard: metric formatting, the bar-chart renderer,
//! the mock data source and the Dioxus dashboard built on top of them.

pub mod chart;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;
