//! Mock data source standing in for a dashboard API.
//!
//! The dataset is embedded at compile time. A load waits for the configured
//! artificial latency, parses and validates the snapshot, audits the
//! pre-computed aggregates, and scales magnitudes to the selected filters.

use thiserror::Error;
use tracing::{debug, warn};

use super::{
    config::DashboardConfig,
    filters::FilterState,
    model::{DashboardSnapshot, InvalidField},
    timing,
};

const MOCK_DATASET: &str = include_str!("../../assets/data/mock_dashboard.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset failed validation: {0}")]
    Invalid(#[from] InvalidField),
}

pub async fn load_dashboard(
    filters: FilterState,
    config: DashboardConfig,
) -> Result<DashboardSnapshot, LoadError> {
    timing::sleep_ms(config.load_delay_ms).await;
    let snapshot = parse_snapshot(MOCK_DATASET)?;
    debug!(?filters, "dashboard snapshot loaded");
    Ok(apply_filters(snapshot, &filters))
}

/// Parse and validate a snapshot; aggregate drift is logged, not rejected.
pub fn parse_snapshot(raw: &str) -> Result<DashboardSnapshot, LoadError> {
    let snapshot: DashboardSnapshot = serde_json::from_str(raw)?;
    snapshot.validate()?;
    for drift in snapshot.audit() {
        warn!("aggregate drift in dashboard data: {drift}");
    }
    Ok(snapshot)
}

/// Scale magnitudes to the share of the dataset covered by `filters`.
///
/// Deltas and ratios are left untouched so pre-computed change percentages
/// and region totals stay consistent with the scaled raw values.
pub fn apply_filters(mut snapshot: DashboardSnapshot, filters: &FilterState) -> DashboardSnapshot {
    if filters.is_unfiltered() {
        return snapshot;
    }
    let factor = filters.coverage();

    for kpi in &mut snapshot.kpis {
        kpi.value *= factor;
    }
    for item in &mut snapshot.revenue_total {
        item.mtd *= factor;
    }
    for item in &mut snapshot.broadband_pack {
        item.previous *= factor;
        item.current *= factor;
    }
    for region in &mut snapshot.revenue_driver {
        region.total *= factor;
        for bucket in &mut region.buckets {
            bucket.mtd *= factor;
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::FilterField;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn instant_config() -> DashboardConfig {
        DashboardConfig {
            load_delay_ms: 0,
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn embedded_dataset_is_consistent() {
        let snapshot = parse_snapshot(MOCK_DATASET).unwrap();
        assert_eq!(snapshot.kpis.len(), 5);
        assert_eq!(snapshot.broadband_pack.len(), 5);
        assert_eq!(snapshot.revenue_driver.len(), 4);
        assert!(snapshot.audit().is_empty());
    }

    #[test]
    fn unfiltered_load_returns_dataset_verbatim() {
        let snapshot = block_on(load_dashboard(FilterState::default(), instant_config())).unwrap();
        assert_eq!(snapshot, parse_snapshot(MOCK_DATASET).unwrap());
    }

    #[test]
    fn filtered_load_scales_magnitudes_only() {
        let filters = FilterState::default().with(FilterField::Regional, "Area 1");
        let base = parse_snapshot(MOCK_DATASET).unwrap();
        let scaled = block_on(load_dashboard(filters.clone(), instant_config())).unwrap();

        let factor = filters.coverage();
        assert!((scaled.kpis[0].value - base.kpis[0].value * factor).abs() < 1e-9);
        assert_eq!(scaled.kpis[0].mom, base.kpis[0].mom);
        assert_eq!(
            scaled.broadband_pack[0].change_pct,
            base.broadband_pack[0].change_pct
        );
        assert!(scaled.audit().is_empty());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let err = parse_snapshot("{\"kpis\": 3}").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn negative_magnitude_is_rejected() {
        let raw = r#"{ "kpis": [], "revenue_total": [{ "name": "SMS", "mtd": -1.0, "mom": 0.0, "ytd": 0.0 }],
                       "broadband_pack": [], "revenue_driver": [] }"#;
        let err = parse_snapshot(raw).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(field) if field.path == "revenue_total[0].mtd"));
    }
}
