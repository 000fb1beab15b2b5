//! Dashboard records as delivered by the data loader.
//!
//! Records are immutable snapshots: a load cycle replaces the whole
//! [`DashboardSnapshot`]. Pre-computed fields (`change_pct`, region `total`)
//! are displayed as supplied; [`DashboardSnapshot::audit`] recomputes them
//! from the raw values and reports any drift.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::{self, ensure_finite, ensure_magnitude, ChangeClass, FormatError};

/// Achievement ratio (percent) treated as "on target".
pub const ACHIEVEMENT_TARGET_PCT: f64 = 90.0;

/// Maximum tolerated gap between a supplied `change_pct` and the derived one
/// (percentage points).
pub const CHANGE_PCT_TOLERANCE: f64 = 0.15;

/// Length-of-service buckets, newest customers first.
pub const LOS_BUCKETS: [&str; 3] = ["0-1mo", "1-6mo", ">6mo"];

/// Maximum tolerated gap between a region total and the sum of its buckets.
pub const TOTAL_TOLERANCE: f64 = 0.15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiRecord {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub ach: f64,
    pub mom: f64,
    pub ytd_or_yoy: f64,
}

impl KpiRecord {
    /// The newest-customer KPI reports year-to-date; the rest year-over-year.
    pub fn secondary_delta_label(&self) -> &'static str {
        if self.key == "paying_user_0_1" {
            "YTD"
        } else {
            "YoY"
        }
    }

    pub fn achievement_class(&self) -> ChangeClass {
        format::change_class(self.ach - ACHIEVEMENT_TARGET_PCT)
    }

    /// Width of the achievement progress bar, in percent.
    pub fn achievement_bar_pct(&self) -> f64 {
        if self.ach.is_finite() {
            self.ach.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueItem {
    pub name: String,
    pub mtd: f64,
    pub mom: f64,
    pub ytd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BroadbandPackItem {
    pub label: String,
    pub previous: f64,
    pub current: f64,
    pub change_pct: f64,
}

impl BroadbandPackItem {
    pub fn derived_change_pct(&self) -> Result<f64, FormatError> {
        format::compute_mom(self.current, self.previous)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueBucket {
    pub name: String,
    pub mtd: f64,
    pub mom: f64,
    pub yoy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueDriverRegion {
    pub name: String,
    pub buckets: Vec<RevenueBucket>,
    pub total: f64,
}

impl RevenueDriverRegion {
    pub fn bucket_sum(&self) -> f64 {
        self.buckets.iter().map(|bucket| bucket.mtd).sum()
    }

    /// Share of the region total held by `bucket`, in percent.
    pub fn bucket_share_pct(&self, bucket: &RevenueBucket) -> f64 {
        if self.total > 0.0 {
            bucket.mtd / self.total * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub kpis: Vec<KpiRecord>,
    pub revenue_total: Vec<RevenueItem>,
    pub broadband_pack: Vec<BroadbandPackItem>,
    pub revenue_driver: Vec<RevenueDriverRegion>,
}

/// A stored aggregate that disagrees with the value derived from raw data.
#[derive(Debug, Clone, PartialEq)]
pub enum Drift {
    ChangePct {
        label: String,
        supplied: f64,
        derived: f64,
    },
    RegionTotal {
        region: String,
        supplied: f64,
        derived: f64,
    },
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Drift::ChangePct {
                label,
                supplied,
                derived,
            } => write!(
                f,
                "broadband pack `{label}`: changePct {supplied:.2} vs derived {derived:.2}"
            ),
            Drift::RegionTotal {
                region,
                supplied,
                derived,
            } => write!(
                f,
                "region `{region}`: total {supplied:.2} vs bucket sum {derived:.2}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {source}")]
pub struct InvalidField {
    pub path: String,
    #[source]
    pub source: FormatError,
}

fn check(path: impl FnOnce() -> String, result: Result<f64, FormatError>) -> Result<(), InvalidField> {
    result.map(|_| ()).map_err(|source| InvalidField {
        path: path(),
        source,
    })
}

impl DashboardSnapshot {
    pub fn total_mtd_revenue(&self) -> f64 {
        self.revenue_total.iter().map(|item| item.mtd).sum()
    }

    pub fn total_paying_users(&self) -> f64 {
        self.revenue_driver.iter().map(|region| region.total).sum()
    }

    /// Sum of the named LoS bucket across every region (missing buckets count as 0).
    pub fn bucket_total(&self, bucket_name: &str) -> f64 {
        self.revenue_driver
            .iter()
            .filter_map(|region| region.buckets.iter().find(|b| b.name == bucket_name))
            .map(|bucket| bucket.mtd)
            .sum()
    }

    /// Per-bucket sums in [`LOS_BUCKETS`] order.
    pub fn los_totals(&self) -> [f64; 3] {
        LOS_BUCKETS.map(|name| self.bucket_total(name))
    }

    /// Reject magnitudes that are negative or non-finite and deltas that are non-finite.
    pub fn validate(&self) -> Result<(), InvalidField> {
        for (i, kpi) in self.kpis.iter().enumerate() {
            check(|| format!("kpis[{i}].value"), ensure_magnitude(kpi.value))?;
            check(|| format!("kpis[{i}].ach"), ensure_finite(kpi.ach))?;
            check(|| format!("kpis[{i}].mom"), ensure_finite(kpi.mom))?;
            check(|| format!("kpis[{i}].ytdOrYoy"), ensure_finite(kpi.ytd_or_yoy))?;
        }
        for (i, item) in self.revenue_total.iter().enumerate() {
            check(|| format!("revenue_total[{i}].mtd"), ensure_magnitude(item.mtd))?;
            check(|| format!("revenue_total[{i}].mom"), ensure_finite(item.mom))?;
            check(|| format!("revenue_total[{i}].ytd"), ensure_finite(item.ytd))?;
        }
        for (i, item) in self.broadband_pack.iter().enumerate() {
            check(|| format!("broadband_pack[{i}].previous"), ensure_magnitude(item.previous))?;
            check(|| format!("broadband_pack[{i}].current"), ensure_magnitude(item.current))?;
            check(|| format!("broadband_pack[{i}].changePct"), ensure_finite(item.change_pct))?;
        }
        for (i, region) in self.revenue_driver.iter().enumerate() {
            check(|| format!("revenue_driver[{i}].total"), ensure_magnitude(region.total))?;
            for (j, bucket) in region.buckets.iter().enumerate() {
                check(
                    || format!("revenue_driver[{i}].buckets[{j}].mtd"),
                    ensure_magnitude(bucket.mtd),
                )?;
                check(
                    || format!("revenue_driver[{i}].buckets[{j}].mom"),
                    ensure_finite(bucket.mom),
                )?;
                check(
                    || format!("revenue_driver[{i}].buckets[{j}].yoy"),
                    ensure_finite(bucket.yoy),
                )?;
            }
        }
        Ok(())
    }

    /// Compare supplied aggregates against values derived from raw fields.
    pub fn audit(&self) -> Vec<Drift> {
        let mut drifts = Vec::new();

        for item in &self.broadband_pack {
            // A zero previous value has no meaningful change ratio to compare against.
            if item.previous == 0.0 {
                continue;
            }
            if let Ok(derived) = item.derived_change_pct() {
                if (derived - item.change_pct).abs() > CHANGE_PCT_TOLERANCE {
                    drifts.push(Drift::ChangePct {
                        label: item.label.clone(),
                        supplied: item.change_pct,
                        derived,
                    });
                }
            }
        }

        for region in &self.revenue_driver {
            let derived = region.bucket_sum();
            if (derived - region.total).abs() > TOTAL_TOLERANCE {
                drifts.push(Drift::RegionTotal {
                    region: region.name.clone(),
                    supplied: region.total,
                    derived,
                });
            }
        }

        drifts
    }
}
