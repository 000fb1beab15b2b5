use dioxus::prelude::*;

use crate::{
    core::{
        format,
        model::{RevenueBucket, RevenueDriverRegion},
    },
    dashboard::delta_class,
    i18n, t,
};

/// Segment classes of the LoS distribution bar, newest bucket first.
const SEGMENT_CLASSES: [&str; 3] = ["segment--new", "segment--mid", "segment--loyal"];

#[component]
fn BucketCard(bucket: RevenueBucket, unit: String) -> Element {
    i18n::use_language_marker();

    rsx! {
        div { class: "bucket-card",
            div { class: "bucket-card__header",
                span { class: "font-medium", "{bucket.name}" }
                span { class: "font-bold", {format::display_number_with_unit(bucket.mtd, &unit)} }
            }
            div { class: "bucket-card__deltas",
                div {
                    span { class: "text-muted block", {t!("driver-mom")} }
                    span { class: "font-semibold {delta_class(bucket.mom)}", {format::display_pct(bucket.mom)} }
                }
                div {
                    span { class: "text-muted block", {t!("driver-yoy")} }
                    span { class: "font-semibold {delta_class(bucket.yoy)}", {format::display_pct(bucket.yoy)} }
                }
            }
        }
    }
}

#[component]
fn RegionCard(region: RevenueDriverRegion, unit: String) -> Element {
    i18n::use_language_marker();

    let segments: Vec<(String, f64, &'static str)> = region
        .buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| {
            let class = SEGMENT_CLASSES.get(index).copied().unwrap_or("segment--other");
            (bucket.name.clone(), region.bucket_share_pct(bucket), class)
        })
        .collect();

    rsx! {
        div { class: "card-elevated region-card",
            div { class: "region-card__header",
                h4 { class: "region-card__name", "{region.name}" }
                div { class: "text-right",
                    div { class: "text-muted", {t!("driver-total")} }
                    div { class: "region-card__total", {format::display_number_with_unit(region.total, &unit)} }
                }
            }

            div { class: "region-card__buckets",
                for bucket in region.buckets.iter().cloned() {
                    BucketCard { key: "{bucket.name}", bucket: bucket.clone(), unit: unit.clone() }
                }
            }

            div { class: "los-distribution",
                div { class: "text-muted text-xs", {t!("driver-los")} }
                div { class: "los-bar",
                    for (name, share, class) in segments {
                        div {
                            key: "{name}",
                            class: "los-bar__segment {class}",
                            style: "width: {share}%",
                            title: "{name}: {format::display_ratio(share)}",
                        }
                    }
                }
                div { class: "los-distribution__legend text-muted text-xs",
                    span { {t!("driver-new-users")} }
                    span { {t!("driver-loyal-users")} }
                }
            }
        }
    }
}

#[component]
pub fn RevenueDriver(
    regions: Vec<RevenueDriverRegion>,
    total_paying_users: f64,
    los_totals: [f64; 3],
    unit: String,
) -> Element {
    i18n::use_language_marker();

    let los_labels = [t!("driver-los-0-1"), t!("driver-los-1-6"), t!("driver-los-6-plus")];

    rsx! {
        div { class: "card-analytics revenue-driver",
            div { class: "card-header",
                h3 { class: "card-title", {t!("driver-title")} }
                div { class: "text-right",
                    div { class: "text-muted", {t!("driver-paying-users")} }
                    div { class: "headline-figure", {format::display_number_with_unit(total_paying_users, &unit)} }
                }
            }

            p { class: "text-muted", {t!("driver-subtitle")} }

            div { class: "region-grid",
                for region in regions {
                    RegionCard { key: "{region.name}", region: region.clone(), unit: unit.clone() }
                }
            }

            div { class: "card-footer los-totals",
                for (label, total) in los_labels.into_iter().zip(los_totals) {
                    div { key: "{label}",
                        div { class: "text-muted", "{label}" }
                        div { class: "font-bold", {format::display_number_with_unit(total, &unit)} }
                    }
                }
            }
        }
    }
}
