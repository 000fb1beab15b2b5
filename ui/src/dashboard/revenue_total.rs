use dioxus::prelude::*;
use tracing::debug;

use crate::{
    core::{format, model::RevenueItem, sparkline},
    dashboard::delta_class,
    i18n, t,
};

const SPARKLINE_HEIGHT: f64 = 24.0;

#[component]
fn SparklineBar(points: Vec<f64>) -> Element {
    let heights = sparkline::normalize_heights(&points, SPARKLINE_HEIGHT);

    rsx! {
        div { class: "sparkline", style: "height: {SPARKLINE_HEIGHT}px",
            for (index, height) in heights.into_iter().enumerate() {
                div { key: "{index}", class: "sparkline__bar", style: "height: {height}px" }
            }
        }
    }
}

fn row_sparkline(item: &RevenueItem, salt: u64) -> Vec<f64> {
    let seed = sparkline::seed_for_label(&item.name, salt);
    match sparkline::sparkline_for_seed(item.mtd, item.mom, seed) {
        Ok(points) => points.to_vec(),
        Err(err) => {
            debug!(name = %item.name, "sparkline skipped: {err}");
            Vec::new()
        }
    }
}

#[component]
pub fn RevenueTotal(items: Vec<RevenueItem>, unit: String, sparkline_salt: u64) -> Element {
    i18n::use_language_marker();

    let total: f64 = items.iter().map(|item| item.mtd).sum();
    let total_label = format::display_number_with_unit(total, &unit);

    rsx! {
        div { class: "card-analytics revenue-total",
            div { class: "card-header",
                h3 { class: "card-title", {t!("revenue-title")} }
                span { class: "text-muted", {t!("revenue-subtitle")} }
            }

            div { class: "revenue-rows",
                for item in items {
                    div { key: "{item.name}", class: "revenue-row",
                        div { class: "revenue-row__name",
                            span { "{item.name}" }
                            SparklineBar { points: row_sparkline(&item, sparkline_salt) }
                        }

                        div { class: "revenue-row__metrics",
                            div { class: "metric",
                                div { class: "font-semibold", {format::display_number_with_unit(item.mtd, &unit)} }
                                div { class: "metric__label", {t!("revenue-mtd")} }
                            }
                            div { class: "metric",
                                div { class: "font-semibold {delta_class(item.mom)}", {format::display_pct(item.mom)} }
                                div { class: "metric__label", {t!("revenue-mom")} }
                            }
                            div { class: "metric",
                                div { class: "font-semibold {delta_class(item.ytd)}", {format::display_pct(item.ytd)} }
                                div { class: "metric__label", {t!("revenue-ytd")} }
                            }
                        }
                    }
                }
            }

            div { class: "card-footer",
                span { class: "text-muted", {t!("revenue-footer")} }
                span { class: "font-bold", "{total_label}" }
            }
        }
    }
}
