use dioxus::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    core::{
        config::DashboardConfig,
        filters::FilterState,
        loader,
        model::DashboardSnapshot,
        timing,
    },
    dashboard::{
        BroadbandPack, DashboardHeader, ExportPanel, FilterBar, KpiCards, RevenueDriver,
        RevenueTotal,
    },
    i18n::{self, ActiveLanguage},
    t,
};

/// Revenue figures are reported in millions, subscriber counts in thousands.
const REVENUE_UNIT: &str = "M";
const PAYING_USERS_UNIT: &str = "K";

type LoadOutcome = Result<(DashboardSnapshot, OffsetDateTime), String>;

#[component]
pub fn Dashboard() -> Element {
    i18n::init();

    let lang = use_signal(i18n::current_language);
    use_context_provider(|| ActiveLanguage(lang));
    i18n::use_language_marker();

    let config = use_hook(DashboardConfig::load);
    let mut filters = use_signal(FilterState::default);
    let mut refresh = use_signal(|| 0u32);

    let snapshot = use_resource({
        let config = config.clone();
        move || {
            let filters = filters();
            let attempt = refresh();
            let config = config.clone();
            async move {
                info!(?filters, attempt, "loading dashboard");
                loader::load_dashboard(filters, config)
                    .await
                    .map(|snapshot| (snapshot, timing::now_utc()))
                    .map_err(|err| {
                        warn!("error loading dashboard data: {err}");
                        err.to_string()
                    })
            }
        }
    });

    let outcome: Option<LoadOutcome> = if snapshot.finished() {
        snapshot.cloned()
    } else {
        None
    };

    match outcome {
        None => rsx! {
            div { class: "dashboard-container",
                div { class: "dashboard-state",
                    div { class: "spinner", aria_hidden: "true" }
                    p { class: "text-muted", {t!("dashboard-loading")} }
                }
            }
        },
        Some(Err(_)) => rsx! {
            div { class: "dashboard-container",
                div { class: "dashboard-state",
                    h2 { class: "section-title", {t!("dashboard-empty-title")} }
                    p { class: "text-muted", {t!("dashboard-empty-body")} }
                }
            }
        },
        Some(Ok((data, last_updated))) => rsx! {
            div { class: "dashboard-container",
                DashboardHeader { last_updated }

                div { class: "dashboard-content",
                    FilterBar {
                        filters: filters(),
                        on_change: move |next| filters.set(next),
                        on_refresh: move |_| *refresh.write() += 1,
                    }

                    div { class: "dashboard-body fade-in",
                        KpiCards { kpis: data.kpis.clone() }

                        div { class: "analytics-grid",
                            RevenueTotal {
                                items: data.revenue_total.clone(),
                                unit: REVENUE_UNIT.to_string(),
                                sparkline_salt: config.sparkline_salt,
                            }
                            BroadbandPack {
                                items: data.broadband_pack.clone(),
                                chart: config.chart.clone(),
                                unit: config.chart_unit.clone(),
                            }
                            RevenueDriver {
                                regions: data.revenue_driver.clone(),
                                total_paying_users: data.total_paying_users(),
                                los_totals: data.los_totals(),
                                unit: PAYING_USERS_UNIT.to_string(),
                            }
                            ExportPanel {
                                items: data.broadband_pack.clone(),
                                chart: config.chart.clone(),
                                unit: config.chart_unit.clone(),
                            }
                        }
                    }
                }
            }
        },
    }
}
