use dioxus::prelude::*;

use crate::{
    core::{format, model::KpiRecord},
    dashboard::delta_class,
    i18n, t,
};

#[component]
pub fn KpiCards(kpis: Vec<KpiRecord>) -> Element {
    i18n::use_language_marker();

    rsx! {
        section { class: "kpi-section",
            h2 { class: "section-title", {t!("kpi-heading")} }
            div { class: "kpi-grid",
                for kpi in kpis {
                    KpiCard { key: "{kpi.key}", kpi: kpi.clone() }
                }
            }
        }
    }
}

#[component]
fn KpiCard(kpi: KpiRecord) -> Element {
    i18n::use_language_marker();

    let value = format::display_number(kpi.value);
    let ach = format::display_ratio(kpi.ach);
    let mom = format::display_pct(kpi.mom);
    let secondary = format::display_pct(kpi.ytd_or_yoy);
    let bar_width = kpi.achievement_bar_pct();

    rsx! {
        div { class: "card-kpi dashboard-slide-up",
            div {
                h3 { class: "text-kpi-label", "{kpi.label}" }
                div { class: "kpi-value-row",
                    span { class: "text-kpi-value", "{value}" }
                    span { class: "text-kpi-unit", "{kpi.unit}" }
                }
            }

            div { class: "kpi-deltas",
                div {
                    span { class: "text-muted block", {t!("kpi-ach")} }
                    span { class: "font-semibold {kpi.achievement_class().css_class()}", "{ach}" }
                }
                div {
                    span { class: "text-muted block", {t!("kpi-mom")} }
                    span { class: "font-semibold {delta_class(kpi.mom)}", "{mom}" }
                }
                div {
                    span { class: "text-muted block", "{kpi.secondary_delta_label()}" }
                    span { class: "font-semibold {delta_class(kpi.ytd_or_yoy)}", "{secondary}" }
                }
            }

            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {bar_width}%" }
            }
        }
    }
}
