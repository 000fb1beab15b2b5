use dioxus::prelude::*;

use crate::{
    chart::ChartSize,
    core::{config::ChartConfig, format, model::BroadbandPackItem},
    dashboard::{chart_device_scale, chart_style, delta_class},
    i18n, t,
};

pub(super) const CANVAS_ID: &str = "broadband-chart";

/// Draw onto the mounted canvas, sized to its CSS box when it has one.
#[cfg(target_arch = "wasm32")]
fn draw_on_canvas(
    items: &[BroadbandPackItem],
    config: &ChartConfig,
    unit: &str,
) -> Result<(), String> {
    use crate::chart::{canvas::CanvasSurface, render_bar_chart};

    let mut surface = CanvasSurface::from_element_id(CANVAS_ID).map_err(|err| err.to_string())?;
    let (width, height) = surface.client_size();
    let size = if width > 0.0 && height > 0.0 {
        ChartSize::new(width, height)
    } else {
        ChartSize::new(config.width, config.height)
    };
    render_bar_chart(
        &mut surface,
        items,
        size,
        chart_device_scale(config),
        &chart_style(unit),
    )
    .map(|_| ())
    .map_err(|err| err.to_string())
}

/// Rasterise the chart into a `data:` URL for an `img` element.
#[cfg(not(target_arch = "wasm32"))]
fn chart_data_url(
    items: &[BroadbandPackItem],
    config: &ChartConfig,
    unit: &str,
) -> Result<String, String> {
    use base64::Engine;

    let bytes = crate::chart::render_png(
        items,
        ChartSize::new(config.width, config.height),
        chart_device_scale(config),
        &chart_style(unit),
    )
    .map_err(|err| err.to_string())?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:image/png;base64,{encoded}"))
}

#[component]
pub fn BroadbandPack(items: Vec<BroadbandPackItem>, chart: ChartConfig, unit: String) -> Element {
    i18n::use_language_marker();

    #[cfg(target_arch = "wasm32")]
    let (chart_src, chart_error): (Option<String>, Option<String>) = {
        let mut error = use_signal(|| None::<String>);
        use_effect(use_reactive(
            (&items, &chart, &unit),
            move |(items, chart, unit)| {
                let outcome = draw_on_canvas(&items, &chart, &unit).err();
                if *error.peek() != outcome {
                    error.set(outcome);
                }
            },
        ));
        (None, error())
    };

    #[cfg(not(target_arch = "wasm32"))]
    let (chart_src, chart_error): (Option<String>, Option<String>) = {
        let rendered = use_memo(use_reactive(
            (&items, &chart, &unit),
            |(items, chart, unit)| chart_data_url(&items, &chart, &unit),
        ));
        match rendered() {
            Ok(src) => (Some(src), None),
            Err(err) => (None, Some(err)),
        }
    };

    rsx! {
        div { class: "card-analytics broadband-pack",
            div { class: "card-header",
                h3 { class: "card-title", {t!("broadband-title")} }
                div { class: "chart-legend",
                    div { class: "chart-legend__item",
                        div { class: "chart-legend__swatch chart-legend__swatch--previous" }
                        span { class: "text-muted", {t!("broadband-legend-previous")} }
                    }
                    div { class: "chart-legend__item",
                        div { class: "chart-legend__swatch chart-legend__swatch--current" }
                        span { class: "text-muted", {t!("broadband-legend-current")} }
                    }
                }
            }

            div { class: "chart-container",
                if let Some(src) = chart_src {
                    img { class: "chart-canvas", src: "{src}", alt: t!("broadband-title") }
                } else if cfg!(target_arch = "wasm32") {
                    canvas { id: CANVAS_ID, class: "chart-canvas" }
                }
            }
            if let Some(reason) = chart_error {
                p { class: "chart-error text-danger", {t!("broadband-chart-error", reason = reason)} }
            }

            div { class: "breakdown-grid",
                for item in items {
                    div { key: "{item.label}", class: "breakdown-cell",
                        div { class: "font-medium", "{item.label}" }
                        div { class: "breakdown-cell__line text-muted",
                            {t!("broadband-prev", value = format::display_number_with_unit(item.previous, &unit))}
                        }
                        div { class: "breakdown-cell__line font-medium",
                            {t!("broadband-curr", value = format::display_number_with_unit(item.current, &unit))}
                        }
                        div { class: "breakdown-cell__line font-bold {delta_class(item.change_pct)}",
                            {format::display_pct(item.change_pct)}
                        }
                    }
                }
            }
        }
    }
}
