use std::future::Future;

use dioxus::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    core::{config::ChartConfig, model::BroadbandPackItem, platform},
    i18n, t,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Raster(#[from] crate::chart::RasterError),
    #[error("unable to determine export directory")]
    NoExportDir,
    #[error("failed writing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("chart image is malformed: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("{0}")]
    Browser(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

#[component]
pub fn ExportPanel(items: Vec<BroadbandPackItem>, chart: ChartConfig, unit: String) -> Element {
    i18n::use_language_marker();

    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-feedback".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-feedback export-feedback--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-feedback export-feedback--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let csv_handler = {
        let items = items.clone();
        let unit = unit.clone();
        move |_| {
            if busy() {
                return;
            }
            let (items, unit) = (items.clone(), unit.clone());
            run_export(status, busy, t!("export-working-csv"), async move {
                perform_csv_export(&items, &unit).await
            });
        }
    };

    let png_handler = {
        let items = items.clone();
        move |_| {
            if busy() {
                return;
            }
            let (items, chart, unit) = (items.clone(), chart.clone(), unit.clone());
            run_export(status, busy, t!("export-working-png"), async move {
                perform_png_export(&items, &chart, &unit).await
            });
        }
    };

    rsx! {
        section { class: "card-analytics export-panel",
            div { class: "card-header",
                h3 { class: "card-title", {t!("export-title")} }
            }
            p { class: "text-muted", {t!("export-summary")} }

            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy() || items.is_empty(),
                    onclick: csv_handler,
                    {t!("export-csv")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: png_handler,
                    {t!("export-png")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn run_export<F>(
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
    working: String,
    job: F,
) where
    F: Future<Output = Result<Delivery, ExportError>> + 'static,
{
    busy.set(true);
    status.set(ExportStatus::Working(working));
    platform::spawn_future(async move {
        match job.await {
            Ok(delivery) => {
                info!(?delivery, "export finished");
                status.set(ExportStatus::Done(delivery.message()));
            }
            Err(err) => {
                warn!("export failed: {err}");
                status.set(ExportStatus::Error(err.to_string()));
            }
        }
        busy.set(false);
    });
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq)]
enum Delivery {
    Saved(String),
    Downloaded,
}

impl Delivery {
    fn message(&self) -> String {
        match self {
            Delivery::Saved(path) => t!("export-saved", path = path.as_str()),
            Delivery::Downloaded => t!("export-download-started"),
        }
    }
}

async fn perform_csv_export(items: &[BroadbandPackItem], unit: &str) -> Result<Delivery, ExportError> {
    let csv = build_csv(items, unit);
    let filename = format!("pulseboard-broadband-{}.csv", timestamp_slug());
    download_bytes(&filename, "text/csv", csv.into_bytes()).await
}

async fn perform_png_export(
    items: &[BroadbandPackItem],
    chart: &ChartConfig,
    unit: &str,
) -> Result<Delivery, ExportError> {
    let png_bytes = build_png(items, chart, unit)?;
    let filename = format!("pulseboard-broadband-{}.png", timestamp_slug());
    download_bytes(&filename, "image/png", png_bytes).await
}

fn build_csv(items: &[BroadbandPackItem], unit: &str) -> String {
    let header = [
        "label".to_string(),
        format!("previous_{unit}"),
        format!("current_{unit}"),
        "change_pct".to_string(),
    ];
    let mut csv = header
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",");
    csv.push('\n');

    for item in items {
        let line = [
            item.label.clone(),
            item.previous.to_string(),
            item.current.to_string(),
            item.change_pct.to_string(),
        ]
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::macros::format_description;

    crate::core::timing::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Standalone PNG rendered with an opaque background.
#[cfg(not(target_arch = "wasm32"))]
fn build_png(items: &[BroadbandPackItem], chart: &ChartConfig, unit: &str) -> Result<Vec<u8>, ExportError> {
    use crate::{
        chart::{render_png, ChartSize},
        dashboard::{chart_device_scale, chart_style},
    };

    Ok(render_png(
        items,
        ChartSize::new(chart.width, chart.height),
        chart_device_scale(chart),
        &chart_style(unit).for_export(),
    )?)
}

/// Snapshot of the chart canvas already drawn on the page.
#[cfg(target_arch = "wasm32")]
fn build_png(_items: &[BroadbandPackItem], _chart: &ChartConfig, _unit: &str) -> Result<Vec<u8>, ExportError> {
    use base64::Engine;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    let canvas: HtmlCanvasElement = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(super::broadband_pack::CANVAS_ID))
        .and_then(|el| el.dyn_into().ok())
        .ok_or(ExportError::Browser("chart canvas is not mounted"))?;
    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Browser("unable to serialise canvas"))?;
    let payload = data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or(ExportError::Browser("malformed data URL"))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

async fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Delivery, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Browser("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Browser("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Browser("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Browser("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| ExportError::Browser("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or(ExportError::Browser("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(Delivery::Downloaded)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = desktop_export_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes)?;
        Ok(Delivery::Saved(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Pulseboard", "Pulseboard")
        .ok_or(ExportError::NoExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, previous: f64, current: f64, change_pct: f64) -> BroadbandPackItem {
        BroadbandPackItem {
            label: label.into(),
            previous,
            current,
            change_pct,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_item() {
        let csv = build_csv(&[item("CVM", 125.5, 142.3, 13.4), item("PV", 89.7, 95.2, 6.1)], "M");
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "label,previous_M,current_M,change_pct");
        assert_eq!(lines[1], "CVM,125.5,142.3,13.4");
        assert_eq!(lines[2], "PV,89.7,95.2,6.1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_quotes_awkward_labels() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn csv_quotes_line_breaks() {
        assert_eq!(escape_csv("a\nb"), "\"a\nb\"");
        assert_eq!(escape_csv("a\rb"), "\"a\rb\"");
        assert_eq!(escape_csv("a\r\nb"), "\"a\r\nb\"");
    }

    #[test]
    fn slug_is_sortable_timestamp() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), 15);
        assert_eq!(slug.as_bytes()[8], b'_');
        assert!(slug.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn png_export_renders_opaque_chart() {
        let chart = ChartConfig {
            width: 320.0,
            height: 200.0,
            device_scale: Some(1.0),
        };
        let bytes = build_png(&[item("CVM", 125.5, 142.3, 13.4)], &chart, "M").unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
