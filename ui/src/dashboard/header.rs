use dioxus::prelude::*;
use time::OffsetDateTime;
use tracing::warn;

use crate::{
    dashboard::format_update_badge,
    i18n::{self, ActiveLanguage},
    t,
};

#[component]
pub fn DashboardHeader(last_updated: OffsetDateTime) -> Element {
    let active = try_use_context::<ActiveLanguage>();
    let current_lang = i18n::use_language_marker();
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                if let Some(ActiveLanguage(mut code)) = active {
                    code.set(tag);
                }
            }
            Err(err) => warn!("language switch to {tag} failed: {err}"),
        }
    };

    let badge = t!("header-update", date = format_update_badge(last_updated));

    rsx! {
        header { class: "dashboard-header",
            div { class: "dashboard-header__inner",
                div { class: "dashboard-header__title",
                    h1 { {t!("app-title")} }
                    span { class: "indicator-positive", "{badge}" }
                }

                div { class: "dashboard-header__status",
                    div { class: "live-dot", aria_hidden: "true",
                        div { class: "live-dot__core" }
                    }
                    span { class: "text-muted", {t!("header-live")} }

                    if show_switcher {
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("header-language-label")}
                        }
                        select {
                            id: "locale-select",
                            class: "filter-select",
                            value: "{current_lang}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
