use dioxus::prelude::*;

use crate::{
    core::filters::{FilterField, FilterState},
    i18n, t,
};

fn field_label(field: FilterField) -> String {
    match field {
        FilterField::Regional => t!("filter-regional"),
        FilterField::Branch => t!("filter-branch"),
        FilterField::Cluster => t!("filter-cluster"),
    }
}

#[component]
pub fn FilterBar(
    filters: FilterState,
    on_change: EventHandler<FilterState>,
    on_refresh: EventHandler<()>,
) -> Element {
    i18n::use_language_marker();

    rsx! {
        div { class: "card-base filter-bar",
            for field in FilterField::ALL_FIELDS {
                div { key: "{field.id()}", class: "filter-bar__field",
                    label { r#for: field.id(), class: "filter-bar__label", {field_label(field)} }
                    select {
                        id: field.id(),
                        class: "filter-select",
                        value: filters.get(field),
                        oninput: {
                            let filters = filters.clone();
                            move |evt: FormEvent| on_change.call(filters.with(field, &evt.value()))
                        },
                        for choice in field.options() {
                            option { key: "{choice}", value: *choice, "{choice}" }
                        }
                    }
                }
            }

            div { class: "filter-bar__spacer" }

            button {
                r#type: "button",
                class: "button button--outline",
                onclick: move |_| on_refresh.call(()),
                span { class: "refresh-icon", aria_hidden: "true", "⟳" }
                span { {t!("filter-refresh")} }
            }
        }
    }
}
