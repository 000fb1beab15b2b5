use dioxus::prelude::*;

use ui::views::Dashboard;

/// Shared theme, inlined so the web bundle needs no separate asset directory.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Pulseboard" }
        document::Style { "{MAIN_CSS_INLINE}" }

        Dashboard {}
    }
}
