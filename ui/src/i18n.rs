//! Internationalization (i18n) support for `pulseboard-ui`.
//!
//! Built on `i18n-embed` (language selection and asset loading), `fluent`
//! (message formatting), `rust-embed` (compile-time embedding of `.ftl`
//! files) and `i18n-embed-fl` (`fl!` macro for compile-time checked keys).
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/pulseboard-ui.ftl   (fallback/reference)
//!   id-ID/pulseboard-ui.ftl
//! ```
//!
//! Components call [`use_language_marker`] so they re-render when the
//! header's language picker switches locale, then look strings up with `t!`.
use std::sync::Once;

use dioxus::prelude::*;
use i18n_embed::{fluent::FluentLanguageLoader, LanguageLoader};
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Translation shorthand routed through the shared [`LOADER`].
///
/// ```text
/// t!("header-live")
/// t!("header-update", date = badge)
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "pulseboard-ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE.parse().unwrap_or_default();
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match select_into(&LOADER, &requested) {
            Ok(selected) => debug!(?selected, "i18n initialised"),
            Err(err) => warn!("failed selecting languages ({err}); continuing with fallback"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    select_into(&LOADER, &[lang]).map(|_| ())
}

/// Load bundles for `requested` into `loader`.
///
/// Freshly loaded bundles isolate placeholders with bidi marks, so isolation
/// is switched off after every selection.
fn select_into(
    loader: &FluentLanguageLoader,
    requested: &[LanguageIdentifier],
) -> Result<Vec<LanguageIdentifier>, i18n_embed::I18nEmbedError> {
    let selected = i18n_embed::select(loader, &Localizations, requested)?;
    loader.set_use_isolating(false);
    Ok(selected)
}

/// Tag of the language currently served by [`LOADER`].
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Active language tag, shared through context by the dashboard view.
#[derive(Clone, Copy)]
pub struct ActiveLanguage(pub Signal<String>);

/// Subscribe the calling component to language switches.
pub fn use_language_marker() -> String {
    try_use_context::<ActiveLanguage>()
        .map(|lang| lang.0.cloned())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
