//! Internationalization (i18n) support for `gymratio-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/gymratio-ui.ftl   (fallback/reference)
//! ```
//!
//! Messages carry no placeables; numbers are formatted by `core::format`
//! and concatenated by the caller.
//!
//! To add a new locale, copy `en-US/gymratio-ui.ftl` to
//! `i18n/<lang-id>/gymratio-ui.ftl` and translate each value.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::core::stats::Stat;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro: `t!("panel-title")`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "gymratio-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Localized display name of a stat.
pub fn stat_label(stat: Stat) -> String {
    match stat {
        Stat::Strength => crate::t!("stat-strength"),
        Stat::Defense => crate::t!("stat-defense"),
        Stat::Speed => crate::t!("stat-speed"),
        Stat::Dexterity => crate::t!("stat-dexterity"),
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
