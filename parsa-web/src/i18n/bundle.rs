use crate::i18n::locales::{DEFAULT_LANG, FALLBACK_LANG, is_rtl_lang, is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

/// Storage key of the visitor's chosen locale.
pub const LOCALE_KEY: &str = "parsa.locale";

pub struct I18nBundle {
    pub lang: String,
    pub rtl: bool,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    let fallback = load_translations(FALLBACK_LANG)?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        rtl: is_rtl_lang(lang),
        translations,
        fallback,
    })
}

fn empty_bundle() -> I18nBundle {
    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        rtl: is_rtl_lang(DEFAULT_LANG),
        translations: Value::Object(serde_json::Map::new()),
        fallback: Value::Object(serde_json::Map::new()),
    }
}

fn saved_lang() -> String {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(LOCALE_KEY).ok().flatten())
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new({
        let initial = saved_lang();
        build_bundle(&initial)
            .or_else(|| build_bundle(DEFAULT_LANG))
            .unwrap_or_else(empty_bundle)
    });
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active locale.
///
/// Updates `<html lang dir>` and persists the choice. Unknown codes are ignored.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("unsupported locale: {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            with_bundle(|read| {
                let _ = el.set_attribute("lang", &read.lang);
                let _ = el.set_attribute("dir", if read.rtl { "rtl" } else { "ltr" });
            });
        }
        if let Some(storage) = web_sys::window().and_then(|win| win.local_storage().ok().flatten())
        {
            let _ = storage.set_item(LOCALE_KEY, lang);
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}

#[must_use]
pub fn is_rtl() -> bool {
    with_bundle(|bundle| bundle.rtl)
}
