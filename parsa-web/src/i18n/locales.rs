use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    pub rtl: bool,
}

/// Locale the site starts in when nothing is saved.
pub const DEFAULT_LANG: &str = "fa";
/// Bundle consulted for keys the active locale lacks.
pub const FALLBACK_LANG: &str = "en";

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "fa",
        name: "فارسی",
        rtl: true,
    },
    LocaleMeta {
        code: "en",
        name: "English",
        rtl: false,
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("fa", include_str!("../../i18n/fa.json")),
    ("en", include_str!("../../i18n/en.json")),
];

/// Supported locales with their native names and direction metadata.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_rtl_lang(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang && m.rtl)
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

pub fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;

    serde_json::from_str(bundle).ok()
}
