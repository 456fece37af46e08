//! Locale-aware number, price, phone and date rendering.
//!
//! Persian renders Persian digits with `٬` grouping; English keeps ASCII.

#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
use crate::i18n::bundle::current_lang;
use crate::i18n::render::t;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

fn uses_persian_digits() -> bool {
    current_lang() == "fa"
}

/// Swap ASCII digits for the active locale's digits.
#[must_use]
pub fn localize_digits(text: &str) -> String {
    if !uses_persian_digits() {
        return text.to_string();
    }
    text.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .map_or(c, |d| PERSIAN_DIGITS[d])
        })
        .collect()
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[must_use]
pub fn fmt_number(value: u64) -> String {
    let separator = if uses_persian_digits() { '٬' } else { ',' };
    localize_digits(&group_thousands(value, separator))
}

#[must_use]
pub fn fmt_count(value: usize) -> String {
    localize_digits(&value.to_string())
}

/// Tuition with thousands separators and the currency name.
#[must_use]
pub fn fmt_price(toman: u64) -> String {
    format!("{} {}", fmt_number(toman), t("price.currency"))
}

/// Group an 11-digit mobile number as `0912 345 6789`; anything else is only re-digited.
#[must_use]
pub fn fmt_phone(phone: &str) -> String {
    let ascii: String = phone
        .chars()
        .map(parsa_core::to_ascii_digit)
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let grouped = if ascii.len() == 11 && ascii.chars().all(|c| c.is_ascii_digit()) {
        format!("{} {} {}", &ascii[..4], &ascii[4..7], &ascii[7..])
    } else {
        phone.to_string()
    };
    localize_digits(&grouped)
}

/// Format an ISO 8601 timestamp using the current locale (browser-side).
#[must_use]
pub fn fmt_date_iso(date_iso: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsValue;
        with_bundle(|bundle| {
            let date = js_sys::Date::new(&JsValue::from_str(date_iso));
            if date.get_time().is_nan() {
                return date_iso.to_string();
            }
            date.to_locale_date_string(&bundle.lang, &JsValue::UNDEFINED)
                .as_string()
                .unwrap_or_else(|| date_iso.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        localize_digits(date_iso.split('T').next().unwrap_or(date_iso))
    }
}
