mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, is_rtl, set_lang};
pub use format::{fmt_count, fmt_date_iso, fmt_number, fmt_phone, fmt_price, localize_digits};
pub use locales::{DEFAULT_LANG, FALLBACK_LANG, LocaleMeta, locales};
pub use render::{t, tr, tr_count};
