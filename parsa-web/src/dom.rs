use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Current location fragment including the leading `#`; empty when there is none.
#[must_use]
pub fn current_hash() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        window()
            .and_then(|win| win.location().hash().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Point the location fragment at `hash`; the browser fires `hashchange`.
pub fn set_hash(hash: &str) {
    if let Some(win) = window()
        && let Err(err) = win.location().set_hash(hash)
    {
        console_error(&js_error_message(&err));
    }
}

/// Go back one history entry. Returns `false` when there is nothing to go back to.
#[must_use]
pub fn history_back() -> bool {
    let Some(history) = window().and_then(|win| win.history().ok()) else {
        return false;
    };
    if history.length().unwrap_or(0) <= 1 {
        return false;
    }
    history.back().is_ok()
}

/// Blocking alert; used for failed admin mutations.
pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

/// Blocking confirmation dialog. Anything but an explicit "OK" is a no.
#[must_use]
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Lock or release page scrolling behind an open overlay.
pub fn lock_body_scroll(locked: bool) {
    if let Some(body) = document().and_then(|doc| doc.body()) {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

/// `log` backend writing to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route the `log` facade to the console. Later calls are no-ops.
pub fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
