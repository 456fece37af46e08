// Accessibility helpers

use wasm_bindgen::JsCast;

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "sr-status";

const FOCUSABLE: &str = "a[href], button:not([disabled]), input:not([disabled]), select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// Critical focus-ring and screen-reader CSS injected with the shell.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #c2410c;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce `msg` through the live region, if it is mounted.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID)) {
        node.set_text_content(Some(msg));
    }
}

/// Move focus to the element with `id`, if present.
pub fn restore_focus(id: &str) {
    if let Some(el) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}

/// Focus the first focusable descendant of the container with `id`.
pub fn trap_focus_in(id: &str) {
    let Some(container) = crate::dom::document().and_then(|doc| doc.get_element_by_id(id)) else {
        return;
    };
    if let Some(first) = container
        .query_selector(FOCUSABLE)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = first.focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_css_includes_sr_only() {
        assert!(visible_focus_css().contains(".sr-only"));
        assert!(visible_focus_css().contains(":focus-visible"));
    }
}
