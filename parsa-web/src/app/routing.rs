//! Hash-location subscription and navigation helpers.
//!
//! The route is derived only from `location.hash`: components navigate by
//! writing the fragment, and the single listener installed by
//! [`use_hash_location`] feeds every change back into the view router.

use gloo::events::EventListener;
use parsa_core::{Route, RouterAction};
use yew::prelude::*;

use crate::dom;

/// Navigate by writing the fragment; the hash listener picks it up.
pub fn navigate(route: &Route) {
    let hash = route.to_hash();
    if dom::current_hash() != hash {
        dom::set_hash(&hash);
    }
}

/// Leave the course-detail overlay: back through history when possible, else home.
pub fn close_course_detail() {
    if !dom::history_back() {
        navigate(&Route::Home);
    }
}

/// Subscribe to `hashchange` and `popstate` for the lifetime of the calling component.
///
/// The current fragment is dispatched once on mount so the router starts in sync;
/// both listeners are removed on unmount.
#[hook]
pub fn use_hash_location(dispatch: Callback<RouterAction>) {
    use_effect_with((), move |()| {
        let listeners = subscribe(&dispatch);
        dispatch.emit(RouterAction::HashChanged(dom::current_hash()));
        move || drop(listeners)
    });
}

#[cfg(target_arch = "wasm32")]
fn subscribe(dispatch: &Callback<RouterAction>) -> Vec<EventListener> {
    let Some(win) = dom::window() else {
        return Vec::new();
    };
    ["hashchange", "popstate"]
        .into_iter()
        .map(|event| {
            let dispatch = dispatch.clone();
            EventListener::new(&win, event, move |_| {
                dispatch.emit(RouterAction::HashChanged(dom::current_hash()));
            })
        })
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn subscribe(_dispatch: &Callback<RouterAction>) -> Vec<EventListener> {
    Vec::new()
}
