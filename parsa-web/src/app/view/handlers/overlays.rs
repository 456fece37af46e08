use parsa_core::RouterAction;
use yew::prelude::*;

use crate::app::bootstrap::reload_catalog;
use crate::app::routing::close_course_detail;

/// Callback that dispatches a fixed action whatever it is called with.
pub fn dispatch_on<T: 'static>(
    dispatch: &Callback<RouterAction>,
    action: fn() -> RouterAction,
) -> Callback<T> {
    dispatch.reform(move |_: T| action())
}

pub fn build_close_course() -> Callback<()> {
    Callback::from(|()| close_course_detail())
}

pub fn build_retry_load(dispatch: &Callback<RouterAction>) -> Callback<()> {
    let dispatch = dispatch.clone();
    Callback::from(move |()| reload_catalog(dispatch.clone()))
}
