use std::rc::Rc;

use parsa_core::{RouterAction, ViewState};
use yew::prelude::*;

use crate::dom::current_hash;
use crate::storage::{has_admin_session, stored_profile};

/// Reducer-backed holder of the view router state.
///
/// The state sits behind an `Rc` so components can take it as a prop without
/// copying the catalog on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterStore(pub Rc<ViewState>);

impl RouterStore {
    /// Initialised from the current location, stored profile and session token.
    #[must_use]
    pub fn from_browser() -> Self {
        Self::from_view(ViewState::new(
            &current_hash(),
            stored_profile(),
            has_admin_session(),
        ))
    }

    #[must_use]
    pub fn from_view(view: ViewState) -> Self {
        Self(Rc::new(view))
    }
}

impl Reducible for RouterStore {
    type Action = RouterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let view = Rc::unwrap_or_clone(Rc::unwrap_or_clone(self).0);
        Rc::new(Self::from_view(view.reduce(action)))
    }
}

#[hook]
pub fn use_router_store() -> UseReducerHandle<RouterStore> {
    use_reducer(RouterStore::from_browser)
}

/// Wrap the reducer dispatcher as a plain callback for props.
#[must_use]
pub fn dispatch_callback(handle: &UseReducerHandle<RouterStore>) -> Callback<RouterAction> {
    let dispatcher = handle.dispatcher();
    Callback::from(move |action: RouterAction| dispatcher.dispatch(action))
}
