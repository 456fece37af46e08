pub mod bootstrap;
pub mod routing;
pub mod state;
pub mod view;

pub use view::{Site, SiteProps};

use crate::i18n::{current_lang, set_lang};
use yew::prelude::*;

/// Root component: owns the view router and keeps it in sync with the location fragment.
#[function_component(App)]
pub fn app() -> Html {
    let store = state::use_router_store();
    let dispatch = state::dispatch_callback(&store);
    routing::use_hash_location(dispatch.clone());
    bootstrap::use_bootstrap(dispatch.clone());

    let lang = use_state(current_lang);
    let on_lang_change = {
        let lang = lang.clone();
        Callback::from(move |code: String| {
            set_lang(&code);
            lang.set(current_lang());
        })
    };

    html! {
        <Site state={store.0.clone()} {dispatch} lang={(*lang).clone()} {on_lang_change} />
    }
}
