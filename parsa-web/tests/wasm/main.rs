//! Browser-only checks: location fragment, storage and the mounted app.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use parsa_core::{KeyValueStore, Route, RouterAction, UserInfo, load_profile, save_profile};
use parsa_web::app::App;
use parsa_web::app::routing::{navigate, use_hash_location};
use parsa_web::dom;
use parsa_web::storage::BrowserStore;
use wasm_bindgen_test::*;
use yew::prelude::*;
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
fn navigate_writes_the_fragment() {
    navigate(&Route::language("English"));
    assert_eq!(dom::current_hash(), "#/language/English");
    navigate(&Route::Home);
    assert_eq!(dom::current_hash(), "#/");
}

#[wasm_bindgen_test]
fn profile_survives_in_local_storage() {
    let store = BrowserStore::local();
    let info = UserInfo {
        name: "Sara".into(),
        phone: "09121234567".into(),
        city: "تهران".into(),
        course_of_interest: Some("English".into()),
    };
    save_profile(&store, &info).expect("save profile");
    assert_eq!(load_profile(&store), Some(info));
    store.remove(parsa_core::PROFILE_KEY).expect("cleanup");
}

#[wasm_bindgen_test]
fn corrupt_profile_is_dropped() {
    let store = BrowserStore::local();
    store.set(parsa_core::PROFILE_KEY, "{not json").expect("seed");
    assert_eq!(load_profile(&store), None);
    assert_eq!(store.get(parsa_core::PROFILE_KEY).expect("read"), None);
}

#[wasm_bindgen_test]
async fn app_mounts_with_header_and_live_region() {
    parsa_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
    TimeoutFuture::new(0).await;
    let doc = dom::document().expect("document");
    assert!(doc.get_element_by_id("lang-select").is_some());
    assert!(doc.get_element_by_id("sr-status").is_some());
}

#[derive(Properties, PartialEq)]
struct HashWatcherProps {
    on_action: Callback<RouterAction>,
}

#[function_component(HashWatcher)]
fn hash_watcher(p: &HashWatcherProps) -> Html {
    use_hash_location(p.on_action.clone());
    html! {}
}

#[wasm_bindgen_test]
async fn hash_listeners_stop_after_unmount() {
    navigate(&Route::Home);
    TimeoutFuture::new(20).await;

    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let on_action = {
        let seen = Rc::clone(&seen);
        Callback::from(move |action: RouterAction| {
            if let RouterAction::HashChanged(hash) = action {
                seen.borrow_mut().push(hash);
            }
        })
    };
    let handle = Renderer::<HashWatcher>::with_root_and_props(
        ensure_app_root(),
        HashWatcherProps { on_action },
    )
    .render();
    TimeoutFuture::new(0).await;
    assert_eq!(seen.borrow().as_slice(), ["#/"]);

    dom::set_hash("#/language/German");
    TimeoutFuture::new(50).await;
    assert_eq!(seen.borrow().last().map(String::as_str), Some("#/language/German"));

    handle.destroy();
    TimeoutFuture::new(0).await;
    let before = seen.borrow().len();
    dom::set_hash("#/language/English");
    TimeoutFuture::new(50).await;
    assert_eq!(seen.borrow().len(), before);

    navigate(&Route::Home);
}
