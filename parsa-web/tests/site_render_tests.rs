use futures::executor::block_on;
use parsa_core::{Catalog, Course, Language, RouterAction, UserInfo, ViewState};
use parsa_web::app::{Site, SiteProps};
use std::rc::Rc;
use yew::{Callback, LocalServerRenderer};

fn catalog() -> Catalog {
    let course = |id, level: &str| Course {
        id: Some(id),
        language: "English".into(),
        level: level.into(),
        price: 3_000_000,
        ..Course::default()
    };
    Catalog::from_records(
        vec![course(1, "A1"), course(2, "B1")],
        vec![Language {
            id: Some(1),
            name: "English".into(),
            ..Language::default()
        }],
    )
}

fn loaded(hash: &str, profile: Option<UserInfo>, admin_session: bool) -> ViewState {
    ViewState::new(hash, profile, admin_session).reduce(RouterAction::CatalogLoaded(catalog()))
}

fn render(state: ViewState) -> String {
    parsa_web::i18n::set_lang("en");
    let props = SiteProps {
        state: Rc::new(state),
        dispatch: Callback::noop(),
        lang: "en".into(),
        on_lang_change: Callback::noop(),
    };
    block_on(LocalServerRenderer::<Site>::with_props(props).render())
}

#[test]
fn first_load_shows_loading_screen() {
    let html = render(ViewState::new("#/", None, false));
    assert!(html.contains("Loading courses…"));
    assert!(html.contains("sr-status"));
}

#[test]
fn failed_first_load_offers_retry() {
    let state = ViewState::new("#/", None, false).reduce(RouterAction::LoadFailed("offline".into()));
    let html = render(state);
    assert!(html.contains("Could not load the catalog"));
    assert!(html.contains("offline"));
    assert!(html.contains("Try again"));
}

#[test]
fn loaded_catalog_shows_totals() {
    let html = render(loaded("#/", None, false));
    assert!(html.contains("quick-stats"));
    assert!(html.contains("1+"));
    assert!(html.contains("2 active courses"));

    let loading = render(ViewState::new("#/", None, false));
    assert!(!loading.contains("quick-stats"));
    assert!(!loading.contains("header-count"));
}

#[test]
fn home_lists_languages() {
    let html = render(loaded("#/", None, false));
    assert!(html.contains("Choose a language"));
    assert!(html.contains("#/language/English"));
    assert!(!html.contains("modal-backdrop"));
}

#[test]
fn language_route_lists_its_courses() {
    let html = render(loaded("#/language/English", None, false));
    assert!(html.contains("English courses"));
    assert!(html.contains("#/course/English-A1-1"));
    assert!(html.contains("#/course/English-B1-2"));
}

#[test]
fn course_route_opens_detail_overlay() {
    let html = render(loaded("#/course/English-B1-2", None, false));
    assert!(html.contains(r#"role="dialog""#));
    assert!(html.contains("English B1"));
    assert!(html.contains("Request a consultation"));
}

#[test]
fn unknown_course_slug_opens_nothing() {
    let html = render(loaded("#/course/English-C2-9", None, false));
    assert!(!html.contains("modal-backdrop"));
}

#[test]
fn consultation_overlay_is_prefilled_from_profile() {
    let profile = UserInfo {
        name: "Reza".into(),
        phone: "09121234567".into(),
        city: "شیراز".into(),
        course_of_interest: None,
    };
    let state = loaded("#/language/English", Some(profile), false)
        .reduce(RouterAction::OpenConsultation("English-A1-1".into()));
    let html = render(state);
    assert!(html.contains("consult-phone"));
    assert!(html.contains("English course, level A1"));
}

#[test]
fn profile_without_stored_details_asks_for_them() {
    let state = loaded("#/", None, false).reduce(RouterAction::OpenProfile);
    let html = render(state);
    assert!(html.contains("Contact details"));
    assert!(html.contains("user-info-name"));
}

#[test]
fn admin_without_session_shows_login_and_no_overlays() {
    let state = loaded("#/", None, false)
        .reduce(RouterAction::OpenClub)
        .reduce(RouterAction::HashChanged("#/admin".into()));
    let html = render(state);
    assert!(html.contains("Admin sign in"));
    assert!(!html.contains("modal-backdrop"));
    assert!(!html.contains("club-open-btn"));
}

#[test]
fn admin_panel_ignores_course_flags() {
    let state = loaded("#/course/English-A1-1", None, true)
        .reduce(RouterAction::HashChanged("#/admin/languages".into()))
        .reduce(RouterAction::OpenConsultation("English-A1-1".into()));
    let html = render(state);
    assert!(html.contains("Admin panel"));
    assert!(html.contains("Add language"));
    assert!(!html.contains("modal-backdrop"));
}
