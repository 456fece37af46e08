use crate::i18n::{locales, t, tr_count};
use parsa_core::Route;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_lang_change: Callback<String>,
    pub current_lang: String,
    pub on_open_profile: Callback<()>,
    pub on_open_club: Callback<()>,
    /// Hidden inside the admin area, where the public overlays are gated off.
    #[prop_or(true)]
    pub show_actions: bool,
    /// Total courses once the catalog has loaded.
    #[prop_or_default]
    pub course_count: Option<usize>,
}

/// Element ids the overlays hand focus back to.
pub const PROFILE_BUTTON_ID: &str = "profile-open-btn";
pub const CLUB_BUTTON_ID: &str = "club-open-btn";

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let open_profile = {
        let cb = p.on_open_profile.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let open_club = {
        let cb = p.on_open_club.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ t("app.skip") }</a>
            <div class="header-content">
                <a class="brand" href={Route::Home.to_hash()}>
                    <span class="brand__title">{ t("app.title") }</span>
                    <span class="brand__tagline">{ t("app.tagline") }</span>
                </a>
                <nav aria-label={t("nav.locale")} class="header-actions">
                    <label for="lang-select" class="sr-only">{ t("nav.locale") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.locale")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                        }) }
                    </select>
                    if let Some(count) = p.course_count {
                        <span class="badge header-count">{ tr_count("nav.active_courses", count) }</span>
                    }
                    if p.show_actions {
                        <button id={PROFILE_BUTTON_ID} type="button" onclick={open_profile}>{ t("nav.profile") }</button>
                        <button id={CLUB_BUTTON_ID} type="button" class="accent" onclick={open_club}>{ t("nav.club") }</button>
                    }
                </nav>
            </div>
        </header>
    }
}
