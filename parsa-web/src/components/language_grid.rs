use crate::i18n::{t, tr_count};
use crate::paths::image_url;
use parsa_core::{Language, Route};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub languages: Vec<Language>,
}

/// Home screen: one card per taught language, linking to its course list.
#[function_component(LanguageGrid)]
pub fn language_grid(p: &Props) -> Html {
    if p.languages.is_empty() {
        return html! { <p class="empty-state">{ t("catalog.no_languages") }</p> };
    }
    html! {
        <section class="language-grid" aria-labelledby="language-grid-title">
            <h2 id="language-grid-title">{ t("catalog.choose_language") }</h2>
            <ul class="card-grid">
                { for p.languages.iter().map(language_card) }
            </ul>
        </section>
    }
}

fn language_card(language: &Language) -> Html {
    let href = Route::language(&language.name).to_hash();
    let image = image_url(&language.image);
    html! {
        <li class="language-card" key={language.name.clone()}>
            <a href={href}>
                if !image.is_empty() {
                    <img src={image} alt="" loading="lazy" />
                }
                <h3>{ language.name.clone() }</h3>
                if !language.description.is_empty() {
                    <p>{ language.description.clone() }</p>
                }
                <span class="badge">{ tr_count("catalog.course_count", language.course_count) }</span>
            </a>
        </li>
    }
}
