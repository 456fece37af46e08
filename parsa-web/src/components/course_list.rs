use super::course_card::CourseCard;
use crate::i18n::{t, tr};
use parsa_core::{Course, CourseFilter, CourseFormat, CourseType, Route};
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub language_name: String,
    /// Already narrowed by `filter`.
    pub courses: Vec<Course>,
    pub filter: CourseFilter,
    pub on_filter: Callback<CourseFilter>,
    pub on_consult: Callback<String>,
}

fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|sel| sel.value())
}

/// Courses of one language with type and format filters.
#[function_component(CourseList)]
pub fn course_list(p: &Props) -> Html {
    let on_kind = {
        let cb = p.on_filter.clone();
        let filter = p.filter;
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                cb.emit(CourseFilter {
                    kind: CourseType::from_label(&value),
                    ..filter
                });
            }
        })
    };
    let on_format = {
        let cb = p.on_filter.clone();
        let filter = p.filter;
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                cb.emit(CourseFilter {
                    format: CourseFormat::from_label(&value),
                    ..filter
                });
            }
        })
    };

    let heading = tr(
        "catalog.courses_of",
        Some(&BTreeMap::from([("language", p.language_name.as_str())])),
    );
    let all = t("filter.all");
    html! {
        <section class="course-list" aria-labelledby="course-list-title">
            <a class="back-link" href={Route::Home.to_hash()}>{ t("catalog.back") }</a>
            <h2 id="course-list-title">{ heading }</h2>
            <div class="filters" role="group">
                <label for="filter-type">{ t("filter.type") }</label>
                <select id="filter-type" onchange={on_kind}>
                    <option value="" selected={p.filter.kind.is_none()}>{ all.clone() }</option>
                    { for CourseType::ALL.iter().map(|kind| html! {
                        <option value={kind.label()} selected={p.filter.kind == Some(*kind)}>{ kind.label() }</option>
                    }) }
                </select>
                <label for="filter-format">{ t("filter.format") }</label>
                <select id="filter-format" onchange={on_format}>
                    <option value="" selected={p.filter.format.is_none()}>{ all }</option>
                    { for CourseFormat::ALL.iter().map(|format| html! {
                        <option value={format.label()} selected={p.filter.format == Some(*format)}>{ format.label() }</option>
                    }) }
                </select>
            </div>
            if p.courses.is_empty() {
                <p class="empty-state">{ t("catalog.empty") }</p>
            } else {
                <div class="card-grid">
                    { for p.courses.iter().map(|course| html! {
                        <CourseCard key={course.slug.clone()} course={course.clone()} on_consult={p.on_consult.clone()} />
                    }) }
                </div>
            }
        </section>
    }
}
