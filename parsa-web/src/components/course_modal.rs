use super::course_card::StatusBadge;
use super::modal::Modal;
use crate::i18n::{fmt_price, t};
use parsa_core::{Course, CourseStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub course: Course,
    pub on_close: Callback<()>,
    pub on_consult: Callback<String>,
}

/// Detail overlay for the course selected by `#/course/<slug>`.
#[function_component(CourseModal)]
pub fn course_modal(p: &Props) -> Html {
    let course = &p.course;
    let on_consult = {
        let cb = p.on_consult.clone();
        let slug = course.slug.clone();
        Callback::from(move |_| cb.emit(slug.clone()))
    };
    let title = format!("{} {}", course.language, course.level);
    html! {
        <Modal title={title} on_close={p.on_close.clone()} wide=true>
            <dl class="course-detail">
                <dt>{ t("course.level") }</dt><dd>{ course.level.clone() }</dd>
                <dt>{ t("course.type") }</dt><dd>{ course.kind.label() }</dd>
                <dt>{ t("course.format") }</dt><dd>{ course.format.label() }</dd>
                <dt>{ t("course.schedule") }</dt><dd>{ course.schedule.clone() }</dd>
                <dt>{ t("course.price") }</dt><dd class="price">{ fmt_price(course.price) }</dd>
                <dt>{ t("course.status") }</dt><dd><StatusBadge status={course.status} /></dd>
            </dl>
            if !course.description.is_empty() {
                <h3>{ t("course.description") }</h3>
                <p class="course-detail__description">{ course.description.clone() }</p>
            }
            if !course.tags.is_empty() {
                <ul class="tags" aria-label={t("course.tags")}>
                    { for course.tags.iter().map(|tag| html! { <li>{ tag.clone() }</li> }) }
                </ul>
            }
            if course.status == CourseStatus::Full {
                <p class="notice">{ t("course.full_notice") }</p>
            }
            <button type="button" class="button" onclick={on_consult}>{ t("course.consult") }</button>
        </Modal>
    }
}
