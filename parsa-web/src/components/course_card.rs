use crate::i18n::{fmt_price, t};
use parsa_core::{Course, CourseStatus, Route};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub course: Course,
    /// Receives the course slug.
    pub on_consult: Callback<String>,
}

#[function_component(CourseCard)]
pub fn course_card(p: &Props) -> Html {
    let course = &p.course;
    let on_consult = {
        let cb = p.on_consult.clone();
        let slug = course.slug.clone();
        Callback::from(move |_| cb.emit(slug.clone()))
    };
    html! {
        <article class="course-card">
            <header class="course-card__header">
                <h3>{ format!("{} {}", course.language, course.level) }</h3>
                <StatusBadge status={course.status} />
            </header>
            <dl class="course-card__facts">
                <dt>{ t("course.type") }</dt><dd>{ course.kind.label() }</dd>
                <dt>{ t("course.format") }</dt><dd>{ course.format.label() }</dd>
                if !course.schedule.is_empty() {
                    <dt>{ t("course.schedule") }</dt><dd>{ course.schedule.clone() }</dd>
                }
                <dt>{ t("course.price") }</dt><dd class="price">{ fmt_price(course.price) }</dd>
            </dl>
            if !course.tags.is_empty() {
                <ul class="tags">
                    { for course.tags.iter().map(|tag| html! { <li>{ tag.clone() }</li> }) }
                </ul>
            }
            <div class="course-card__actions">
                <a class="button secondary" href={Route::course(&course.slug).to_hash()}>{ t("course.details") }</a>
                <button type="button" class="button" onclick={on_consult}>{ t("course.consult") }</button>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq, Clone, Copy)]
pub struct BadgeProps {
    pub status: CourseStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(p: &BadgeProps) -> Html {
    let modifier = match p.status {
        CourseStatus::Enrolling => "badge--open",
        CourseStatus::Full => "badge--full",
        CourseStatus::StartingSoon => "badge--soon",
    };
    html! { <span class={classes!("badge", modifier)}>{ p.status.label() }</span> }
}
