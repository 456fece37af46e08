//! Editor forms opened from the admin tables.

use crate::components::contact_form::{input_value, select_value};
use crate::i18n::t;
use parsa_core::{
    ClubMember, ClubStatus, Course, CourseDraft, CourseFormat, CourseStatus, CourseType,
    DraftError, Language,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

fn textarea_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        .map(|area| area.value())
}

/// Translation key for a rejected course draft.
#[must_use]
pub const fn draft_error_key(err: DraftError) -> &'static str {
    match err {
        DraftError::MissingLanguage => "form.missing_language",
        DraftError::MissingLevel => "form.missing_level",
        DraftError::InvalidPrice => "form.invalid_price",
    }
}

/// Input callback writing one field of the state value.
fn text_field<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(value) = input_value(&e).or_else(|| textarea_value(&e)) {
            let mut next = (*state).clone();
            apply(&mut next, value);
            state.set(next);
        }
    })
}

fn select_field<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, &str),
) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        if let Some(value) = select_value(&e) {
            let mut next = (*state).clone();
            apply(&mut next, &value);
            state.set(next);
        }
    })
}

fn form_buttons(on_cancel: &Callback<()>) -> Html {
    let cancel = on_cancel.reform(|_: MouseEvent| ());
    html! {
        <div class="form-actions">
            <button type="submit" class="button">{ t("form.save") }</button>
            <button type="button" class="button secondary" onclick={cancel}>{ t("form.cancel") }</button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CourseFormProps {
    pub draft: CourseDraft,
    /// Names offered as suggestions for the language field.
    pub languages: Vec<String>,
    pub on_save: Callback<Course>,
    pub on_cancel: Callback<()>,
}

#[function_component(CourseForm)]
pub fn course_form(p: &CourseFormProps) -> Html {
    let draft = use_state(|| p.draft.clone());
    let error = use_state(|| None::<DraftError>);

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let cb = p.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match draft.to_course() {
                Ok(course) => {
                    error.set(None);
                    cb.emit(course);
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    html! {
        <form class="admin-form" onsubmit={on_submit} novalidate=true>
            <label for="course-language">{ t("admin.col.language") }</label>
            <input id="course-language" type="text" list="course-language-names" value={draft.language.clone()}
                oninput={text_field(&draft, |d, v| d.language = v)} />
            <datalist id="course-language-names">
                { for p.languages.iter().map(|name| html! { <option value={name.clone()} /> }) }
            </datalist>
            <label for="course-level">{ t("admin.col.level") }</label>
            <input id="course-level" type="text" value={draft.level.clone()}
                oninput={text_field(&draft, |d, v| d.level = v)} />
            <label for="course-type">{ t("admin.col.type") }</label>
            <select id="course-type" onchange={select_field(&draft, |d, v| d.kind = CourseType::from_label(v).unwrap_or(d.kind))}>
                { for CourseType::ALL.iter().map(|kind| html! {
                    <option value={kind.label()} selected={draft.kind == *kind}>{ kind.label() }</option>
                }) }
            </select>
            <label for="course-format">{ t("admin.col.format") }</label>
            <select id="course-format" onchange={select_field(&draft, |d, v| d.format = CourseFormat::from_label(v).unwrap_or(d.format))}>
                { for CourseFormat::ALL.iter().map(|format| html! {
                    <option value={format.label()} selected={draft.format == *format}>{ format.label() }</option>
                }) }
            </select>
            <label for="course-schedule">{ t("admin.col.schedule") }</label>
            <input id="course-schedule" type="text" value={draft.schedule.clone()}
                oninput={text_field(&draft, |d, v| d.schedule = v)} />
            <label for="course-price">{ t("admin.col.price") }</label>
            <input id="course-price" type="text" inputmode="numeric" dir="ltr" value={draft.price.clone()}
                oninput={text_field(&draft, |d, v| d.price = v)} />
            <label for="course-status">{ t("admin.col.status") }</label>
            <select id="course-status" onchange={select_field(&draft, |d, v| d.status = CourseStatus::from_label(v).unwrap_or(d.status))}>
                { for CourseStatus::ALL.iter().map(|status| html! {
                    <option value={status.label()} selected={draft.status == *status}>{ status.label() }</option>
                }) }
            </select>
            <label for="course-description">{ t("admin.col.description") }</label>
            <textarea id="course-description" rows="3" value={draft.description.clone()}
                oninput={text_field(&draft, |d, v| d.description = v)} />
            <label for="course-tags">{ t("admin.col.tags") }</label>
            <input id="course-tags" type="text" value={draft.tags.clone()}
                oninput={text_field(&draft, |d, v| d.tags = v)} />
            if let Some(err) = *error {
                <p class="form-error" role="alert">{ t(draft_error_key(err)) }</p>
            }
            { form_buttons(&p.on_cancel) }
        </form>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LanguageFormProps {
    pub language: Language,
    pub on_save: Callback<Language>,
    pub on_cancel: Callback<()>,
}

#[function_component(LanguageForm)]
pub fn language_form(p: &LanguageFormProps) -> Html {
    let language = use_state(|| p.language.clone());
    let missing = use_state(|| false);

    let on_submit = {
        let language = language.clone();
        let missing = missing.clone();
        let cb = p.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = language.name.trim().to_string();
            if name.is_empty() {
                missing.set(true);
                return;
            }
            missing.set(false);
            cb.emit(Language {
                name,
                description: language.description.trim().to_string(),
                image: language.image.trim().to_string(),
                ..(*language).clone()
            });
        })
    };

    html! {
        <form class="admin-form" onsubmit={on_submit} novalidate=true>
            <label for="language-name">{ t("admin.col.name") }</label>
            <input id="language-name" type="text" value={language.name.clone()}
                oninput={text_field(&language, |l, v| l.name = v)} />
            <label for="language-description">{ t("admin.col.description") }</label>
            <textarea id="language-description" rows="3" value={language.description.clone()}
                oninput={text_field(&language, |l, v| l.description = v)} />
            <label for="language-image">{ t("admin.col.image") }</label>
            <input id="language-image" type="url" dir="ltr" value={language.image.clone()}
                oninput={text_field(&language, |l, v| l.image = v)} />
            if *missing {
                <p class="form-error" role="alert">{ t("form.required") }</p>
            }
            { form_buttons(&p.on_cancel) }
        </form>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct MemberFormProps {
    pub member: ClubMember,
    pub on_save: Callback<ClubMember>,
    pub on_cancel: Callback<()>,
}

#[function_component(MemberForm)]
pub fn member_form(p: &MemberFormProps) -> Html {
    let member = use_state(|| p.member.clone());
    let missing = use_state(|| false);

    let on_submit = {
        let member = member.clone();
        let missing = missing.clone();
        let cb = p.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = member.name.trim().to_string();
            let phone_number: String = member
                .phone_number
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(parsa_core::to_ascii_digit)
                .collect();
            if name.is_empty() || phone_number.is_empty() {
                missing.set(true);
                return;
            }
            missing.set(false);
            cb.emit(ClubMember {
                name,
                phone_number,
                ..(*member).clone()
            });
        })
    };

    html! {
        <form class="admin-form" onsubmit={on_submit} novalidate=true>
            <label for="member-name">{ t("admin.col.name") }</label>
            <input id="member-name" type="text" value={member.name.clone()}
                oninput={text_field(&member, |m, v| m.name = v)} />
            <label for="member-phone">{ t("admin.col.phone") }</label>
            <input id="member-phone" type="tel" dir="ltr" value={member.phone_number.clone()}
                oninput={text_field(&member, |m, v| m.phone_number = v)} />
            <label for="member-status">{ t("admin.col.status") }</label>
            <select id="member-status" onchange={select_field(&member, |m, v| m.status = ClubStatus::from_label(v).unwrap_or(m.status))}>
                { for ClubStatus::ALL.iter().map(|status| html! {
                    <option value={status.label()} selected={member.status == *status}>{ status.label() }</option>
                }) }
            </select>
            if *missing {
                <p class="form-error" role="alert">{ t("form.required") }</p>
            }
            { form_buttons(&p.on_cancel) }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_errors_map_to_form_messages() {
        assert_eq!(draft_error_key(DraftError::MissingLanguage), "form.missing_language");
        assert_eq!(draft_error_key(DraftError::MissingLevel), "form.missing_level");
        assert_eq!(draft_error_key(DraftError::InvalidPrice), "form.invalid_price");
    }
}
