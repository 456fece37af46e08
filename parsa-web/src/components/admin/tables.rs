use crate::i18n::{fmt_count, fmt_date_iso, fmt_phone, fmt_price, localize_digits, t};
use parsa_core::{ClubMember, Course, Language, RegisteredUser};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RowActionsProps {
    pub on_edit: Callback<()>,
    pub on_delete: Callback<()>,
}

#[function_component(RowActions)]
fn row_actions(p: &RowActionsProps) -> Html {
    let edit = p.on_edit.reform(|_: MouseEvent| ());
    let delete = p.on_delete.reform(|_: MouseEvent| ());
    html! {
        <td class="row-actions">
            <button type="button" onclick={edit}>{ t("admin.edit") }</button>
            <button type="button" class="danger" onclick={delete}>{ t("admin.delete") }</button>
        </td>
    }
}

fn empty_row(columns: usize) -> Html {
    html! {
        <tr><td colspan={columns.to_string()} class="empty-state">{ t("admin.empty") }</td></tr>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CoursesProps {
    pub courses: Vec<Course>,
    pub on_edit: Callback<Course>,
    pub on_delete: Callback<Course>,
}

#[function_component(CoursesTable)]
pub fn courses_table(p: &CoursesProps) -> Html {
    let rows = p.courses.iter().map(|course| {
        let on_edit = {
            let course = course.clone();
            p.on_edit.reform(move |()| course.clone())
        };
        let on_delete = {
            let course = course.clone();
            p.on_delete.reform(move |()| course.clone())
        };
        html! {
            <tr key={course.slug.clone()}>
                <td>{ course.language.clone() }</td>
                <td>{ course.level.clone() }</td>
                <td>{ course.kind.label() }</td>
                <td>{ course.format.label() }</td>
                <td>{ fmt_price(course.price) }</td>
                <td>{ course.status.label() }</td>
                <RowActions {on_edit} {on_delete} />
            </tr>
        }
    });
    html! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>{ t("admin.col.language") }</th>
                    <th>{ t("admin.col.level") }</th>
                    <th>{ t("admin.col.type") }</th>
                    <th>{ t("admin.col.format") }</th>
                    <th>{ t("admin.col.price") }</th>
                    <th>{ t("admin.col.status") }</th>
                    <th>{ t("admin.col.actions") }</th>
                </tr>
            </thead>
            <tbody>
                if p.courses.is_empty() { { empty_row(7) } } else { { for rows } }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LanguagesProps {
    pub languages: Vec<Language>,
    pub on_edit: Callback<Language>,
    pub on_delete: Callback<Language>,
}

#[function_component(LanguagesTable)]
pub fn languages_table(p: &LanguagesProps) -> Html {
    let rows = p.languages.iter().map(|language| {
        let on_edit = {
            let language = language.clone();
            p.on_edit.reform(move |()| language.clone())
        };
        let on_delete = {
            let language = language.clone();
            p.on_delete.reform(move |()| language.clone())
        };
        html! {
            <tr key={language.name.clone()}>
                <td>{ language.name.clone() }</td>
                <td>{ language.description.clone() }</td>
                <td>{ fmt_count(language.course_count) }</td>
                <RowActions {on_edit} {on_delete} />
            </tr>
        }
    });
    html! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>{ t("admin.col.name") }</th>
                    <th>{ t("admin.col.description") }</th>
                    <th>{ t("admin.col.course_count") }</th>
                    <th>{ t("admin.col.actions") }</th>
                </tr>
            </thead>
            <tbody>
                if p.languages.is_empty() { { empty_row(4) } } else { { for rows } }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LeadsProps {
    pub leads: Vec<RegisteredUser>,
}

/// Consultation requests, newest first as the API returns them.
#[function_component(LeadsTable)]
pub fn leads_table(p: &LeadsProps) -> Html {
    let rows = p.leads.iter().map(|lead| {
        html! {
            <tr key={lead.id.to_string()}>
                <td>{ lead.name.clone() }</td>
                <td dir="ltr">{ fmt_phone(&lead.phone) }</td>
                <td>{ lead.city.clone() }</td>
                <td>{ format!("{} {}", lead.course_of_interest, lead.level).trim().to_string() }</td>
                <td>{ fmt_date_iso(&lead.created_at) }</td>
            </tr>
        }
    });
    html! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>{ t("admin.col.name") }</th>
                    <th>{ t("admin.col.phone") }</th>
                    <th>{ t("admin.col.city") }</th>
                    <th>{ t("admin.col.course") }</th>
                    <th>{ t("admin.col.date") }</th>
                </tr>
            </thead>
            <tbody>
                if p.leads.is_empty() { { empty_row(5) } } else { { for rows } }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct MembersProps {
    pub members: Vec<ClubMember>,
    pub on_edit: Callback<ClubMember>,
    pub on_delete: Callback<ClubMember>,
}

#[function_component(MembersTable)]
pub fn members_table(p: &MembersProps) -> Html {
    let rows = p.members.iter().map(|member| {
        let on_edit = {
            let member = member.clone();
            p.on_edit.reform(move |()| member.clone())
        };
        let on_delete = {
            let member = member.clone();
            p.on_delete.reform(move |()| member.clone())
        };
        let key = member
            .id
            .map_or_else(|| member.phone_number.clone(), |id| id.to_string());
        html! {
            <tr key={key}>
                <td>{ member.name.clone() }</td>
                <td dir="ltr">{ fmt_phone(&member.phone_number) }</td>
                <td>{ member.status.label() }</td>
                <td>{ member.magic_number.map(|n| localize_digits(&n.to_string())).unwrap_or_default() }</td>
                <td dir="ltr">{ member.discount_code.clone().unwrap_or_default() }</td>
                <td>{ member.created_at.as_deref().map(fmt_date_iso).unwrap_or_default() }</td>
                <RowActions {on_edit} {on_delete} />
            </tr>
        }
    });
    html! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>{ t("admin.col.name") }</th>
                    <th>{ t("admin.col.phone") }</th>
                    <th>{ t("admin.col.status") }</th>
                    <th>{ t("admin.col.magic_number") }</th>
                    <th>{ t("admin.col.discount_code") }</th>
                    <th>{ t("admin.col.date") }</th>
                    <th>{ t("admin.col.actions") }</th>
                </tr>
            </thead>
            <tbody>
                if p.members.is_empty() { { empty_row(7) } } else { { for rows } }
            </tbody>
        </table>
    }
}
