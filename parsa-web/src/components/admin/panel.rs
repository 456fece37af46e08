use super::forms::{CourseForm, LanguageForm, MemberForm};
use super::tables::{CoursesTable, LanguagesTable, LeadsTable, MembersTable};
use super::{ListRequest, ListState};
use crate::components::modal::Modal;
use crate::dom::confirm;
use crate::i18n::{t, tr};
use parsa_core::{
    AdminEditor, AdminTab, Catalog, CatalogMutation, ClubMember, Course, Language,
    MemberMutation, RegisteredUser, Route, new_club_member,
};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Club-member edit; `on_reloaded` receives the fresh list once it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRequest {
    pub mutation: MemberMutation,
    pub on_reloaded: Callback<Vec<ClubMember>>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tab: AdminTab,
    pub catalog: Catalog,
    pub editor: Option<AdminEditor>,
    pub on_logout: Callback<()>,
    pub on_open_editor: Callback<AdminEditor>,
    pub on_close_editor: Callback<()>,
    pub on_catalog_mutation: Callback<CatalogMutation>,
    pub on_member_mutation: Callback<MemberRequest>,
    pub load_leads: ListRequest<RegisteredUser>,
    pub load_members: ListRequest<ClubMember>,
}

fn confirm_delete(name: &str) -> bool {
    confirm(&tr(
        "admin.confirm_delete",
        Some(&BTreeMap::from([("name", name)])),
    ))
}

#[function_component(AdminPanel)]
pub fn admin_panel(p: &Props) -> Html {
    let leads = use_state(ListState::<RegisteredUser>::default);
    let members = use_state(ListState::<ClubMember>::default);

    {
        let leads = leads.clone();
        let members = members.clone();
        let load_leads = p.load_leads.clone();
        let load_members = p.load_members.clone();
        use_effect_with(p.tab, move |tab| {
            match tab {
                AdminTab::Leads => {
                    leads.set(ListState::Loading);
                    load_leads.emit(Callback::from(move |next| leads.set(next)));
                }
                AdminTab::Club => {
                    members.set(ListState::Loading);
                    load_members.emit(Callback::from(move |next| members.set(next)));
                }
                AdminTab::Courses | AdminTab::Languages => {}
            }
            || {}
        });
    }

    let member_mutation = {
        let cb = p.on_member_mutation.clone();
        let members = members.clone();
        Callback::from(move |mutation: MemberMutation| {
            let members = members.clone();
            cb.emit(MemberRequest {
                mutation,
                on_reloaded: Callback::from(move |list| members.set(ListState::Loaded(list))),
            });
        })
    };

    let tabs = AdminTab::ALL.iter().map(|tab| {
        let current = *tab == p.tab;
        html! {
            <a
                href={Route::admin(tab.sub_path()).to_hash()}
                class={classes!("tab", current.then_some("tab--active"))}
                aria-current={current.then_some("page")}
            >
                { t(tab.label_key()) }
            </a>
        }
    });

    let open = |editor: AdminEditor| {
        let cb = p.on_open_editor.clone();
        Callback::from(move |_: MouseEvent| cb.emit(editor.clone()))
    };

    let body = match p.tab {
        AdminTab::Courses => {
            let on_edit = p
                .on_open_editor
                .reform(|course: Course| AdminEditor::edit_course(&course));
            let on_delete = {
                let cb = p.on_catalog_mutation.clone();
                Callback::from(move |course: Course| {
                    let label = format!("{} {}", course.language, course.level);
                    match course.id {
                        Some(id) if confirm_delete(&label) => {
                            cb.emit(CatalogMutation::DeleteCourse(id));
                        }
                        Some(_) => {}
                        None => log::warn!("course {label} has no id, cannot delete"),
                    }
                })
            };
            html! {
                <>
                    <button type="button" class="button" onclick={open(AdminEditor::new_course())}>{ t("admin.add_course") }</button>
                    <CoursesTable courses={p.catalog.courses.clone()} {on_edit} {on_delete} />
                </>
            }
        }
        AdminTab::Languages => {
            let on_edit = p.on_open_editor.reform(AdminEditor::Language);
            let on_delete = {
                let cb = p.on_catalog_mutation.clone();
                Callback::from(move |language: Language| match language.id {
                    Some(id) if confirm_delete(&language.name) => {
                        cb.emit(CatalogMutation::DeleteLanguage(id));
                    }
                    Some(_) => {}
                    None => log::warn!("language {} has no id, cannot delete", language.name),
                })
            };
            html! {
                <>
                    <button type="button" class="button" onclick={open(AdminEditor::Language(Language::default()))}>{ t("admin.add_language") }</button>
                    <LanguagesTable languages={p.catalog.languages.clone()} {on_edit} {on_delete} />
                </>
            }
        }
        AdminTab::Leads => match &*leads {
            ListState::Loading => html! { <p class="loading">{ t("loading.list") }</p> },
            ListState::Failed => html! { <p class="form-error" role="alert">{ t("admin.list_failed") }</p> },
            ListState::Loaded(rows) => html! { <LeadsTable leads={rows.clone()} /> },
        },
        AdminTab::Club => {
            let on_edit = p.on_open_editor.reform(AdminEditor::ClubMember);
            let on_delete = {
                let mutate = member_mutation.clone();
                Callback::from(move |member: ClubMember| match member.id {
                    Some(id) if confirm_delete(&member.name) => {
                        mutate.emit(MemberMutation::Delete(id));
                    }
                    Some(_) => {}
                    None => log::warn!("club member {} has no id, cannot delete", member.name),
                })
            };
            let table = match &*members {
                ListState::Loading => html! { <p class="loading">{ t("loading.list") }</p> },
                ListState::Failed => html! { <p class="form-error" role="alert">{ t("admin.list_failed") }</p> },
                ListState::Loaded(rows) => html! { <MembersTable members={rows.clone()} {on_edit} {on_delete} /> },
            };
            html! {
                <>
                    <button type="button" class="button" onclick={open(AdminEditor::ClubMember(new_club_member()))}>{ t("admin.add_member") }</button>
                    { table }
                </>
            }
        }
    };

    let editor = p.editor.as_ref().map(|editor| {
        render_editor(editor, p, &member_mutation)
    });
    let on_logout = p.on_logout.reform(|_: MouseEvent| ());

    html! {
        <section class="admin-panel" aria-labelledby="admin-panel-title">
            <div class="admin-panel__bar">
                <h2 id="admin-panel-title">{ t("admin.panel_title") }</h2>
                <button type="button" class="button secondary" onclick={on_logout}>{ t("admin.logout") }</button>
            </div>
            <nav class="tabs" aria-label={t("admin.panel_title")}>{ for tabs }</nav>
            <div class="admin-panel__body">{ body }</div>
            { editor.unwrap_or_default() }
        </section>
    }
}

fn render_editor(
    editor: &AdminEditor,
    p: &Props,
    member_mutation: &Callback<MemberMutation>,
) -> Html {
    let on_cancel = p.on_close_editor.clone();
    let title_key = match (editor, editor.is_new()) {
        (AdminEditor::Course(_), true) => "admin.course_form_new",
        (AdminEditor::Course(_), false) => "admin.course_form_edit",
        (AdminEditor::Language(_), true) => "admin.language_form_new",
        (AdminEditor::Language(_), false) => "admin.language_form_edit",
        (AdminEditor::ClubMember(_), true) => "admin.member_form_new",
        (AdminEditor::ClubMember(_), false) => "admin.member_form_edit",
    };
    let form = match editor {
        AdminEditor::Course(draft) => {
            let names: Vec<String> = p.catalog.languages.iter().map(|l| l.name.clone()).collect();
            let on_save = p.on_catalog_mutation.reform(CatalogMutation::SaveCourse);
            html! {
                <CourseForm key={format!("course-{:?}", draft.id)} draft={draft.clone()} languages={names} {on_save} on_cancel={on_cancel.clone()} />
            }
        }
        AdminEditor::Language(language) => {
            let on_save = p.on_catalog_mutation.reform(CatalogMutation::SaveLanguage);
            html! {
                <LanguageForm key={format!("language-{:?}", language.id)} language={language.clone()} {on_save} on_cancel={on_cancel.clone()} />
            }
        }
        AdminEditor::ClubMember(member) => {
            let on_save = member_mutation.reform(MemberMutation::Save);
            html! {
                <MemberForm key={format!("member-{:?}", member.id)} member={member.clone()} {on_save} on_cancel={on_cancel.clone()} />
            }
        }
    };
    html! {
        <Modal title={t(title_key)} on_close={on_cancel} wide=true>
            { form }
        </Modal>
    }
}
