use parsa_core::{AdminTab, Screen, ViewState};
use yew::prelude::*;

use super::handlers::SiteHandlers;
use crate::components::admin::{AdminLogin, AdminPanel};
use crate::components::course_list::CourseList;
use crate::components::language_grid::LanguageGrid;
use crate::components::quick_stats::QuickStats;
use crate::i18n::t;

pub fn render_screen(state: &ViewState, handlers: &SiteHandlers) -> Html {
    match state.screen() {
        Screen::Loading => html! {
            <p class="loading" role="status">{ t("loading.catalog") }</p>
        },
        Screen::LoadFailed(message) => {
            let retry = handlers.retry_load.reform(|_: MouseEvent| ());
            html! {
                <div class="load-error" role="alert">
                    <p>{ t("error.load_failed") }</p>
                    <p class="load-error__detail" dir="ltr">{ message }</p>
                    <button type="button" class="button" onclick={retry}>{ t("error.retry") }</button>
                </div>
            }
        }
        Screen::Main => html! {
            <>
                <QuickStats
                    language_count={state.catalog.languages.len()}
                    course_count={state.catalog.courses.len()}
                />
                { render_catalog(state, handlers) }
            </>
        },
        Screen::AdminLogin => html! { <AdminLogin on_login={handlers.admin.login.clone()} /> },
        Screen::AdminPanel(tab) => render_admin(state, handlers, tab),
    }
}

/// Course list of the selected language, or the language grid when none is selected.
fn render_catalog(state: &ViewState, handlers: &SiteHandlers) -> Html {
    match state.selection.language_name.as_ref() {
        Some(language_name) => html! {
            <CourseList
                language_name={language_name.clone()}
                courses={state.visible_courses().into_iter().cloned().collect::<Vec<_>>()}
                filter={state.filter}
                on_filter={handlers.set_filter.clone()}
                on_consult={handlers.open_consultation.clone()}
            />
        },
        None => html! { <LanguageGrid languages={state.catalog.languages.clone()} /> },
    }
}

fn render_admin(state: &ViewState, handlers: &SiteHandlers, tab: AdminTab) -> Html {
    let admin = &handlers.admin;
    html! {
        <AdminPanel
            {tab}
            catalog={state.catalog.clone()}
            editor={state.editor.clone()}
            on_logout={admin.logout.clone()}
            on_open_editor={admin.open_editor.clone()}
            on_close_editor={admin.close_editor.clone()}
            on_catalog_mutation={admin.catalog_mutation.clone()}
            on_member_mutation={admin.member_mutation.clone()}
            load_leads={admin.load_leads.clone()}
            load_members={admin.load_members.clone()}
        />
    }
}
