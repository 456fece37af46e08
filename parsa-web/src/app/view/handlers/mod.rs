mod admin;
mod leads;
mod overlays;

use parsa_core::{
    AdminEditor, CatalogMutation, ClubMember, ContactDetails, CourseFilter, RegisteredUser,
    RouterAction, ViewState,
};
use std::rc::Rc;
use yew::prelude::*;

use crate::components::admin::login::LoginAttempt;
use crate::components::admin::panel::MemberRequest;
use crate::components::admin::{ListRequest, ListState};
use crate::components::club::ClubSubmission;
use crate::components::consultation::LeadSubmission;

use admin::{
    build_catalog_mutation, build_load_leads, build_load_members, build_login, build_logout,
    build_member_mutation,
};
use leads::{build_club_submit, build_consultation_submit, build_profile_save};
use overlays::{build_close_course, build_retry_load, dispatch_on};

/// Callbacks handed to the admin panel.
#[derive(Clone)]
pub struct AdminHandlers {
    pub login: Callback<LoginAttempt>,
    pub logout: Callback<()>,
    pub open_editor: Callback<AdminEditor>,
    pub close_editor: Callback<()>,
    pub catalog_mutation: Callback<CatalogMutation>,
    pub member_mutation: Callback<MemberRequest>,
    pub load_leads: ListRequest<RegisteredUser>,
    pub load_members: ListRequest<ClubMember>,
}

/// Every callback the site shell passes down, built once per render.
#[derive(Clone)]
pub struct SiteHandlers {
    pub open_profile: Callback<()>,
    pub close_profile: Callback<()>,
    pub close_user_info: Callback<()>,
    pub save_profile: Callback<ContactDetails>,
    pub open_club: Callback<()>,
    pub close_club: Callback<()>,
    pub club_submit: Callback<ClubSubmission>,
    pub open_consultation: Callback<String>,
    pub close_consultation: Callback<()>,
    pub consultation_submit: Callback<LeadSubmission>,
    pub close_course: Callback<()>,
    pub set_filter: Callback<CourseFilter>,
    pub retry_load: Callback<()>,
    pub admin: AdminHandlers,
}

impl SiteHandlers {
    #[must_use]
    pub fn new(state: &Rc<ViewState>, dispatch: &Callback<RouterAction>) -> Self {
        Self {
            open_profile: dispatch_on(dispatch, || RouterAction::OpenProfile),
            close_profile: dispatch_on(dispatch, || RouterAction::CloseProfile),
            close_user_info: dispatch_on(dispatch, || RouterAction::CloseUserInfo),
            save_profile: build_profile_save(state, dispatch),
            open_club: dispatch_on(dispatch, || RouterAction::OpenClub),
            close_club: dispatch_on(dispatch, || RouterAction::CloseClub),
            club_submit: build_club_submit(),
            open_consultation: dispatch.reform(RouterAction::OpenConsultation),
            close_consultation: dispatch_on(dispatch, || RouterAction::CloseConsultation),
            consultation_submit: build_consultation_submit(state, dispatch),
            close_course: build_close_course(),
            set_filter: dispatch.reform(RouterAction::SetFilter),
            retry_load: build_retry_load(dispatch),
            admin: AdminHandlers {
                login: build_login(dispatch),
                logout: build_logout(dispatch),
                open_editor: dispatch.reform(RouterAction::OpenEditor),
                close_editor: dispatch_on(dispatch, || RouterAction::CloseEditor),
                catalog_mutation: build_catalog_mutation(dispatch),
                member_mutation: build_member_mutation(dispatch),
                load_leads: build_load_leads(),
                load_members: build_load_members(),
            },
        }
    }
}

/// Report a fetched list, or its failure, to the panel.
fn report_list<T, E: std::fmt::Display>(
    what: &str,
    result: Result<Vec<T>, E>,
    on_done: &Callback<ListState<T>>,
) {
    match result {
        Ok(rows) => on_done.emit(ListState::Loaded(rows)),
        Err(err) => {
            log::warn!("failed to load {what}: {err}");
            on_done.emit(ListState::Failed);
        }
    }
}
