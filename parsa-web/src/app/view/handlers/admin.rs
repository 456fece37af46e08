use parsa_core::{
    AdminApi, ApiError, CatalogMutation, ClubMember, MutationOutcome, RegisteredUser, Route,
    RouterAction, apply_catalog_mutation, apply_member_mutation, login, logout,
};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::report_list;
use crate::api::HttpApi;
use crate::app::routing::navigate;
use crate::components::admin::{ListRequest, ListState};
use crate::components::admin::login::LoginAttempt;
use crate::components::admin::panel::MemberRequest;
use crate::dom::alert;
use crate::i18n::tr;
use crate::storage::BrowserStore;

fn alert_rejected(err: &ApiError) {
    let error = err.to_string();
    alert(&tr(
        "admin.mutation_failed",
        Some(&BTreeMap::from([("error", error.as_str())])),
    ));
}

pub fn build_login(dispatch: &Callback<RouterAction>) -> Callback<LoginAttempt> {
    let dispatch = dispatch.clone();
    Callback::from(move |attempt: LoginAttempt| {
        let dispatch = dispatch.clone();
        spawn_local(async move {
            let api = HttpApi::from_env();
            match login(&api, &BrowserStore::session(), &attempt.username, &attempt.password).await {
                Ok(()) => dispatch.emit(RouterAction::AdminLoggedIn),
                Err(err) => {
                    log::warn!("admin login failed: {err}");
                    attempt.on_failed.emit(err.to_string());
                }
            }
        });
    })
}

pub fn build_logout(dispatch: &Callback<RouterAction>) -> Callback<()> {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
        logout(&BrowserStore::session());
        dispatch.emit(RouterAction::AdminLoggedOut);
        navigate(&Route::Home);
    })
}

/// Send a catalog edit; a refusal raises an alert and triggers no reload.
pub fn build_catalog_mutation(dispatch: &Callback<RouterAction>) -> Callback<CatalogMutation> {
    let dispatch = dispatch.clone();
    Callback::from(move |mutation: CatalogMutation| {
        let dispatch = dispatch.clone();
        spawn_local(async move {
            let outcome = apply_catalog_mutation(&HttpApi::from_env(), &mutation).await;
            if let MutationOutcome::Rejected(err) = &outcome {
                alert_rejected(err);
            }
            dispatch.emit(RouterAction::CatalogMutated(outcome));
        });
    })
}

pub fn build_member_mutation(dispatch: &Callback<RouterAction>) -> Callback<MemberRequest> {
    let dispatch = dispatch.clone();
    Callback::from(move |request: MemberRequest| {
        let dispatch = dispatch.clone();
        spawn_local(async move {
            match apply_member_mutation(&HttpApi::from_env(), &request.mutation).await {
                MutationOutcome::Applied(members) => {
                    request.on_reloaded.emit(members);
                    dispatch.emit(RouterAction::CloseEditor);
                }
                MutationOutcome::ReloadFailed(_) => dispatch.emit(RouterAction::CloseEditor),
                MutationOutcome::Rejected(err) => alert_rejected(&err),
            }
        });
    })
}

pub fn build_load_leads() -> ListRequest<RegisteredUser> {
    Callback::from(|on_done: Callback<ListState<RegisteredUser>>| {
        spawn_local(async move {
            report_list("leads", HttpApi::from_env().fetch_leads().await, &on_done);
        });
    })
}

pub fn build_load_members() -> ListRequest<ClubMember> {
    Callback::from(|on_done: Callback<ListState<ClubMember>>| {
        spawn_local(async move {
            report_list(
                "club members",
                HttpApi::from_env().fetch_club_members().await,
                &on_done,
            );
        });
    })
}
