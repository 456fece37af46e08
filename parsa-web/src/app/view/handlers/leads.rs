use gloo::timers::future::TimeoutFuture;
use parsa_core::{
    ConsultationRequest, ContactDetails, LeadApi, RouterAction, UserInfo, ViewState, save_profile,
    submit_club_request,
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::a11y::set_status;
use crate::api::HttpApi;
use crate::components::club::ClubSubmission;
use crate::components::consultation::{LeadSubmission, SubmitStatus};
use crate::i18n::t;
use crate::storage::BrowserStore;

/// How long the success message stays up before the overlay closes.
const CONSULT_CLOSE_DELAY_MS: u32 = 3000;

fn persist(info: &UserInfo) {
    if let Err(err) = save_profile(&BrowserStore::local(), info) {
        log::warn!("failed to store profile: {err}");
    }
}

/// Merge the form into the profile, store it, then post the lead.
pub fn build_consultation_submit(
    state: &Rc<ViewState>,
    dispatch: &Callback<RouterAction>,
) -> Callback<LeadSubmission> {
    let profile = state.profile.clone();
    let dispatch = dispatch.clone();
    Callback::from(move |submission: LeadSubmission| {
        let LeadSubmission {
            course,
            contact,
            on_status,
        } = submission;
        let merged = UserInfo::for_consultation(profile.as_ref(), contact, &course);
        persist(&merged);
        dispatch.emit(RouterAction::ProfileStored(merged.clone()));
        on_status.emit(SubmitStatus::Sending);
        let dispatch = dispatch.clone();
        spawn_local(async move {
            let request = ConsultationRequest::new(&merged, &course);
            match HttpApi::from_env().submit_consultation(&request).await {
                Ok(()) => {
                    log::info!("consultation requested for {}", course.slug);
                    on_status.emit(SubmitStatus::Sent);
                    set_status(&t("consult.success"));
                    TimeoutFuture::new(CONSULT_CLOSE_DELAY_MS).await;
                    dispatch.emit(RouterAction::ConsultationSubmitted(merged));
                }
                Err(err) => {
                    log::warn!("consultation request failed: {err}");
                    on_status.emit(SubmitStatus::Failed);
                }
            }
        });
    })
}

/// Save edited contact details, keeping the course of interest.
pub fn build_profile_save(
    state: &Rc<ViewState>,
    dispatch: &Callback<RouterAction>,
) -> Callback<ContactDetails> {
    let profile = state.profile.clone();
    let dispatch = dispatch.clone();
    Callback::from(move |contact: ContactDetails| {
        let info = profile.clone().unwrap_or_default().with_contact(contact);
        persist(&info);
        set_status(&t("profile.saved"));
        dispatch.emit(RouterAction::ProfileSaved(info));
    })
}

pub fn build_club_submit() -> Callback<ClubSubmission> {
    Callback::from(|submission: ClubSubmission| {
        let ClubSubmission {
            flow,
            request,
            on_done,
        } = submission;
        spawn_local(async move {
            let next = submit_club_request(&HttpApi::from_env(), flow, &request).await;
            on_done.emit(next);
        });
    })
}
