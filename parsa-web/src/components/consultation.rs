use super::contact_form::ContactForm;
use super::modal::Modal;
use crate::i18n::{t, tr};
use parsa_core::{ContactDetails, Course, UserInfo};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Progress of a consultation request, reported back by the submit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

/// One press of the consultation form's submit button.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadSubmission {
    pub course: Course,
    pub contact: ContactDetails,
    pub on_status: Callback<SubmitStatus>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub course: Course,
    pub profile: Option<UserInfo>,
    pub on_close: Callback<()>,
    pub on_submit: Callback<LeadSubmission>,
}

#[function_component(ConsultationModal)]
pub fn consultation_modal(p: &Props) -> Html {
    let status = use_state(SubmitStatus::default);

    let on_submit = {
        let status = status.clone();
        let course = p.course.clone();
        let cb = p.on_submit.clone();
        Callback::from(move |contact: ContactDetails| {
            let status = status.clone();
            cb.emit(LeadSubmission {
                course: course.clone(),
                contact,
                on_status: Callback::from(move |next| status.set(next)),
            });
        })
    };

    let subtitle = tr(
        "consult.for_course",
        Some(&BTreeMap::from([
            ("language", p.course.language.as_str()),
            ("level", p.course.level.as_str()),
        ])),
    );
    let initial = p.profile.as_ref().map(ContactDetails::from).unwrap_or_default();

    html! {
        <Modal title={t("consult.title")} description={AttrValue::from(subtitle)} on_close={p.on_close.clone()}>
            if *status == SubmitStatus::Sent {
                <p class="form-success" role="status">{ t("consult.success") }</p>
            } else {
                <ContactForm
                    id="consult"
                    initial={initial}
                    submit_label={t("consult.submit")}
                    busy={*status == SubmitStatus::Sending}
                    on_submit={on_submit}
                />
                if *status == SubmitStatus::Failed {
                    <p class="form-error" role="alert">{ t("consult.failed") }</p>
                }
            }
        </Modal>
    }
}
