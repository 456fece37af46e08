use super::contact_form::ContactForm;
use super::header::PROFILE_BUTTON_ID;
use super::modal::Modal;
use crate::i18n::{fmt_phone, t};
use parsa_core::{ContactDetails, UserInfo};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProfileProps {
    pub profile: Option<UserInfo>,
    pub on_close: Callback<()>,
    pub on_save: Callback<ContactDetails>,
}

/// Profile editor for a visitor who already left contact details.
#[function_component(ProfileModal)]
pub fn profile_modal(p: &ProfileProps) -> Html {
    let saved = use_state(|| false);
    let on_save = {
        let saved = saved.clone();
        let cb = p.on_save.clone();
        Callback::from(move |contact: ContactDetails| {
            cb.emit(contact);
            saved.set(true);
        })
    };
    let initial = p.profile.as_ref().map(ContactDetails::from).unwrap_or_default();
    let course = p
        .profile
        .as_ref()
        .and_then(|info| info.course_of_interest.clone())
        .unwrap_or_else(|| t("profile.none"));
    let phone = p
        .profile
        .as_ref()
        .map(|info| fmt_phone(&info.phone))
        .unwrap_or_default();

    html! {
        <Modal title={t("profile.title")} on_close={p.on_close.clone()} return_focus_id={AttrValue::from(PROFILE_BUTTON_ID)}>
            <dl class="profile-summary">
                <dt>{ t("form.phone") }</dt><dd dir="ltr">{ phone }</dd>
                <dt>{ t("profile.course_of_interest") }</dt><dd>{ course }</dd>
            </dl>
            <ContactForm id="profile" initial={initial} submit_label={t("form.save")} on_submit={on_save} />
            if *saved {
                <p class="form-success" role="status">{ t("profile.saved") }</p>
            }
        </Modal>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct UserInfoProps {
    pub on_close: Callback<()>,
    pub on_save: Callback<ContactDetails>,
}

/// First-time contact capture, shown instead of the profile when none is stored.
#[function_component(UserInfoModal)]
pub fn user_info_modal(p: &UserInfoProps) -> Html {
    html! {
        <Modal
            title={t("user_info.title")}
            description={AttrValue::from(t("user_info.intro"))}
            on_close={p.on_close.clone()}
            return_focus_id={AttrValue::from(PROFILE_BUTTON_ID)}
        >
            <ContactForm id="user-info" submit_label={t("form.submit")} on_submit={p.on_save.clone()} />
        </Modal>
    }
}
