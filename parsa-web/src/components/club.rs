use super::contact_form::input_value;
use super::header::CLUB_BUTTON_ID;
use super::modal::Modal;
use crate::i18n::{localize_digits, t};
use parsa_core::{
    ClubCodeRequest, ClubFlow, ClubMode, ClubRegistration, ClubRequest, ClubVerification,
    MessageKind, to_ascii_digit,
};
use yew::prelude::*;

/// One club form submission, answered with the flow's next state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubSubmission {
    pub flow: ClubFlow,
    pub request: ClubRequest,
    pub on_done: Callback<ClubFlow>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_close: Callback<()>,
    pub on_submit: Callback<ClubSubmission>,
    /// Starting state; tests render the later steps directly.
    #[prop_or_default]
    pub initial: ClubFlow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ClubFields {
    first_name: String,
    last_name: String,
    mobile: String,
    code: String,
}

fn ascii_digits(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(to_ascii_digit)
        .collect()
}

impl ClubFields {
    fn request_for(&self, flow: &ClubFlow) -> Option<ClubRequest> {
        let mobile = ascii_digits(&self.mobile);
        match flow.mode {
            ClubMode::Register => {
                let first_name = self.first_name.trim();
                let last_name = self.last_name.trim();
                if first_name.is_empty() || last_name.is_empty() || mobile.is_empty() {
                    return None;
                }
                Some(ClubRequest::Register(ClubRegistration {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    mobile,
                }))
            }
            ClubMode::Login => {
                (!mobile.is_empty()).then(|| ClubRequest::RequestCode(ClubCodeRequest { mobile }))
            }
            ClubMode::Verify => {
                let code = ascii_digits(&self.code);
                (!code.is_empty()).then(|| {
                    ClubRequest::Verify(ClubVerification {
                        mobile: flow.mobile.clone(),
                        code,
                    })
                })
            }
            ClubMode::Discount(_) => None,
        }
    }
}

/// Students' club: register, request an SMS code, verify it, show the discount code.
#[function_component(ClubModal)]
pub fn club_modal(p: &Props) -> Html {
    let flow = use_state(|| p.initial.clone());
    let fields = use_state(ClubFields::default);
    let busy = use_state(|| false);

    let field = |apply: fn(&mut ClubFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                let mut next = (*fields).clone();
                apply(&mut next, value);
                fields.set(next);
            }
        })
    };
    let on_first_name = field(|f, v| f.first_name = v);
    let on_last_name = field(|f, v| f.last_name = v);
    let on_mobile = field(|f, v| f.mobile = v);
    let on_code = field(|f, v| f.code = v);

    let on_submit = {
        let flow = flow.clone();
        let fields = fields.clone();
        let busy = busy.clone();
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let Some(request) = fields.request_for(&flow) else {
                flow.set((*flow).clone().failed("form.required"));
                return;
            };
            busy.set(true);
            let flow = flow.clone();
            let busy = busy.clone();
            cb.emit(ClubSubmission {
                flow: (*flow).clone(),
                request,
                on_done: Callback::from(move |next: ClubFlow| {
                    busy.set(false);
                    flow.set(next);
                }),
            });
        })
    };
    let switch = |mode: ClubMode| {
        let flow = flow.clone();
        Callback::from(move |_| flow.set((*flow).clone().switch_to(mode.clone())))
    };
    let on_reset = {
        let flow = flow.clone();
        let fields = fields.clone();
        Callback::from(move |_| {
            fields.set(ClubFields::default());
            flow.set((*flow).clone().reset());
        })
    };

    let banner = flow.message.map(|message| {
        let (class, role) = match message.kind {
            MessageKind::Success => ("form-success", "status"),
            MessageKind::Error => ("form-error", "alert"),
        };
        html! { <p class={class} role={role}>{ t(message.key) }</p> }
    });

    let (heading, body) = match &flow.mode {
        ClubMode::Register => (
            t("club.register_title"),
            html! {
                <>
                    <label for="club-first-name">{ t("club.first_name") }</label>
                    <input id="club-first-name" type="text" value={fields.first_name.clone()} oninput={on_first_name} />
                    <label for="club-last-name">{ t("club.last_name") }</label>
                    <input id="club-last-name" type="text" value={fields.last_name.clone()} oninput={on_last_name} />
                    <label for="club-mobile">{ t("club.mobile") }</label>
                    <input id="club-mobile" type="tel" dir="ltr" value={fields.mobile.clone()} oninput={on_mobile} />
                    <button type="submit" class="button" disabled={*busy}>{ t("club.register") }</button>
                    <button type="button" class="link" onclick={switch(ClubMode::Login)}>{ t("club.to_login") }</button>
                </>
            },
        ),
        ClubMode::Login => (
            t("club.login_title"),
            html! {
                <>
                    <label for="club-mobile">{ t("club.mobile") }</label>
                    <input id="club-mobile" type="tel" dir="ltr" value={fields.mobile.clone()} oninput={on_mobile} />
                    <button type="submit" class="button" disabled={*busy}>{ t("club.request_code") }</button>
                    <button type="button" class="link" onclick={switch(ClubMode::Register)}>{ t("club.to_register") }</button>
                </>
            },
        ),
        ClubMode::Verify => (
            t("club.verify_title"),
            html! {
                <>
                    <p class="club-mobile" dir="ltr">{ localize_digits(&flow.mobile) }</p>
                    <label for="club-code">{ t("club.code") }</label>
                    <input id="club-code" type="text" inputmode="numeric" dir="ltr" autocomplete="one-time-code" value={fields.code.clone()} oninput={on_code} />
                    <button type="submit" class="button" disabled={*busy}>{ t("club.verify") }</button>
                    <button type="button" class="link" onclick={switch(ClubMode::Login)}>{ t("club.change_number") }</button>
                </>
            },
        ),
        ClubMode::Discount(code) => (
            t("club.discount_title"),
            html! {
                <>
                    <p class="discount-code" dir="ltr">{ code.clone() }</p>
                    <p>{ t("club.discount_hint") }</p>
                    <button type="button" class="button secondary" onclick={on_reset}>{ t("club.reset") }</button>
                </>
            },
        ),
    };

    html! {
        <Modal title={t("club.title")} on_close={p.on_close.clone()} return_focus_id={AttrValue::from(CLUB_BUTTON_ID)}>
            <h3>{ heading }</h3>
            { banner.unwrap_or_default() }
            <form class="club-form" onsubmit={on_submit} novalidate=true>
                { body }
            </form>
        </Modal>
    }
}
