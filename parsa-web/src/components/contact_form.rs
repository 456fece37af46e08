use crate::i18n::t;
use parsa_core::{ContactDetails, ContactError};
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Cities offered by the contact forms.
pub const CITIES: &[&str] = &["شیراز", "تهران", "اصفهان", "مشهد", "تبریز"];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Prefix for element ids, unique per form on the page.
    pub id: AttrValue,
    #[prop_or_default]
    pub initial: ContactDetails,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    /// Receives trimmed, validated details.
    pub on_submit: Callback<ContactDetails>,
}

pub(crate) fn input_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
}

pub(crate) fn select_value(e: &Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|sel| sel.value())
}

/// Name, mobile and city fields shared by the consultation and profile overlays.
#[function_component(ContactForm)]
pub fn contact_form(p: &Props) -> Html {
    let details = use_state(|| p.initial.clone());
    let error = use_state(|| None::<ContactError>);

    let on_name = {
        let details = details.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(name) = input_value(&e) {
                details.set(ContactDetails {
                    name,
                    ..(*details).clone()
                });
            }
        })
    };
    let on_phone = {
        let details = details.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(phone) = input_value(&e) {
                details.set(ContactDetails {
                    phone,
                    ..(*details).clone()
                });
            }
        })
    };
    let on_city = {
        let details = details.clone();
        Callback::from(move |e: Event| {
            if let Some(city) = select_value(&e) {
                details.set(ContactDetails {
                    city,
                    ..(*details).clone()
                });
            }
        })
    };
    let on_submit = {
        let details = details.clone();
        let error = error.clone();
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match details.validated() {
                Ok(valid) => {
                    error.set(None);
                    cb.emit(valid);
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    let field_id = |name: &str| format!("{}-{name}", p.id);
    let city = details.city.clone();
    let extra_city = (!city.is_empty() && !CITIES.contains(&city.as_str())).then(|| city.clone());

    html! {
        <form class="contact-form" onsubmit={on_submit} novalidate=true>
            <label for={field_id("name")}>{ t("form.name") }</label>
            <input id={field_id("name")} type="text" autocomplete="name" value={details.name.clone()} oninput={on_name} />
            <label for={field_id("phone")}>{ t("form.phone") }</label>
            <input id={field_id("phone")} type="tel" inputmode="numeric" dir="ltr" placeholder="09xxxxxxxxx" value={details.phone.clone()} oninput={on_phone} />
            <label for={field_id("city")}>{ t("form.city") }</label>
            <select id={field_id("city")} onchange={on_city}>
                <option value="" selected={city.is_empty()}>{ "—" }</option>
                { for CITIES.iter().map(|name| html! {
                    <option value={*name} selected={city == *name}>{ *name }</option>
                }) }
                { for extra_city.map(|name| html! { <option value={name.clone()} selected=true>{ name }</option> }) }
            </select>
            if let Some(err) = *error {
                <p class="form-error" role="alert">{ t(err.message_key()) }</p>
            }
            <button type="submit" class="button" disabled={p.busy}>
                { if p.busy { t("form.sending") } else { p.submit_label.to_string() } }
            </button>
        </form>
    }
}
