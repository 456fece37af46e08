use crate::components::contact_form::input_value;
use crate::i18n::{t, tr};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Credentials typed into the sign-in form; the password is still plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginAttempt {
    pub username: String,
    pub password: String,
    /// Receives the failure message, if any.
    pub on_failed: Callback<String>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_login: Callback<LoginAttempt>,
}

#[function_component(AdminLogin)]
pub fn admin_login(p: &Props) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                username.set(value);
            }
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                password.set(value);
            }
        })
    };
    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let cb = p.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);
            busy.set(true);
            let error = error.clone();
            let busy = busy.clone();
            cb.emit(LoginAttempt {
                username: (*username).clone(),
                password: (*password).clone(),
                on_failed: Callback::from(move |message: String| {
                    busy.set(false);
                    error.set(Some(message));
                }),
            });
        })
    };

    html! {
        <section class="admin-login" aria-labelledby="admin-login-title">
            <h2 id="admin-login-title">{ t("admin.login_title") }</h2>
            <form onsubmit={on_submit}>
                <label for="admin-username">{ t("admin.username") }</label>
                <input id="admin-username" type="text" autocomplete="username" dir="ltr" value={(*username).clone()} oninput={on_username} />
                <label for="admin-password">{ t("admin.password") }</label>
                <input id="admin-password" type="password" autocomplete="current-password" dir="ltr" value={(*password).clone()} oninput={on_password} />
                if let Some(message) = (*error).clone() {
                    <p class="form-error" role="alert">
                        { tr("admin.login_failed", Some(&BTreeMap::from([("error", message.as_str())]))) }
                    </p>
                }
                <button type="submit" class="button" disabled={*busy}>{ t("admin.login") }</button>
            </form>
        </section>
    }
}
