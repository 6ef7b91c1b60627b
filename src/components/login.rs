use crate::api::ApiClient;
use crate::components::form_field::TextField;
use crate::error::ApiError;
use crate::forms::FieldErrors;
use crate::router::Page;
use crate::store::{AppSignals, ToastLevel};
use crate::types::{CaptchaInfo, Credential};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");
    let api = use_context::<ApiClient>().expect("ApiClient missing");

    let (password, set_password) = signal(String::new());
    let (answer, set_answer) = signal(String::new());
    let (captcha, set_captcha) = signal(None::<CaptchaInfo>);
    let (crsf, set_crsf) = signal(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    // Captcha and anti-forgery token rotate together
    let challenge_api = api.clone();
    let reload_challenge = Callback::new(move |_: ()| {
        let api = challenge_api.clone();
        spawn_local(async move {
            let (captcha_res, crsf_res) = futures::join!(api.fetch_captcha(), api.fetch_crsf());
            match captcha_res {
                Ok(info) => set_captcha.set(Some(info)),
                Err(e) => warn!("Captcha unavailable: {}", e),
            }
            match crsf_res {
                Ok(token) => set_crsf.set(token.trim().to_string()),
                Err(e) => warn!("CSRF token unavailable: {}", e),
            }
        });
    });
    reload_challenge.run(());

    let login_api = api.clone();
    let do_login = Action::new_local(move |credential: &Credential| {
        let api = login_api.clone();
        let credential = credential.clone();
        async move {
            match api.login(&credential).await {
                Ok(()) => signals.navigate(Page::Channels, false),
                Err(e) => {
                    set_answer.set(String::new());
                    reload_challenge.run(());
                    let message = match e {
                        ApiError::Unauthorized => "Incorrect password or captcha".to_string(),
                        ref other => other.user_message(),
                    };
                    warn!("Login failed: {}", e);
                    signals.notify(ToastLevel::Error, message);
                }
            }
        }
    });
    let busy = do_login.pending();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut errs = FieldErrors::new();
        errs.require("password", &password.get_untracked(), "Please input your password");
        let challenge = captcha.get_untracked();
        if challenge.is_some() {
            errs.require("answer", &answer.get_untracked(), "Please enter the captcha");
        }
        errors.set(errs.clone());
        if !errs.is_empty() {
            return;
        }
        do_login.dispatch(Credential {
            password: password.get_untracked(),
            answer: answer.get_untracked(),
            captcha_id: challenge.map(|c| c.captcha_id).unwrap_or_default(),
            crsf: crsf.get_untracked(),
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-100 p-6">
            <div class="card w-full max-w-sm bg-base-200 shadow-2xl border border-white/5">
                <form class="card-body gap-3" spellcheck="false" on:submit=on_submit>
                    <h2 class="text-3xl font-black tracking-tighter text-success">"LiveTV"</h2>

                    <TextField label="Password" placeholder="Password" input_type="password"
                        value=password
                        on_input=Callback::new(move |v| set_password.set(v))
                        error=Signal::derive(move || errors.with(|e| e.get("password")))
                        disabled=Signal::derive(|| false) />

                    <Show when=move || captcha.get().is_some()>
                        <div class="flex items-end gap-2">
                            <img class="h-10 rounded cursor-pointer bg-base-300" alt="captcha image" title="Click for another one"
                                src=move || captcha.get().map(|c| c.data).unwrap_or_default()
                                on:click=move |_| reload_challenge.run(()) />
                            <div class="flex-1">
                                <TextField label="Captcha" maxlength="4"
                                    value=answer
                                    on_input=Callback::new(move |v| set_answer.set(v))
                                    error=Signal::derive(move || errors.with(|e| e.get("answer")))
                                    disabled=Signal::derive(|| false) />
                            </div>
                        </div>
                    </Show>

                    <button type="submit" class="btn btn-success btn-block mt-2" disabled=move || busy.get()>
                        <Show when=move || busy.get()>
                            <span class="loading loading-spinner loading-xs"></span>
                        </Show>
                        "Login"
                    </button>
                </form>
            </div>
        </div>
    }
}
