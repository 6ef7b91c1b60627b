use crate::api::ApiClient;
use crate::components::form_field::TextField;
use crate::forms::{ConfigForm, FieldErrors, PasswordCheck, PasswordForm};
use crate::hooks::use_query::QueryKey;
use crate::store::{AppActions, AppSignals, ToastLevel};
use crate::types::ServerConfig;
use crate::utils::{random_secret, site_origin};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OptionsTab {
    Config,
    Password,
    About,
}

impl OptionsTab {
    const ALL: [OptionsTab; 3] = [OptionsTab::Config, OptionsTab::Password, OptionsTab::About];

    fn label(self) -> &'static str {
        match self {
            OptionsTab::Config => "Config",
            OptionsTab::Password => "Password",
            OptionsTab::About => "About",
        }
    }
}

#[component]
pub fn Options() -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");
    let actions = use_context::<AppActions>().expect("AppActions missing");
    let api = use_context::<ApiClient>().expect("ApiClient missing");
    let cache = signals.cache;

    let (tab, set_tab) = signal(OptionsTab::Config);
    let cfg_form = RwSignal::new(ConfigForm::default());
    let cfg_errors = RwSignal::new(FieldErrors::new());
    let pwd_form = RwSignal::new(PasswordForm::default());
    let pwd_errors = RwSignal::new(FieldErrors::new());

    Effect::new(move |_| {
        if signals.show_options.get() {
            set_tab.set(OptionsTab::Config);
            pwd_form.set(PasswordForm::default());
            cfg_errors.set(FieldErrors::new());
            pwd_errors.set(FieldErrors::new());
        }
    });

    // Server config is only fetched while the dialog is open
    let load_api = api.clone();
    Effect::new(move |_| {
        if !signals.show_options.get() { return; }
        let version = cache.track(QueryKey::LiveConfig);
        let api = load_api.clone();
        spawn_local(async move {
            match api.get_config().await {
                Ok(cfg) if cache.is_current(QueryKey::LiveConfig, version) => cfg_form.set(ConfigForm(cfg)),
                Ok(_) => {}
                Err(e) => signals.report("Loading config", &e),
            }
        });
    });

    let update_api = api.clone();
    let update_config = Action::new_local(move |cfg: &ServerConfig| {
        let api = update_api.clone();
        let cfg = cfg.clone();
        async move {
            match api.update_config(&cfg).await {
                Ok(()) => {
                    cache.invalidate(QueryKey::LiveConfig);
                    signals.set_show_options.set(false);
                }
                Err(e) => signals.report("Saving config", &e),
            }
        }
    });

    let pwd_api = api.clone();
    let change_password = Action::new_local(move |form: &PasswordForm| {
        let api = pwd_api.clone();
        let form = form.clone();
        async move {
            match api.change_password(&form.password, &form.password2).await {
                Ok(()) => {
                    // The old session is void now
                    signals.notify(ToastLevel::Success, "Password changed, please log in again");
                    actions.logout.dispatch(());
                    signals.set_show_options.set(false);
                }
                Err(e) => signals.report("Changing password", &e),
            }
        }
    });

    let cfg_pending = update_config.pending();
    let pwd_pending = change_password.pending();
    let busy = Signal::derive(move || cfg_pending.get() || pwd_pending.get());

    let handle_ok = move |_| match tab.get_untracked() {
        OptionsTab::Config => {
            let form = cfg_form.get_untracked();
            let errs = form.validate();
            cfg_errors.set(errs.clone());
            if errs.is_empty() {
                update_config.dispatch(form.0);
            }
        }
        OptionsTab::Password => match pwd_form.get_untracked().check() {
            PasswordCheck::Invalid(errs) => pwd_errors.set(errs),
            PasswordCheck::Mismatch => {
                pwd_errors.set(FieldErrors::new());
                signals.notify(ToastLevel::Warning, "Passwords do not match");
            }
            PasswordCheck::Ready => {
                pwd_errors.set(FieldErrors::new());
                change_password.dispatch(pwd_form.get_untracked());
            }
        },
        OptionsTab::About => signals.set_show_options.set(false),
    };

    let cfg_value = move |get: fn(&ServerConfig) -> &String| Signal::derive(move || cfg_form.with(|f| get(&f.0).clone()));
    let cfg_error = move |name: &'static str| Signal::derive(move || cfg_errors.with(|e| e.get(name)));
    let pwd_error = move |name: &'static str| Signal::derive(move || pwd_errors.with(|e| e.get(name)));
    let no_error = Signal::derive(|| None::<String>);

    view! {
        <Show when=move || signals.show_options.get()>
            <div class="modal modal-open backdrop-blur-sm transition-all duration-300 z-[20000]">
                <div class="modal-box bg-base-300 border border-base-content/10 w-full max-w-lg p-0 overflow-hidden shadow-2xl animate-in zoom-in duration-200">

                    // --- HEADER ---
                    <div class="flex items-center justify-between p-4 border-b border-base-content/5 bg-base-200">
                        <h2 class="text-sm font-black tracking-widest text-base-content">"OPTIONS"</h2>
                        <button class="btn btn-ghost btn-xs text-xl"
                                on:click=move |_| signals.set_show_options.set(false)>"✕"</button>
                    </div>

                    // --- TABS ---
                    <div role="tablist" class="tabs tabs-bordered px-4 pt-2">
                        {OptionsTab::ALL.into_iter().map(|t| view! {
                            <a role="tab" class="tab text-xs font-bold"
                                class:tab-active=move || tab.get() == t
                                on:click=move |_| set_tab.set(t)>
                                {t.label()}
                            </a>
                        }).collect_view()}
                    </div>

                    <div class="flex-1 overflow-y-auto p-4 space-y-2 custom-scrollbar max-h-[70vh]">
                        {move || match tab.get() {
                            OptionsTab::Config => view! {
                                <div class="space-y-1">
                                    <TextField label="yt-dlp Cmd" placeholder="yt-dlp"
                                        value=cfg_value(|c| &c.cmd)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.cmd = v))
                                        error=cfg_error("cmd") disabled=busy />
                                    <TextField label="yt-dlp Args" placeholder="--extractor-args youtube:skip=dash -f b -g {url}"
                                        value=cfg_value(|c| &c.args)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.args = v))
                                        error=cfg_error("args") disabled=busy />
                                    <TextField label="BaseUrl"
                                        value=cfg_value(|c| &c.baseurl)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.baseurl = v))
                                        error=cfg_error("baseurl") disabled=busy>
                                        <div class="tooltip" data-tip="Autofill with current site">
                                            <button class="btn btn-sm join-item"
                                                on:click=move |_| cfg_form.update(|f| f.0.baseurl = site_origin())>"⚡"</button>
                                        </div>
                                    </TextField>
                                    <TextField label="ProxyUrl" placeholder="leave empty to use baseUrl as proxy"
                                        value=cfg_value(|c| &c.proxyurl)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.proxyurl = v))
                                        error=no_error disabled=busy />
                                    <TextField label="Server secret"
                                        value=cfg_value(|c| &c.secret)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.secret = v))
                                        error=no_error disabled=busy>
                                        <div class="tooltip" data-tip="Randomize">
                                            <button class="btn btn-sm join-item"
                                                on:click=move |_| cfg_form.update(|f| f.0.secret = random_secret())>"💡"</button>
                                        </div>
                                    </TextField>
                                    <TextField label="Data API"
                                        value=cfg_value(|c| &c.apikey)
                                        on_input=Callback::new(move |v| cfg_form.update(|f| f.0.apikey = v))
                                        error=no_error disabled=busy />
                                </div>
                            }.into_any(),

                            OptionsTab::Password => view! {
                                <div class="space-y-1">
                                    <TextField label="New Password" input_type="password"
                                        value=Signal::derive(move || pwd_form.with(|f| f.password.clone()))
                                        on_input=Callback::new(move |v| pwd_form.update(|f| f.password = v))
                                        error=pwd_error("password") disabled=busy />
                                    <TextField label="Repeat Password" input_type="password"
                                        value=Signal::derive(move || pwd_form.with(|f| f.password2.clone()))
                                        on_input=Callback::new(move |v| pwd_form.update(|f| f.password2 = v))
                                        error=pwd_error("password2") disabled=busy />
                                </div>
                            }.into_any(),

                            OptionsTab::About => view! {
                                <div class="space-y-2 text-sm">
                                    <div>
                                        <a class="link link-success" href="https://github.com/zjyl1994/livetv" target="_blank">"LiveTV!"</a>
                                        " by "
                                        <a class="link" href="https://github.com/zjyl1994" target="_blank">"zjyl1994."</a>
                                    </div>
                                    <div>
                                        "Forked by "
                                        <a class="link" href="https://github.com/snowie2000" target="_blank">"snowie2000"</a>
                                    </div>
                                    <div>"Made with " <span class="text-error">"♥"</span> " in Kwangtung."</div>
                                    <div class="flex gap-3 pt-2">
                                        <a class="link" href="/log" target="_blank">"View log"</a>
                                        <span class="opacity-30">"|"</span>
                                        <a class="link" on:click=move |_| { actions.logout.dispatch(()); }>"Log out"</a>
                                    </div>
                                </div>
                            }.into_any(),
                        }}
                    </div>

                    // --- FOOTER ---
                    <div class="flex justify-end gap-2 p-4 border-t border-base-content/5 bg-base-200">
                        <button class="btn btn-ghost btn-sm" on:click=move |_| signals.set_show_options.set(false)>"Cancel"</button>
                        <button class="btn btn-success btn-sm" disabled=move || busy.get() on:click=handle_ok>
                            <Show when=move || busy.get()>
                                <span class="loading loading-spinner loading-xs"></span>
                            </Show>
                            "OK"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
