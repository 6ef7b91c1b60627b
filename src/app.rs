use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api::ApiClient;
use crate::components::{ChannelsPage, LoginPage, ToastStack};
use crate::config::ConsoleConfig;
use crate::hooks::use_config::load_ui_prefs;
use crate::hooks::use_events::setup_history_listener;
use crate::hooks::use_query::QueryCache;
use crate::router::{current_page, Page};
use crate::store::{AppActions, AppSignals};
use crate::utils::{delete_cookie, set_document_title};

#[component]
pub fn App() -> impl IntoView {
    let config = ConsoleConfig::default();
    let prefs = load_ui_prefs();

    // --- STATE SIGNALS ---
    let (page, set_page) = signal(current_page());
    let (toasts, set_toasts) = signal(Vec::new());
    let (show_options, set_show_options) = signal(false);
    let (playlist_type, set_playlist_type) = signal(prefs.playlist_type);
    let (page_size, set_page_size) = signal(prefs.page_size);

    let signals = AppSignals {
        page, set_page,
        toasts, set_toasts,
        toast_ms: config.toast_duration_ms,
        show_options, set_show_options,
        playlist_type, set_playlist_type,
        page_size, set_page_size,
        cache: QueryCache::new(),
    };

    provide_context(signals);

    let api = ApiClient::new(&config)
        .with_unauthorized_handler(Callback::new(move |_| signals.navigate(Page::Login, true)));
    provide_context(api.clone());
    provide_context(config.clone());

    setup_history_listener(signals);

    // --- ACTIONS ---
    let logout_api = api.clone();
    let session_cookie = config.session_cookie.clone();
    let logout = Action::new_local(move |_: &()| {
        let api = logout_api.clone();
        let cookie = session_cookie.clone();
        async move {
            match api.logout().await {
                Ok(()) => {
                    delete_cookie(&cookie);
                    signals.navigate(Page::Login, true);
                }
                Err(e) => signals.report("Logout", &e),
            }
        }
    });

    provide_context(AppActions { logout });

    Effect::new(move |_| {
        let current = page.get();
        if let Some(title) = current.title() {
            set_document_title(title);
        }
        // Dialogs never survive a page switch
        set_show_options.set(false);
    });

    // `/` only decides where to go
    let auth_api = api.clone();
    Effect::new(move |_| {
        if page.get() != Page::Home {
            return;
        }
        let api = auth_api.clone();
        spawn_local(async move {
            match api.check_auth().await {
                Ok(()) => signals.navigate(Page::Channels, true),
                Err(e) => {
                    log!("Session check failed: {}", e);
                    signals.navigate(Page::Login, true);
                }
            }
        });
    });

    view! {
        <main id="main-app-container" class="min-h-screen bg-base-100 text-base-content">
            {move || match page.get() {
                Page::Home => view! {
                    <div class="flex items-center justify-center min-h-screen">
                        <span class="loading loading-spinner loading-lg text-success"></span>
                    </div>
                }.into_any(),
                Page::Login => view! { <LoginPage /> }.into_any(),
                Page::Channels => view! { <ChannelsPage /> }.into_any(),
            }}
            <ToastStack />
        </main>
    }
}
