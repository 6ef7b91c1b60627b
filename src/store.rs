use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::error::ApiError;
use crate::hooks::use_query::QueryCache;
use crate::router::{push_history, Page};
use crate::hooks::use_config::save_ui_prefs;
use crate::types::{PlaylistType, UiPrefs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn alert_class(self) -> &'static str {
        match self {
            ToastLevel::Success => "alert-success",
            ToastLevel::Warning => "alert-warning",
            ToastLevel::Error => "alert-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct AppSignals {
    pub page: ReadSignal<Page>,
    pub set_page: WriteSignal<Page>,
    pub toasts: ReadSignal<Vec<Toast>>,
    pub set_toasts: WriteSignal<Vec<Toast>>,
    pub toast_ms: u32,
    pub show_options: ReadSignal<bool>,
    pub set_show_options: WriteSignal<bool>,
    pub playlist_type: ReadSignal<PlaylistType>,
    pub set_playlist_type: WriteSignal<PlaylistType>,
    pub page_size: ReadSignal<usize>,
    pub set_page_size: WriteSignal<usize>,
    pub cache: QueryCache,
}

impl AppSignals {
    pub fn navigate(&self, page: Page, replace: bool) {
        if self.page.get_untracked() == page {
            return;
        }
        push_history(page, replace);
        self.set_page.set(page);
    }

    /// Persists the current playlist type and page size.
    pub fn save_prefs(&self) {
        save_ui_prefs(&UiPrefs {
            playlist_type: self.playlist_type.get_untracked(),
            page_size: self.page_size.get_untracked(),
        });
    }

    /// Logs a failed request and shows it to the user. A 401 has already
    /// moved the user to the login page, so it stays silent.
    pub fn report(&self, action: &str, err: &ApiError) {
        error!("{} failed: {}", action, err);
        if *err != ApiError::Unauthorized {
            self.notify(ToastLevel::Error, err.user_message());
        }
    }

    /// Transient global message; removes itself after `toast_ms`.
    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        let mut id = 0;
        self.set_toasts.update(|list| {
            id = list.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            list.push(Toast { id, level, message });
        });

        let set_toasts = self.set_toasts;
        let delay = self.toast_ms;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay).await;
            set_toasts.update(|list| list.retain(|t| t.id != id));
        });
    }
}

#[derive(Clone, Copy)]
pub struct AppActions {
    pub logout: Action<(), ()>,
}
