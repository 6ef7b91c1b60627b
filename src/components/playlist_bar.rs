use crate::config::ConsoleConfig;
use crate::store::{AppSignals, ToastLevel};
use crate::types::PlaylistType;
use crate::utils::copy_to_clipboard;
use gloo_timers::future::TimeoutFuture;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Toolbar with the generated playlist address and the "New channel" button.
#[component]
pub fn PlaylistBar(#[prop(into)] base_url: Signal<String>, on_add: Callback<()>) -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");
    let config = use_context::<ConsoleConfig>().expect("ConsoleConfig missing");

    let (copied, set_copied) = signal(false);
    let display_url = Memo::new(move |_| signals.playlist_type.get().playlist_url(&base_url.get()));
    let hint_ms = config.copied_hint_ms;

    let handle_copy = move |_| {
        let text = display_url.get_untracked();
        spawn_local(async move {
            if copy_to_clipboard(&text).await {
                set_copied.set(true);
                TimeoutFuture::new(hint_ms).await;
                set_copied.set(false);
            } else {
                warn!("Failed to copy playlist url");
                signals.notify(ToastLevel::Warning, "Clipboard is not available");
            }
        });
    };

    view! {
        <div class="flex flex-wrap items-center gap-2 my-4">
            <div class="flex items-center flex-1 min-w-[280px] gap-2">
                <span class="text-sm font-bold whitespace-nowrap">"Playlist:"</span>
                <div class="join flex-1">
                    <select class="select select-bordered select-sm join-item"
                        on:change=move |ev| {
                            signals.set_playlist_type.set(PlaylistType::from_file_name(&event_target_value(&ev)));
                            signals.save_prefs();
                        }>
                        {PlaylistType::ALL.into_iter().map(|t| view! {
                            <option value=t.file_name() selected=move || signals.playlist_type.get() == t>
                                {t.label()}
                            </option>
                        }).collect_view()}
                    </select>
                    <input type="text" readonly
                        class="input input-bordered input-sm join-item flex-1 font-mono text-xs"
                        prop:value=move || display_url.get() />
                    <div class="tooltip tooltip-bottom" data-tip=move || if copied.get() { "Copied" } else { "Click to copy" }>
                        <button class="btn btn-sm join-item" on:click=handle_copy>
                            {move || if copied.get() { "✔" } else { "📋" }}
                        </button>
                    </div>
                </div>
            </div>
            <button class="btn btn-primary btn-sm ml-1" on:click=move |_| on_add.run(())>
                "New channel"
            </button>
        </div>
    }
}
