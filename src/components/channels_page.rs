use crate::api::ApiClient;
use crate::components::channel_dialog::ChannelDialog;
use crate::components::channel_table::ChannelTable;
use crate::components::options::Options;
use crate::components::playlist_bar::PlaylistBar;
use crate::components::title_bar::TitleBar;
use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::forms::{confirm_delete, DialogMode};
use crate::hooks::use_query::{use_polling, QueryKey};
use crate::store::AppSignals;
use crate::types::{Channel, ChannelRequest};
use crate::utils::confirm;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ChannelsPage() -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");
    let api = use_context::<ApiClient>().expect("ApiClient missing");
    let config = use_context::<ConsoleConfig>().expect("ConsoleConfig missing");
    let cache = signals.cache;

    // --- STATE SIGNALS ---
    let (rows, set_rows) = signal(Vec::<Channel>::new());
    let (playlist_url, set_playlist_url) = signal(String::new());
    let (loading, set_loading) = signal(true);

    let dialog_open = RwSignal::new(false);
    let dialog_mode = RwSignal::new(DialogMode::Add);
    let editing = RwSignal::new(None::<Channel>);

    use_polling(cache, QueryKey::ChannelList, config.channel_refresh_ms);

    // Each fetch replaces the snapshot wholesale
    let list_api = api.clone();
    Effect::new(move |_| {
        let version = cache.track(QueryKey::ChannelList);
        let api = list_api.clone();
        spawn_local(async move {
            let result = api.list_channels().await;
            if !cache.is_current(QueryKey::ChannelList, version) {
                return;
            }
            set_loading.set(false);
            match result {
                Ok(listing) => {
                    if let Some(url) = listing.playlist_url {
                        set_playlist_url.set(url);
                    }
                    set_rows.set(listing.rows);
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => error!("Channel list refresh failed: {}", e),
            }
        });
    });

    // --- MUTATIONS ---
    let save_api = api.clone();
    let save_channel = Action::new_local(move |(mode, req): &(DialogMode, ChannelRequest)| {
        let api = save_api.clone();
        let mode = *mode;
        let req = req.clone();
        async move {
            let res = match mode {
                DialogMode::Add => api.create_channel(&req).await,
                _ => api.update_channel(&req).await,
            };
            match res {
                Ok(()) => {
                    log!("Saved channel {:?}", req.name);
                    dialog_open.set(false);
                    cache.invalidate(QueryKey::ChannelList);
                }
                Err(e) => signals.report("Saving channel", &e),
            }
        }
    });

    let delete_api = api.clone();
    let delete_channel = Action::new_local(move |id: &String| {
        let api = delete_api.clone();
        let id = id.clone();
        async move {
            match api.delete_channel(&id).await {
                Ok(()) => cache.invalidate(QueryKey::ChannelList),
                Err(e) => signals.report("Deleting channel", &e),
            }
        }
    });

    let open_dialog = move |mode: DialogMode, ch: Option<Channel>| {
        editing.set(ch);
        dialog_mode.set(mode);
        dialog_open.set(true);
    };

    let on_add = Callback::new(move |_: ()| open_dialog(DialogMode::Add, None));
    let on_edit = Callback::new(move |ch: Channel| open_dialog(DialogMode::Edit, Some(ch)));
    let on_view = Callback::new(move |ch: Channel| open_dialog(DialogMode::View, Some(ch)));
    let on_delete = Callback::new(move |ch: Channel| {
        if let Some(id) = confirm_delete(&ch, confirm) {
            delete_channel.dispatch(id);
        }
    });
    let on_submit = Callback::new(move |req: ChannelRequest| {
        save_channel.dispatch((dialog_mode.get_untracked(), req));
    });

    view! {
        <div class="max-w-6xl mx-auto p-6">
            <TitleBar />
            <PlaylistBar base_url=playlist_url on_add=on_add />
            <ChannelTable
                rows=rows
                loading=loading
                on_view=on_view
                on_edit=on_edit
                on_delete=on_delete
            />

            <ChannelDialog
                open=dialog_open
                mode=dialog_mode
                channel=editing
                busy=save_channel.pending()
                on_submit=on_submit
            />
            <Options />
        </div>
    }
}
