use crate::api::ApiClient;
use crate::components::form_field::TextField;
use crate::forms::{ChannelForm, DialogMode, FieldErrors};
use crate::hooks::use_query::QueryKey;
use crate::store::AppSignals;
use crate::types::{Channel, ChannelRequest};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

const PROXY_CHOICES: [(&str, &str); 3] = [("0", "No proxy"), ("1", "Same as base"), ("2", "Custom")];

/// Add / edit / view dialog for a single channel.
#[component]
pub fn ChannelDialog(
    open: RwSignal<bool>,
    mode: RwSignal<DialogMode>,
    channel: RwSignal<Option<Channel>>,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<ChannelRequest>,
) -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");
    let api = use_context::<ApiClient>().expect("ApiClient missing");
    let cache = signals.cache;

    let form = RwSignal::new(ChannelForm::empty());
    let errors = RwSignal::new(FieldErrors::new());
    let (plugins, set_plugins) = signal(Vec::<String>::new());
    let (categories, set_categories) = signal(Vec::<String>::new());

    let read_only = Signal::derive(move || mode.get().read_only());
    let locked = Signal::derive(move || read_only.get() || busy.get());

    // Every opening starts from a clean form derived from the record
    Effect::new(move |_| {
        if open.get() {
            let m = mode.get_untracked();
            form.set(channel.with_untracked(|ch| ChannelForm::open(m, ch.as_ref())));
            errors.set(FieldErrors::new());
        }
    });

    // --- PARSER + CATEGORY LISTS ---
    let plugin_api = api.clone();
    Effect::new(move |_| {
        if !open.get() { return; }
        let version = cache.track(QueryKey::Plugins);
        let api = plugin_api.clone();
        spawn_local(async move {
            match api.list_plugins().await {
                Ok(list) if cache.is_current(QueryKey::Plugins, version) => set_plugins.set(list),
                Ok(_) => {}
                Err(e) => warn!("Loading parser plugins failed: {}", e),
            }
        });
    });

    let category_api = api.clone();
    Effect::new(move |_| {
        if !open.get() { return; }
        let version = cache.track(QueryKey::Categories);
        let api = category_api.clone();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(list) if cache.is_current(QueryKey::Categories, version) => set_categories.set(list),
                Ok(_) => {}
                Err(e) => warn!("Loading categories failed: {}", e),
            }
        });
    });

    // The form's parser is always an option, even when the plugin list lags behind
    let parser_options = Memo::new(move |_| {
        let mut list = plugins.get();
        let current = form.with(|f| f.parser.clone());
        if !list.contains(&current) {
            list.insert(0, current);
        }
        list
    });

    let submit = move |_| {
        if read_only.get_untracked() {
            open.set(false);
            return;
        }
        let current = form.get_untracked();
        let errs = current.validate();
        if !errs.is_empty() {
            errors.set(errs);
            return;
        }
        errors.set(FieldErrors::new());
        on_submit.run(current.to_request());
    };

    let field_error = move |name: &'static str| Signal::derive(move || errors.with(|e| e.get(name)));

    view! {
        <Show when=move || open.get()>
            <div class="modal modal-open backdrop-blur-sm z-[20000]">
                <div class="modal-box bg-base-300 border border-base-content/10 w-full max-w-lg p-0 overflow-hidden shadow-2xl">

                    // --- HEADER ---
                    <div class="flex items-center justify-between p-4 border-b border-base-content/5 bg-base-200">
                        <h2 class="text-sm font-black tracking-widest">{move || mode.get().title()}</h2>
                        <button class="btn btn-ghost btn-xs text-xl" on:click=move |_| open.set(false)>"✕"</button>
                    </div>

                    <div class="p-4 space-y-2 max-h-[70vh] overflow-y-auto custom-scrollbar">
                        <TextField label="Channel Name" placeholder="Channel name"
                            value=Signal::derive(move || form.with(|f| f.name.clone()))
                            on_input=Callback::new(move |v| form.update(|f| f.name = v))
                            error=field_error("name")
                            disabled=locked />

                        <TextField label="Live URL" placeholder="URL"
                            value=Signal::derive(move || form.with(|f| f.url.clone()))
                            on_input=Callback::new(move |v| form.update(|f| f.url = v))
                            error=field_error("url")
                            disabled=locked />

                        <label class="form-control w-full">
                            <div class="label py-1">
                                <span class="label-text text-xs font-bold text-base-content/70">"Parser"</span>
                            </div>
                            <select class="select select-bordered select-sm w-full"
                                disabled=move || locked.get()
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.parser = v);
                                }>
                                {move || parser_options.get().into_iter().map(|p| {
                                    let p_sel = p.clone();
                                    view! {
                                        <option value=p.clone() selected=move || form.with(|f| f.parser == p_sel)>{p.clone()}</option>
                                    }
                                }).collect_view()}
                            </select>
                        </label>

                        <TextField label="Category" placeholder="Category" list="channel-categories"
                            value=Signal::derive(move || form.with(|f| f.category.clone()))
                            on_input=Callback::new(move |v| form.update(|f| f.category = v))
                            error=Signal::derive(|| None::<String>)
                            disabled=locked />
                        <datalist id="channel-categories">
                            {move || categories.get().into_iter().map(|c| view! { <option value=c></option> }).collect_view()}
                        </datalist>

                        // Stream proxy: three-way selector
                        <div class="space-y-1">
                            <span class="text-xs font-bold text-base-content/70">"Proxy stream"</span>
                            <div class="join w-full">
                                {PROXY_CHOICES.into_iter().map(|(value, label)| view! {
                                    <button
                                        class="join-item btn btn-xs flex-1 font-black border-base-content/10"
                                        class:btn-success=move || form.with(|f| f.proxy_selector == value)
                                        class:btn-outline=move || form.with(|f| f.proxy_selector != value)
                                        disabled=move || locked.get()
                                        on:click=move |_| form.update(|f| f.proxy_selector = value.to_string())
                                    >
                                        {label}
                                    </button>
                                }).collect_view()}
                            </div>
                        </div>
                        <Show when=move || form.with(|f| f.shows_custom_proxy())>
                            <TextField label="Stream proxy" placeholder="http://relay:8080"
                                value=Signal::derive(move || form.with(|f| f.ts_proxy.clone()))
                                on_input=Callback::new(move |v| form.update(|f| f.ts_proxy = v))
                                error=field_error("tsproxy")
                                disabled=locked />
                        </Show>

                        // Upstream proxy used by the backend to reach the source
                        <div class="form-control">
                            <label class="label cursor-pointer bg-base-100 rounded-lg px-4 py-2 border border-base-content/5">
                                <span class="label-text text-xs font-bold">"Use proxy"</span>
                                <input type="checkbox" class="toggle toggle-success toggle-sm"
                                    disabled=move || locked.get()
                                    prop:checked=move || form.with(|f| f.use_proxy)
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        form.update(|f| f.use_proxy = checked);
                                    } />
                            </label>
                        </div>
                        <Show when=move || form.with(|f| f.use_proxy)>
                            <TextField label="Proxy" placeholder="socks5://127.0.0.1:1080"
                                value=Signal::derive(move || form.with(|f| f.proxy_url.clone()))
                                on_input=Callback::new(move |v| form.update(|f| f.proxy_url = v))
                                error=field_error("proxyurl")
                                disabled=locked />
                        </Show>
                    </div>

                    // --- FOOTER ---
                    <div class="flex justify-end gap-2 p-4 border-t border-base-content/5 bg-base-200">
                        <button class="btn btn-ghost btn-sm"
                            class:invisible=move || read_only.get()
                            on:click=move |_| open.set(false)>"Cancel"</button>
                        <button class="btn btn-success btn-sm" disabled=move || busy.get() on:click=submit>
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
