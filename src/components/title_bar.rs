use crate::store::AppSignals;
use leptos::prelude::*;
use leptos::IntoView;

#[component]
pub fn TitleBar() -> impl IntoView {
    let store = use_context::<AppSignals>().expect("Store missing");

    view! {
        <h1 class="flex items-center gap-2 text-2xl font-black tracking-tight select-none">
            "LiveTV!"
            <small class="text-sm font-normal text-base-content/50">"IPTV feeds on your hand"</small>
            <div class="tooltip tooltip-bottom" data-tip="Options">
                <button class="btn btn-ghost btn-xs text-base" on:click=move |_| store.set_show_options.set(true)>
                    "⚙️"
                </button>
            </div>
        </h1>
    }
}
