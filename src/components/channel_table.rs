use crate::components::ChannelRow;
use crate::config::PAGE_SIZE_OPTIONS;
use crate::store::AppSignals;
use crate::types::Channel;
use crate::utils::Pager;
use leptos::prelude::*;

#[component]
pub fn ChannelTable(
    #[prop(into)] rows: Signal<Vec<Channel>>,
    #[prop(into)] loading: Signal<bool>,
    on_view: Callback<Channel>,
    on_edit: Callback<Channel>,
    on_delete: Callback<Channel>,
) -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");

    let pager = RwSignal::new(Pager { page: 1, page_size: signals.page_size.get_untracked() });

    // Page size lives in the persisted prefs
    Effect::new(move |_| {
        let size = signals.page_size.get();
        if pager.get_untracked().page_size != size {
            pager.set(pager.get_untracked().with_page_size(size));
        }
    });

    let total = Memo::new(move |_| rows.with(|r| r.len()));
    let page_count = Memo::new(move |_| pager.get().page_count(total.get()));

    // A refetch may leave fewer pages than before
    Effect::new(move |_| {
        let current = pager.get_untracked();
        let clamped = current.clamp(total.get());
        if clamped != current {
            pager.set(clamped);
        }
    });

    let visible = Memo::new(move |_| {
        let range = pager.get().range(total.get());
        rows.with(|r| r[range].to_vec())
    });

    view! {
        <div class="overflow-x-auto rounded-lg border border-base-content/10 bg-base-200">
            <table class="table table-sm">
                <thead>
                    <tr class="text-xs uppercase text-base-content/60">
                        <th>"#"</th>
                        <th>"Name"</th>
                        <th>"Live"</th>
                        <th>"M3U8"</th>
                        <th>"Proxy"</th>
                        <th>"☰"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let list = visible.get();
                        if list.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="6" class="text-center py-8 text-base-content/50">
                                        {move || if loading.get() { "Loading..." } else { "No channels yet" }}
                                    </td>
                                </tr>
                            }.into_any()
                        } else {
                            list.into_iter().map(|ch| view! {
                                <ChannelRow ch=ch on_view=on_view on_edit=on_edit on_delete=on_delete />
                            }).collect_view().into_any()
                        }
                    }}
                </tbody>
            </table>
        </div>

        // --- PAGINATION ---
        <div class="flex items-center justify-end gap-3 mt-3 text-xs">
            <span class="text-base-content/50">{move || format!("{} channels", total.get())}</span>
            <div class="join">
                <button class="join-item btn btn-xs"
                    disabled=move || pager.get().page <= 1
                    on:click=move |_| pager.update(|p| p.page -= 1)>"«"</button>
                <button class="join-item btn btn-xs no-animation font-mono">
                    {move || format!("{} / {}", pager.get().page, page_count.get())}
                </button>
                <button class="join-item btn btn-xs"
                    disabled=move || pager.get().page >= page_count.get()
                    on:click=move |_| pager.update(|p| p.page += 1)>"»"</button>
            </div>
            <select class="select select-bordered select-xs"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        signals.set_page_size.set(size);
                        signals.save_prefs();
                    }
                }>
                {PAGE_SIZE_OPTIONS.into_iter().map(|size| view! {
                    <option value=size.to_string() selected=move || signals.page_size.get() == size>
                        {format!("{} / page", size)}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}
