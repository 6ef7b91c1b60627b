use crate::types::Channel;
use crate::utils::format_last_update;
use leptos::prelude::*;
use leptos::{component, view, IntoView};

#[component]
pub fn ChannelRow(
    ch: Channel,
    on_view: Callback<Channel>,
    on_edit: Callback<Channel>,
    on_delete: Callback<Channel>,
) -> impl IntoView {
    let (glyph, color) = ch.health().icon();
    let tip = format!("{}\n{}", ch.message, format_last_update(&ch.last_update));
    let stream_proxied = ch.proxy;
    let upstream_proxied = !ch.proxy_url.trim().is_empty();

    // Virtual channels are generated by the backend and can only be inspected
    let actions = if ch.is_virtual {
        let view_ch = ch.clone();
        view! {
            <button class="btn btn-ghost btn-xs" title="View"
                on:click=move |_| on_view.run(view_ch.clone())>"👁"</button>
        }.into_any()
    } else {
        let edit_ch = ch.clone();
        let delete_ch = ch.clone();
        view! {
            <div class="flex gap-1">
                <button class="btn btn-ghost btn-xs" title="Edit"
                    on:click=move |_| on_edit.run(edit_ch.clone())>"✏️"</button>
                <button class="btn btn-ghost btn-xs hover:text-error" title="Delete"
                    on:click=move |_| on_delete.run(delete_ch.clone())>"🗑️"</button>
            </div>
        }.into_any()
    };

    view! {
        <tr class="hover">
            <td class="w-[60px] font-mono text-base-content/60">{ch.no}</td>
            <td class="w-[150px] font-bold">{ch.name.clone()}</td>
            <td class="max-w-[320px] truncate font-mono text-xs" title=ch.url.clone()>{ch.url.clone()}</td>
            <td class="font-mono text-xs">
                <div class="flex items-center gap-2">
                    <div class="tooltip tooltip-right whitespace-pre-line" data-tip=tip>
                        <span class=format!("text-base font-black {}", color)>{glyph}</span>
                    </div>
                    <span class="break-all select-all">{ch.m3u8.clone()}</span>
                </div>
            </td>
            <td class="w-[80px]">
                <div class="flex gap-1">
                    {stream_proxied.then(|| view! { <span title="Stream proxied">"✔"</span> })}
                    {upstream_proxied.then(|| view! { <span title="Connect via proxy">"🛡"</span> })}
                </div>
            </td>
            <td class="w-[80px]">{actions}</td>
        </tr>
    }
}
