use crate::store::AppSignals;
use leptos::prelude::*;

#[component]
pub fn ToastStack() -> impl IntoView {
    let signals = use_context::<AppSignals>().expect("AppSignals missing");

    view! {
        <div class="toast toast-top toast-center z-[30000]">
            <For
                each=move || signals.toasts.get()
                key=|t| t.id
                let:toast
            >
                <div class=format!("alert {} text-sm py-2 shadow-lg", toast.level.alert_class())>
                    <span>{toast.message.clone()}</span>
                </div>
            </For>
        </div>
    }
}
