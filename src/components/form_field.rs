use leptos::prelude::*;

/// Labelled text input with an inline validation message underneath.
#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] list: Option<&'static str>,
    #[prop(optional)] maxlength: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label py-1">
                <span class="label-text text-xs font-bold text-base-content/70">{label}</span>
            </div>
            <div class="join w-full">
                <input
                    type=input_type.unwrap_or("text")
                    class="input input-sm input-bordered join-item w-full font-mono text-xs"
                    class:input-error=move || error.get().is_some()
                    placeholder=placeholder
                    list=list
                    maxlength=maxlength
                    spellcheck="false"
                    disabled=move || disabled.get()
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                />
                {children.map(|c| c())}
            </div>
            <Show when=move || error.get().is_some()>
                <div class="text-[11px] text-error mt-1">{move || error.get().unwrap_or_default()}</div>
            </Show>
        </label>
    }
}
