use leptos::ev;
use leptos::prelude::*;
use crate::router::page_from_state;
use crate::store::AppSignals;

/// Keeps the page signal in step with the browser's back/forward buttons.
pub fn setup_history_listener(signals: AppSignals) {
    let handle = window_event_listener(ev::popstate, move |event| {
        signals.set_page.set(page_from_state(event.state()));
    });
    on_cleanup(move || handle.remove());
}
