mod app;
pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod forms;
pub mod hooks;
pub mod router;
pub mod store;
pub mod types;
pub mod utils;

#[cfg(test)]
mod channel_logic_test;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! {
            <App/>
        }
    })
}
