mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod filters;
mod models;
mod notify;
mod stats;
mod store;
mod timelog;
mod transitions;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
