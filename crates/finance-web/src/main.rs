mod api;
mod app;
mod chart;
mod components;
mod pages;
mod presenter;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
