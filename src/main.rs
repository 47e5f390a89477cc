mod api;
mod app_router;
mod app_runtime;
mod boot;
mod image_card;
mod mask_ranking;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    boot::enter(boot::BootPhase::Starting);
    let source = app_router::load_survey_source();
    gloo::console::log!("survey source", format!("{source:?}"));
    app_runtime::set_survey_source(source);
    yew_app::run();
}
