use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use saliency_survey_core::{
    demo_image_sets, Advance, FetchTicket, RankingEntry, Session, SessionError, SessionPhase,
    SetResolution, SurveySource,
};

use crate::api;
use crate::app_runtime;
use crate::boot;
use crate::mask_ranking::MaskRanking;

type SharedSession = Rc<RefCell<Session>>;

fn resolution_for(source: &SurveySource) -> SetResolution {
    match source {
        SurveySource::Demo => SetResolution::Preloaded,
        SurveySource::Remote { .. } => SetResolution::OnDemand,
    }
}

fn run_load(session: SharedSession, source: SurveySource, generation: u64, refresh: Callback<()>) {
    match source {
        SurveySource::Demo => {
            session
                .borrow_mut()
                .apply_listing(generation, Ok(demo_image_sets()));
            boot::dismiss();
            refresh.emit(());
        }
        SurveySource::Remote { api_base } => {
            spawn_local(async move {
                let listing = api::fetch_image_sets(&api_base).await;
                let ticket = session.borrow_mut().apply_listing(generation, listing);
                boot::dismiss();
                refresh.emit(());
                if let Some(ticket) = ticket {
                    load_details(session, api_base, ticket, refresh).await;
                }
            });
        }
    }
}

async fn load_details(
    session: SharedSession,
    api_base: String,
    ticket: FetchTicket,
    refresh: Callback<()>,
) {
    let details = api::fetch_image_set_details(&api_base, &ticket.set_id).await;
    let applied = session.borrow_mut().apply_details(&ticket, details);
    if applied {
        refresh.emit(());
    } else {
        gloo::console::warn!("discarding stale image set details", ticket.set_id.clone());
    }
}

fn error_message(err: &SessionError) -> String {
    match err {
        SessionError::NoData => "Aucune donnée disponible.".to_string(),
        other => format!("Impossible de charger les images : {other}"),
    }
}

#[derive(Properties, PartialEq)]
struct LoadErrorProps {
    error: SessionError,
    on_retry: Callback<MouseEvent>,
}

#[function_component(LoadError)]
fn load_error(props: &LoadErrorProps) -> Html {
    html! {
        <div class="app-status error">
            <p>{ error_message(&props.error) }</p>
            <button class="retry" onclick={props.on_retry.clone()}>{ "Réessayer" }</button>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let source = use_memo((), |_| app_runtime::survey_source());
    let session = use_mut_ref(|| Session::new(resolution_for(&source)));
    let force_update = use_force_update();
    let refresh = Callback::from(move |_: ()| force_update.force_update());

    {
        let session = session.clone();
        let source = (*source).clone();
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            boot::enter(boot::BootPhase::FetchingSets);
            let generation = session.borrow_mut().begin_load();
            run_load(session, source, generation, refresh);
            || ()
        });
    }

    let on_retry = {
        let session = session.clone();
        let source = (*source).clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(generation) = session.borrow_mut().retry() else {
                return;
            };
            gloo::console::log!("retrying initial load");
            refresh.emit(());
            run_load(session.clone(), source.clone(), generation, refresh.clone());
        })
    };
    let on_validate = {
        let session = session.clone();
        let source = (*source).clone();
        let refresh = refresh.clone();
        Callback::from(move |ranking: Vec<RankingEntry>| {
            let advance = session.borrow_mut().submit(ranking);
            match advance {
                Ok(Advance::Fetch(ticket)) => {
                    refresh.emit(());
                    if let SurveySource::Remote { api_base } = &source {
                        spawn_local(load_details(
                            session.clone(),
                            api_base.clone(),
                            ticket,
                            refresh.clone(),
                        ));
                    }
                }
                Ok(Advance::Next) => refresh.emit(()),
                Ok(Advance::Finished) => {
                    gloo::console::log!("survey finished");
                    refresh.emit(());
                }
                Err(err) => {
                    gloo::console::warn!("ranking rejected", err.to_string());
                }
            }
        })
    };

    let session_ref = session.borrow();
    let header = match session_ref.position() {
        Some((current, total)) => html! {
            <header class="app-header">
                <h1>{ "Évaluation des cartes de saillance" }</h1>
                <p class="app-progress">{ format!("Set d'images {current} sur {total}") }</p>
            </header>
        },
        None => html! {
            <header class="app-header">
                <h1>{ "Évaluation des cartes de saillance" }</h1>
            </header>
        },
    };
    let body = match session_ref.phase() {
        SessionPhase::Loading => html! {
            <div class="app-status">{ "Chargement des images…" }</div>
        },
        SessionPhase::Error(err) => html! {
            <LoadError error={err.clone()} on_retry={on_retry} />
        },
        SessionPhase::Ready => match session_ref.current_set() {
            Some(image_set) => html! {
                <MaskRanking image_set={image_set.clone()} on_validate={on_validate} />
            },
            None => html! {},
        },
        SessionPhase::Finished => {
            let summary = session_ref
                .results()
                .to_pretty_json()
                .unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"));
            return html! {
                <main class="app finished">
                    <h1>{ "Merci pour votre participation !" }</h1>
                    <section class="results">
                        <h2>{ "Résultats :" }</h2>
                        <pre>{ summary }</pre>
                    </section>
                </main>
            };
        }
    };

    html! {
        <main class="app">
            {header}
            {body}
        </main>
    }
}

pub(crate) fn run() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    match document.get_element_by_id("survey-root") {
        Some(root) => {
            let _app_handle = yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            let _app_handle = yew::Renderer::<App>::new().render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .expect("query")
            .unwrap_or_else(|| panic!("{selector} not rendered"))
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .click();
    }

    fn click_all_cards(root: &Element) {
        let cards = root.query_selector_all(".mask-card").expect("query cards");
        for index in 0..cards.length() {
            if let Some(card) = cards.item(index) {
                card.dyn_into::<HtmlElement>().expect("card").click();
            }
        }
    }

    #[wasm_bindgen_test(async)]
    async fn demo_session_runs_to_summary() {
        set_panic_hook();
        app_runtime::set_survey_source(SurveySource::Demo);
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let _app_handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(30).await;

        for _ in demo_image_sets() {
            let progress = root
                .query_selector(".app-progress")
                .expect("query progress")
                .and_then(|node| node.text_content());
            assert!(progress.is_some(), "header shows progress while ranking");
            click_all_cards(&root);
            TimeoutFuture::new(30).await;
            click(&root, "button.validate");
            TimeoutFuture::new(30).await;
        }

        let summary = root
            .query_selector(".results pre")
            .expect("query summary")
            .and_then(|node| node.text_content())
            .expect("summary rendered");
        for set in demo_image_sets() {
            assert!(summary.contains(&set.id), "summary lists {}", set.id);
        }
    }

    #[wasm_bindgen_test(async)]
    async fn empty_listing_shows_no_data_and_retry() {
        set_panic_hook();
        let mut session = Session::new(SetResolution::OnDemand);
        let generation = session.begin_load();
        assert_eq!(session.apply_listing(generation, Ok(Vec::new())), None);
        let SessionPhase::Error(error) = session.phase().clone() else {
            panic!("empty listing leaves the session in the error phase");
        };

        let retried = Rc::new(RefCell::new(false));
        let on_retry = {
            let retried = retried.clone();
            Callback::from(move |_: MouseEvent| *retried.borrow_mut() = true)
        };
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let _handle = yew::Renderer::<LoadError>::with_root_and_props(
            root.clone(),
            LoadErrorProps { error, on_retry },
        )
        .render();
        TimeoutFuture::new(20).await;

        let message = root
            .query_selector(".app-status.error p")
            .expect("query message")
            .and_then(|node| node.text_content())
            .expect("message rendered");
        assert_eq!(message, "Aucune donnée disponible.");
        click(&root, "button.retry");
        TimeoutFuture::new(20).await;
        assert!(*retried.borrow());
    }
}
