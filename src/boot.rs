//! Drives the loading splash declared in `index.html` as `window.__SURVEY_BOOT`.

#[cfg(target_arch = "wasm32")]
use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const SPLASH_GLOBAL: &str = "__SURVEY_BOOT";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static DISMISSED: Cell<bool> = Cell::new(false);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BootPhase {
    Starting,
    FetchingSets,
}

impl BootPhase {
    fn label(self) -> &'static str {
        match self {
            BootPhase::Starting => "init",
            BootPhase::FetchingSets => "fetch",
        }
    }

    fn detail(self) -> &'static str {
        match self {
            BootPhase::Starting => "Démarrage…",
            BootPhase::FetchingSets => "Chargement des sets d'images…",
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn invoke(method: &str, args: &Array) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(splash) = Reflect::get(&window, &JsValue::from_str(SPLASH_GLOBAL))
        .ok()
        .and_then(|value| value.dyn_into::<Object>().ok())
    else {
        return;
    };
    let Some(func) = Reflect::get(&splash, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return;
    };
    if let Err(err) = func.apply(&splash, args) {
        gloo::console::warn!("splash call failed", method, err);
    }
}

pub(crate) fn enter(phase: BootPhase) {
    #[cfg(target_arch = "wasm32")]
    {
        if DISMISSED.with(Cell::get) {
            return;
        }
        invoke(
            "setPhase",
            &Array::of2(
                &JsValue::from_str(phase.label()),
                &JsValue::from_str(phase.detail()),
            ),
        );
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (phase.label(), phase.detail());
}

/// Removes the splash once the first listing outcome is on screen. Later
/// calls, e.g. after a retry, do nothing.
pub(crate) fn dismiss() {
    #[cfg(target_arch = "wasm32")]
    {
        if DISMISSED.with(|flag| flag.replace(true)) {
            return;
        }
        invoke("ready", &Array::new());
    }
}
