use web_sys::UrlSearchParams;

use saliency_survey_core::wire::normalize_api_base;
use saliency_survey_core::{select_source, SurveySource, SOURCE_QUERY_KEYS};

pub(crate) fn load_survey_source() -> SurveySource {
    let default_base = default_api_base();
    let Some(params) = load_source_params() else {
        return SurveySource::remote(&default_base);
    };
    select_source(
        params.iter().map(|(key, value)| (*key, value.as_str())),
        &default_base,
    )
}

/// Build-time API base. Empty means same origin, with `/images` and `/file`
/// proxied by the dev server.
pub(crate) fn default_api_base() -> String {
    option_env!("SALIENCY_API_BASE")
        .or(option_env!("TRUNK_PUBLIC_SALIENCY_API_BASE"))
        .map(normalize_api_base)
        .unwrap_or_default()
}

fn load_source_params() -> Option<Vec<(&'static str, String)>> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    Some(
        SOURCE_QUERY_KEYS
            .iter()
            .filter_map(|key| params.get(key).map(|value| (*key, value)))
            .collect(),
    )
}
