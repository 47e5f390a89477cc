use crate::wire::normalize_api_base;

/// Query parameters that influence where image sets come from.
pub const SOURCE_QUERY_KEYS: &[&str] = &["source", "demo", "api"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveySource {
    /// Image sets fetched from the provider at `api_base` (empty = same origin).
    Remote { api_base: String },
    /// The built-in demo catalog, no network involved.
    Demo,
}

impl SurveySource {
    pub fn remote(api_base: &str) -> Self {
        SurveySource::Remote {
            api_base: normalize_api_base(api_base),
        }
    }
}

/// Picks the source from page query parameters, falling back to the remote
/// provider at `default_api_base`.
pub fn select_source<'a, I>(params: I, default_api_base: &str) -> SurveySource
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut demo = false;
    let mut api_base = None;
    for (key, value) in params {
        let value = value.trim();
        if key.eq_ignore_ascii_case("demo") {
            demo = !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no");
        } else if key.eq_ignore_ascii_case("source") {
            demo = value.eq_ignore_ascii_case("demo") || value.eq_ignore_ascii_case("static");
        } else if key.eq_ignore_ascii_case("api") && !value.is_empty() {
            api_base = Some(value.to_string());
        }
    }
    if demo {
        return SurveySource::Demo;
    }
    SurveySource::remote(api_base.as_deref().unwrap_or(default_api_base))
}
