use gloo::net::http::Request;

use saliency_survey_core::wire;
use saliency_survey_core::{FetchError, ImageSet};

pub(crate) async fn fetch_image_sets(api_base: &str) -> Result<Vec<ImageSet>, FetchError> {
    let url = wire::listing_url(api_base);
    let result = match get_text(&url).await {
        Ok(body) => wire::parse_listing(&body, api_base).map_err(FetchError::from),
        Err(err) => Err(err),
    };
    if let Err(err) = &result {
        gloo::console::error!("failed to fetch image sets", err.to_string());
    }
    result
}

pub(crate) async fn fetch_image_set_details(
    api_base: &str,
    set_id: &str,
) -> Result<ImageSet, FetchError> {
    let encoded_id = String::from(js_sys::encode_uri_component(set_id));
    let url = wire::set_details_url(api_base, &encoded_id);
    let result = match get_text(&url).await {
        Ok(body) => wire::parse_set_details(set_id, &body, api_base).map_err(FetchError::from),
        Err(err) => Err(err),
    };
    if let Err(err) = &result {
        gloo::console::error!("failed to fetch image set", set_id, err.to_string());
    }
    result
}

async fn get_text(url: &str) -> Result<String, FetchError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?;
    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response
        .text()
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))
}
