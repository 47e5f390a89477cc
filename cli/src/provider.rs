use std::time::Duration;

use reqwest::Client;
use url::Url;

use saliency_survey_core::wire::{self, normalize_api_base};
use saliency_survey_core::{FetchError, ImageSet};

/// HTTP client for an image-set provider. Payloads go through the same
/// validation as the browser app.
pub(crate) struct Provider {
    client: Client,
    base_url: Url,
    api_base: String,
}

impl Provider {
    pub(crate) fn new(api_base: &str, timeout: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let api_base = normalize_api_base(api_base);
        let base_url = Url::parse(&api_base)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(format!("api base must be http(s): {api_base}").into());
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_base,
        })
    }

    pub(crate) fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) async fn image_sets(&self) -> Result<Vec<ImageSet>, FetchError> {
        let url = self.endpoint(&["images"]);
        let body = self.get_text(url).await?;
        Ok(wire::parse_listing(&body, &self.api_base)?)
    }

    pub(crate) async fn image_set_details(&self, set_id: &str) -> Result<ImageSet, FetchError> {
        let url = self.endpoint(&["images", set_id, "set"]);
        let body = self.get_text(url).await?;
        Ok(wire::parse_set_details(set_id, &body, &self.api_base)?)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))
    }
}
