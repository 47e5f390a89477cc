//! Image-set provider payloads.
//!
//! Responses are decoded into private wire structs and checked before they
//! become [`ImageSet`] values, so a bad payload surfaces as a [`WireError`]
//! instead of a broken image further down.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::WireError;
use crate::model::{mask_display_name, ImageSet, MaskImage, MaskType};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(value) => value.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ListingItem {
    id: RawId,
    patient_nb: RawId,
    filename: String,
}

#[derive(Deserialize)]
struct SetDetails {
    original_image: String,
    masks: Vec<MaskItem>,
}

#[derive(Deserialize)]
struct MaskItem {
    id: RawId,
    #[serde(rename = "type")]
    kind: String,
    image_url: String,
}

pub fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Prefixes path-absolute URLs with the API base. Absolute and relative
/// URLs pass through unchanged.
pub fn resolve_url(api_base: &str, url: &str) -> String {
    if url.starts_with('/') {
        format!("{api_base}{url}")
    } else {
        url.to_string()
    }
}

pub fn listing_url(api_base: &str) -> String {
    format!("{api_base}/images")
}

pub fn set_details_url(api_base: &str, set_id: &str) -> String {
    format!("{api_base}/images/{set_id}/set")
}

/// Decodes `GET /images` into set stubs whose masks are still empty.
pub fn parse_listing(body: &str, api_base: &str) -> Result<Vec<ImageSet>, WireError> {
    let items: Vec<ListingItem> = serde_json::from_str(body)?;
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| {
            let id = unique(non_empty(item.id.into_string(), "id")?, "id", &mut seen)?;
            let patient_nb = non_empty(item.patient_nb.into_string(), "patient_nb")?;
            let filename = non_empty(item.filename, "filename")?;
            Ok(ImageSet {
                id,
                original_image: format!("{api_base}/file/{patient_nb}/{filename}"),
                masks: Vec::new(),
            })
        })
        .collect()
}

/// Decodes `GET /images/{id}/set`. The provider does not echo the id, so the
/// requested one is carried over.
pub fn parse_set_details(
    set_id: &str,
    body: &str,
    api_base: &str,
) -> Result<ImageSet, WireError> {
    let details: SetDetails = serde_json::from_str(body)?;
    let original_image = non_empty(details.original_image, "original_image")?;
    let mut seen = HashSet::new();
    let masks = details
        .masks
        .into_iter()
        .map(|mask| {
            let id = unique(
                non_empty(mask.id.into_string(), "masks.id")?,
                "masks.id",
                &mut seen,
            )?;
            let raw_type = non_empty(mask.kind, "masks.type")?;
            let image_url = non_empty(mask.image_url, "masks.image_url")?;
            Ok(MaskImage {
                id,
                name: mask_display_name(&raw_type),
                kind: MaskType::parse(&raw_type),
                image_url: resolve_url(api_base, &image_url),
            })
        })
        .collect::<Result<Vec<_>, WireError>>()?;
    Ok(ImageSet {
        id: set_id.to_string(),
        original_image: resolve_url(api_base, &original_image),
        masks,
    })
}

fn non_empty(value: String, field: &'static str) -> Result<String, WireError> {
    if value.trim().is_empty() {
        return Err(WireError::EmptyField { field });
    }
    Ok(value)
}

fn unique(
    id: String,
    field: &'static str,
    seen: &mut HashSet<String>,
) -> Result<String, WireError> {
    if !seen.insert(id.clone()) {
        return Err(WireError::DuplicateId { field, id });
    }
    Ok(id)
}
