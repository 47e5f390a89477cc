use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaskType {
    Occlusion,
    Saliency,
    LayerGradcam,
    IntegratedGradients,
    GuidedGradcam,
    GradientShap,
    Other(String),
}

impl MaskType {
    /// Matches the known tags case-insensitively; anything else is kept as sent.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "occlusion" => MaskType::Occlusion,
            "saliency" => MaskType::Saliency,
            "layergradcam" => MaskType::LayerGradcam,
            "integratedgradients" => MaskType::IntegratedGradients,
            "guidedgradcam" => MaskType::GuidedGradcam,
            "gradientshap" => MaskType::GradientShap,
            _ => MaskType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MaskType::Occlusion => "Occlusion",
            MaskType::Saliency => "Saliency",
            MaskType::LayerGradcam => "LayerGradcam",
            MaskType::IntegratedGradients => "IntegratedGradients",
            MaskType::GuidedGradcam => "GuidedGradcam",
            MaskType::GradientShap => "GradientShap",
            MaskType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a raw mask type tag: first character upper-cased, rest
/// kept as sent by the provider.
pub fn mask_display_name(raw_type: &str) -> String {
    let mut chars = raw_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskImage {
    pub id: String,
    pub kind: MaskType,
    pub image_url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub id: String,
    pub original_image: String,
    pub masks: Vec<MaskImage>,
}

impl ImageSet {
    pub fn mask(&self, mask_id: &str) -> Option<&MaskImage> {
        self.masks.iter().find(|mask| mask.id == mask_id)
    }

    pub fn has_mask(&self, mask_id: &str) -> bool {
        self.mask(mask_id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub mask_id: String,
    pub rank: u32,
}

impl RankingEntry {
    pub fn new(mask_id: impl Into<String>, rank: u32) -> Self {
        Self {
            mask_id: mask_id.into(),
            rank,
        }
    }
}

/// Finalized rankings keyed by image set id. Held in memory for the lifetime
/// of the session only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Results {
    by_set: BTreeMap<String, Vec<RankingEntry>>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the ranking for `set_id` unless one is already recorded.
    /// Returns whether the entry was written.
    pub fn record(&mut self, set_id: &str, ranking: Vec<RankingEntry>) -> bool {
        if self.by_set.contains_key(set_id) {
            return false;
        }
        self.by_set.insert(set_id.to_string(), ranking);
        true
    }

    pub fn get(&self, set_id: &str) -> Option<&[RankingEntry]> {
        self.by_set.get(set_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RankingEntry])> {
        self.by_set
            .iter()
            .map(|(set_id, ranking)| (set_id.as_str(), ranking.as_slice()))
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
