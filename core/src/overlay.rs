pub const TRANSPARENCY_MIN: f64 = 0.0;
pub const TRANSPARENCY_MAX: f64 = 1.0;
pub const TRANSPARENCY_STEP: f64 = 0.05;
pub const TRANSPARENCY_DEFAULT: f64 = 0.75;

/// How mask cards blend the mask over the original image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlaySettings {
    pub show_original: bool,
    pub transparency: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show_original: true,
            transparency: TRANSPARENCY_DEFAULT,
        }
    }
}

impl OverlaySettings {
    pub fn with_transparency(self, value: f64) -> Self {
        Self {
            transparency: snap_transparency(value),
            ..self
        }
    }

    pub fn toggle_original(self) -> Self {
        Self {
            show_original: !self.show_original,
            ..self
        }
    }

    /// Opacity of the mask layer when drawn over the original.
    pub fn mask_opacity(&self) -> f64 {
        (1.0 - self.transparency).clamp(0.0, 1.0)
    }

    pub fn transparency_percent(&self) -> u32 {
        (self.transparency * 100.0).round() as u32
    }
}

pub fn snap_transparency(value: f64) -> f64 {
    if !value.is_finite() {
        return TRANSPARENCY_DEFAULT;
    }
    let clamped = value.clamp(TRANSPARENCY_MIN, TRANSPARENCY_MAX);
    let snapped = (clamped / TRANSPARENCY_STEP).round() * TRANSPARENCY_STEP;
    snapped.clamp(TRANSPARENCY_MIN, TRANSPARENCY_MAX)
}

pub fn parse_transparency(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().map(snap_transparency)
}
