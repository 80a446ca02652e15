use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, IntoColor, Srgb};

/// Chart accent: the period line, and bars of types outside the map.
pub const ACCENT: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);

/// Degrees between consecutive palette entries. Golden-angle steps keep
/// neighbours apart and leave earlier colours unchanged when `n` grows.
const HUE_STEP: f32 = 137.508;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` bar colours sharing the accent's hue family: entry 0 is a lighter,
/// more saturated accent, later entries rotate away from it.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    let accent: Hsl = Srgb::new(ACCENT.r(), ACCENT.g(), ACCENT.b())
        .into_format::<f32>()
        .into_color();
    let base_hue = accent.hue.into_positive_degrees();

    (0..n)
        .map(|i| {
            let hsl = Hsl::new(base_hue + i as f32 * HUE_STEP, 0.55, 0.5);
            let rgb: Srgb<u8> = Srgb::from_color(hsl).into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Property type → Color32
// ---------------------------------------------------------------------------

/// Stable colours per property type, assigned over the dataset's sorted
/// type domain so a type keeps its colour whatever the filter.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            mapping: BTreeMap::new(),
            default_color: ACCENT,
        }
    }
}

impl ColorMap {
    pub fn new(keys: &[String]) -> Self {
        let mapping = keys
            .iter()
            .cloned()
            .zip(generate_palette(keys.len()))
            .collect();
        ColorMap {
            mapping,
            ..Self::default()
        }
    }

    pub fn color_for(&self, key: &str) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}
