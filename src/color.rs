use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: key (usually a state name) → Color32
// ---------------------------------------------------------------------------

/// An opaque key → colour association.
///
/// Two maps are equal when they hold the same entries and fallback colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl ColorMap {
    pub fn new(mapping: BTreeMap<String, Color32>) -> Self {
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Assign one palette colour per distinct key, in sorted key order.
    pub fn for_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        let palette = generate_palette(keys.len());
        Self::new(keys.into_iter().zip(palette).collect())
    }

    pub fn get(&self, key: &str) -> Option<Color32> {
        self.mapping.get(key).copied()
    }

    /// Look up the colour for `key`, grey when unmapped.
    pub fn color_for(&self, key: &str) -> Color32 {
        self.get(key).unwrap_or(self.default_color)
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn keys_are_deduplicated() {
        let map = ColorMap::for_keys(["Ohio", "Iowa", "Ohio"]);
        let palette = generate_palette(2);
        // Sorted keys take the palette in order: Iowa first, then Ohio.
        assert_eq!(map.get("Iowa"), Some(palette[0]));
        assert_eq!(map.get("Ohio"), Some(palette[1]));
    }

    #[test]
    fn unknown_keys_fall_back_to_grey() {
        let map = ColorMap::for_keys(["Ohio"]);
        assert_eq!(map.get("Texas"), None);
        assert_eq!(map.color_for("Texas"), Color32::GRAY);
        assert_ne!(map.color_for("Ohio"), Color32::GRAY);
    }
}
