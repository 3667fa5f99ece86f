use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::DataError;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex(class: &str, value: &str) -> Result<Color32, DataError> {
    let invalid = || DataError::InvalidColor {
        class: class.to_string(),
        value: value.to_string(),
    };
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
            Ok(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

// ---------------------------------------------------------------------------
// Colour mapping: vehicle class → Color32
// ---------------------------------------------------------------------------

/// Maps vehicle classes to colours, from the palette file where possible.
#[derive(Debug, Clone, Default)]
pub struct ClassPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ClassPalette {
    /// Build from the raw palette table, then fill in generated colours for
    /// any of `classes` the table does not cover.
    pub fn new(table: &BTreeMap<String, String>, classes: &[String]) -> Self {
        let mut mapping = BTreeMap::new();
        for (class, value) in table {
            match parse_hex(class, value) {
                Ok(c) => {
                    mapping.insert(class.clone(), c);
                }
                Err(e) => log::warn!("skipping palette entry: {e}"),
            }
        }

        let missing: Vec<&String> = classes
            .iter()
            .filter(|c| !mapping.contains_key(*c))
            .collect();
        if !missing.is_empty() {
            log::info!("generating colours for {} unmapped classes", missing.len());
        }
        for (class, c) in missing.into_iter().zip(generate_palette(classes.len())) {
            mapping.insert(class.clone(), c);
        }

        ClassPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given class.
    pub fn color_for(&self, class: &str) -> Color32 {
        self.mapping
            .get(class)
            .copied()
            .unwrap_or(self.default_color)
    }
}
