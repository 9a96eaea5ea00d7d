//! Text measurement and number formatting helpers.

use serde::{Deserialize, Serialize};

use crate::traits::TextMeasure;

/// Horizontal padding added to every measured label.
pub const TEXT_PADDING: f32 = 8.0;

/// Font size in device-independent points. Hosts map it to their own fonts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f32,
}

impl FontSpec {
    pub const fn new(size: f32) -> Self {
        Self { size }
    }

    /// The font as it should be requested on a display with `display_scale`.
    pub fn normalized(self, display_scale: f32) -> Self {
        let scale = if display_scale.is_finite() && display_scale > 0.0 {
            display_scale
        } else {
            1.0
        };
        Self {
            size: self.size / scale,
        }
    }
}

/// Width of `text` in `font`, after display-scale normalisation.
pub fn text_width(measure: &dyn TextMeasure, text: &str, font: FontSpec) -> f32 {
    measure.text_width(text, &font.normalized(measure.display_scale()))
}

/// Widest padded label among `texts`; 0 for no texts.
pub fn max_text_width<'a, I>(measure: &dyn TextMeasure, texts: I, font: FontSpec) -> f32
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|t| text_width(measure, t, font) + TEXT_PADDING)
        .fold(0.0, f32::max)
}

/// Round to `digits` decimal places. Values too large to scale come back unchanged.
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Smallest value with `digits` decimals that is not below `value`.
pub fn round_up_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let nearest = scaled.round();
    if nearest / factor >= value {
        nearest / factor
    } else {
        (nearest + 1.0) / factor
    }
}

/// Largest value with `digits` decimals that is not above `value`.
pub fn round_down_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let nearest = scaled.round();
    if nearest / factor <= value {
        nearest / factor
    } else {
        (nearest - 1.0) / factor
    }
}

/// Fixed-point rendering with exactly `digits` decimals.
pub fn format_fixed(value: f64, digits: u32) -> String {
    let text = format!("{:.*}", digits as usize, value);
    // "-0" and "-0.00" read as noise on a slider
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}
