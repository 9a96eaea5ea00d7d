//! Colours, strokes, fonts and metrics for the widgets.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::text::FontSpec;

/// Visual style of the widgets.
///
/// Widgets render with [`DEFAULT_STYLE`] unless an instance is given its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetStyle {
    /// Button fill and slider handle edge.
    pub primary: Color32,
    /// Button fill while pressed.
    pub primary_light: Color32,
    /// Border of value boxes and buttons.
    pub primary_dark: Color32,
    /// Divider rules.
    pub spacer_color: Color32,
    pub text_dark: Color32,
    pub text_bright: Color32,
    /// Placeholder text.
    pub muted_text: Color32,
    pub value_box_fill: Color32,
    pub row_fill: Color32,
    pub row_border: Color32,
    pub arrow_color: Color32,
    pub rail_color: Color32,
    pub handle_fill: Color32,
    pub scrollbar_idle: Color32,
    pub scrollbar_active: Color32,
    pub border_width: f32,
    pub placeholder_border_width: f32,
    pub row_border_width: f32,
    pub handle_edge_width: f32,
    pub rail_width: f32,
    /// Divider captions and placeholders.
    pub caption_font: FontSpec,
    /// Dropdown entries and slider values.
    pub label_font: FontSpec,
    pub button_font: FontSpec,
}

pub static DEFAULT_STYLE: WidgetStyle = WidgetStyle {
    primary: Color32::from_rgb(229, 27, 36),
    primary_light: Color32::from_rgb(255, 93, 78),
    primary_dark: Color32::from_rgb(170, 0, 0),
    spacer_color: Color32::from_rgb(169, 169, 169),
    text_dark: Color32::BLACK,
    text_bright: Color32::WHITE,
    muted_text: Color32::from_rgb(128, 128, 128),
    value_box_fill: Color32::from_rgb(211, 211, 211),
    row_fill: Color32::from_rgb(211, 211, 211),
    row_border: Color32::from_rgb(128, 128, 128),
    arrow_color: Color32::from_rgb(169, 169, 169),
    rail_color: Color32::from_rgb(164, 164, 164),
    handle_fill: Color32::from_rgb(244, 244, 244),
    scrollbar_idle: Color32::from_rgba_premultiplied(0, 0, 0, 120),
    scrollbar_active: Color32::from_rgba_premultiplied(0, 0, 0, 160),
    border_width: 0.5,
    placeholder_border_width: 1.0,
    row_border_width: 0.3,
    handle_edge_width: 2.0,
    rail_width: 1.0,
    caption_font: FontSpec::new(6.0),
    label_font: FontSpec::new(7.0),
    button_font: FontSpec::new(8.0),
};

impl Default for WidgetStyle {
    fn default() -> Self {
        DEFAULT_STYLE.clone()
    }
}

/// Sizes used by the layout engine, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetMetrics {
    /// Padding between region boundaries.
    pub spacing: f32,
    /// Height of a captioned divider band.
    pub divider_height: f32,
    /// Height of a dropdown value box and of each dropdown row.
    pub dropdown_height: f32,
    pub slider_height: f32,
    pub button_height: f32,
    /// Width and height of the slider handle.
    pub handle_size: f32,
    /// Grab width of the dropdown scrollbar.
    pub scrollbar_width: f32,
    /// Rows shown before an open dropdown starts scrolling.
    pub visible_rows: usize,
    /// Narrowest node that hosts a widget.
    pub min_width: f32,
}

impl Default for WidgetMetrics {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            divider_height: 10.0,
            dropdown_height: 15.0,
            slider_height: 15.0,
            button_height: 20.0,
            handle_size: 10.0,
            scrollbar_width: 8.0,
            visible_rows: 10,
            min_width: 90.0,
        }
    }
}
