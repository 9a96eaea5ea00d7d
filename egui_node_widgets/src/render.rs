//! Render engine: turns geometry and widget state into a list of draw commands.
//!
//! Nothing here mutates widget state. The host paints the list (see [`crate::paint`]).

use egui::{Align, Align2, Color32, Pos2, Rect};

use crate::layout::{OverlayGeometry, SliderGeometry};
use crate::style::WidgetStyle;
use crate::text::{self, FontSpec};
use crate::traits::TextMeasure;

/// One drawing primitive in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color32,
    },
    StrokeRect {
        rect: Rect,
        width: f32,
        color: Color32,
    },
    Line {
        points: [Pos2; 2],
        width: f32,
        color: Color32,
    },
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke_width: f32,
        stroke: Color32,
    },
    /// Text anchored inside `rect` according to `align`, clipped to `rect`.
    Text {
        rect: Rect,
        text: String,
        font: FontSpec,
        color: Color32,
        align: Align2,
    },
}

/// Ordered output of a render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn text(&mut self, rect: Rect, text: &str, font: FontSpec, color: Color32, align: Align2) {
        self.push(DrawCommand::Text {
            rect,
            text: text.to_owned(),
            font,
            color,
            align,
        });
    }
}

/// Caption centred in its band, flanked by two rules that leave a gap for the text.
pub fn draw_divider(
    list: &mut DrawList,
    band: Rect,
    caption: &str,
    style: &WidgetStyle,
    measure: &dyn TextMeasure,
) {
    let font = style.caption_font.normalized(measure.display_scale());
    list.text(band, caption, font, style.text_dark, Align2::CENTER_CENTER);

    let caption_width = text::text_width(measure, caption, style.caption_font);
    let y = band.center().y;
    let gap_left = band.min.x + (band.width() - caption_width) / 2.0 - 4.0;
    let gap_right = band.min.x + (band.width() - caption_width) / 2.0 + caption_width + 4.0;
    for (from, to) in [(band.min.x, gap_left), (gap_right, band.max.x)] {
        list.push(DrawCommand::Line {
            points: [Pos2::new(from, y), Pos2::new(to, y)],
            width: 1.0,
            color: style.spacer_color,
        });
    }
}

/// Visual state of a dropdown value box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueBoxState {
    /// Showing the placeholder instead of a real selection.
    pub placeholder: bool,
    /// Pressed or open.
    pub active: bool,
}

/// Value box: fill, border and left-aligned selection text.
pub fn draw_value_box(
    list: &mut DrawList,
    border: Rect,
    text_rect: Rect,
    label: &str,
    state: ValueBoxState,
    style: &WidgetStyle,
    display_scale: f32,
) {
    let (font, color, border_width) = if state.placeholder {
        (
            style.caption_font,
            style.muted_text,
            style.placeholder_border_width,
        )
    } else {
        (style.label_font, style.text_dark, style.border_width)
    };
    let border_color = if state.active {
        style.primary
    } else {
        style.primary_dark
    };

    list.push(DrawCommand::FillRect {
        rect: border,
        color: style.value_box_fill,
    });
    list.push(DrawCommand::StrokeRect {
        rect: border,
        width: border_width,
        color: border_color,
    });
    list.text(
        text_rect,
        label,
        font.normalized(display_scale),
        color,
        Align2::LEFT_CENTER,
    );
}

/// Downward chevron centred in `rect`.
pub fn draw_dropdown_arrow(list: &mut DrawList, rect: Rect, color: Color32) {
    let size = rect.height();
    let c = rect.center();
    list.push(DrawCommand::Polyline {
        points: vec![
            Pos2::new(c.x - size / 4.0, c.y - size / 8.0),
            Pos2::new(c.x, c.y + size / 6.0),
            Pos2::new(c.x + size / 4.0, c.y - size / 8.0),
        ],
        width: size / 8.0,
        color,
    });
}

/// Visible rows of an open level, its border and the scrollbar thumb.
pub fn draw_overlay(
    list: &mut DrawList,
    overlay: &OverlayGeometry,
    options: &[String],
    thumb_dragging: bool,
    style: &WidgetStyle,
    display_scale: f32,
) {
    let font = style.label_font.normalized(display_scale);
    for (row, option) in overlay.rows.iter().zip(options) {
        let Some(row) = *row else { continue };
        list.push(DrawCommand::FillRect {
            rect: row,
            color: style.row_fill,
        });
        list.push(DrawCommand::StrokeRect {
            rect: row,
            width: style.row_border_width,
            color: style.row_border,
        });
        if row.height() > 2.0 {
            list.text(row, option, font, style.text_dark, Align2::LEFT_CENTER);
        }
    }

    list.push(DrawCommand::StrokeRect {
        rect: overlay.band,
        width: style.border_width,
        color: style.primary,
    });

    if let Some(thumb) = overlay.thumb {
        let x = thumb.center().x;
        list.push(DrawCommand::Line {
            points: [
                Pos2::new(x, thumb.min.y + 4.0),
                Pos2::new(x, thumb.max.y - 4.0),
            ],
            width: thumb.width() - 2.0,
            color: if thumb_dragging {
                style.scrollbar_active
            } else {
                style.scrollbar_idle
            },
        });
    }
}

/// Rail, round handle and the formatted value beside it.
pub fn draw_slider(
    list: &mut DrawList,
    geometry: &SliderGeometry,
    value_text: &str,
    style: &WidgetStyle,
    display_scale: f32,
) {
    let track = geometry.track;
    let half_handle = geometry.handle.width() / 2.0;
    let y = track.center().y;
    list.push(DrawCommand::Line {
        points: [
            Pos2::new(track.min.x + half_handle, y),
            Pos2::new(track.max.x - half_handle, y),
        ],
        width: style.rail_width,
        color: style.rail_color,
    });

    let knob = geometry.handle.shrink(2.0);
    list.push(DrawCommand::Circle {
        center: knob.center(),
        radius: knob.width().min(knob.height()) / 2.0,
        fill: style.handle_fill,
        stroke_width: style.handle_edge_width,
        stroke: style.primary,
    });

    let align = match geometry.value_align {
        Align::Max => Align2::RIGHT_CENTER,
        _ => Align2::LEFT_CENTER,
    };
    list.text(
        geometry.value_text,
        value_text,
        style.label_font.normalized(display_scale),
        style.text_dark,
        align,
    );
}

/// Filled button with a centred label; colours flip while pressed.
pub fn draw_button(
    list: &mut DrawList,
    rect: Rect,
    label: &str,
    pressed: bool,
    style: &WidgetStyle,
    display_scale: f32,
) {
    let (fill, border, text_color) = if pressed {
        (style.primary_light, style.primary, style.text_dark)
    } else {
        (style.primary, style.primary_dark, style.text_bright)
    };
    list.push(DrawCommand::FillRect { rect, color: fill });
    list.push(DrawCommand::StrokeRect {
        rect,
        width: style.border_width,
        color: border,
    });
    list.text(
        rect,
        label,
        style.button_font.normalized(display_scale),
        text_color,
        Align2::CENTER_CENTER,
    );
}
