//! egui adapter: paints a [`DrawList`] and measures text with egui's fonts.

use egui::emath::TSTransform;
use egui::{Color32, FontId, Painter, Shape, Stroke, StrokeKind};

use crate::render::{DrawCommand, DrawList};
use crate::text::FontSpec;
use crate::traits::TextMeasure;

/// Paint `list` with `transform` mapping canvas units to screen points.
pub fn paint_draw_list(painter: &Painter, list: &DrawList, transform: TSTransform) {
    let scale = transform.scaling;
    for command in list.commands() {
        match command {
            DrawCommand::FillRect { rect, color } => {
                painter.rect_filled(transform.mul_rect(*rect), 0.0, *color);
            }
            DrawCommand::StrokeRect { rect, width, color } => {
                painter.rect_stroke(
                    transform.mul_rect(*rect),
                    0.0,
                    Stroke::new(width * scale, *color),
                    StrokeKind::Middle,
                );
            }
            DrawCommand::Line {
                points,
                width,
                color,
            } => {
                painter.line_segment(
                    [transform * points[0], transform * points[1]],
                    Stroke::new(width * scale, *color),
                );
            }
            DrawCommand::Polyline {
                points,
                width,
                color,
            } => {
                let points = points.iter().map(|p| transform * *p).collect();
                painter.add(Shape::line(points, Stroke::new(width * scale, *color)));
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke_width,
                stroke,
            } => {
                painter.circle(
                    transform * *center,
                    radius * scale,
                    *fill,
                    Stroke::new(stroke_width * scale, *stroke),
                );
            }
            DrawCommand::Text {
                rect,
                text,
                font,
                color,
                align,
            } => {
                if text.is_empty() || font.size <= 0.0 {
                    continue;
                }
                let rect = transform.mul_rect(*rect);
                painter.with_clip_rect(rect.intersect(painter.clip_rect())).text(
                    align.pos_in_rect(&rect),
                    *align,
                    text,
                    FontId::proportional(font.size * scale),
                    *color,
                );
            }
        }
    }
}

/// [`TextMeasure`] backed by the fonts of an egui painter.
pub struct EguiTextMeasure<'a> {
    painter: &'a Painter,
    display_scale: f32,
}

impl<'a> EguiTextMeasure<'a> {
    pub fn new(painter: &'a Painter, display_scale: f32) -> Self {
        Self {
            painter,
            display_scale,
        }
    }
}

impl TextMeasure for EguiTextMeasure<'_> {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() || font.size <= 0.0 {
            return 0.0;
        }
        self.painter
            .layout_no_wrap(text.to_owned(), FontId::proportional(font.size), Color32::BLACK)
            .size()
            .x
    }

    fn display_scale(&self) -> f32 {
        self.display_scale
    }
}
