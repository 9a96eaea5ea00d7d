//! Push button.

use egui::Pos2;
use log::debug;

use crate::layout::{self, ButtonGeometry};
use crate::render::{self, DrawList};
use crate::style::{WidgetMetrics, WidgetStyle};
use crate::text;
use crate::traits::{CanvasHost, NodeHost, TextMeasure};
use crate::types::{EventResponse, NodeFootprint, PointerEvent, PointerKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonPhase {
    #[default]
    Idle,
    Pressed,
}

#[derive(Clone, Debug)]
pub struct ButtonWidget {
    label: String,
    caption: String,
    phase: ButtonPhase,
    geometry: Option<ButtonGeometry>,
}

impl ButtonWidget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            caption: String::new(),
            phase: ButtonPhase::Idle,
            geometry: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn phase(&self) -> ButtonPhase {
        self.phase
    }

    pub fn geometry(&self) -> Option<&ButtonGeometry> {
        self.geometry.as_ref()
    }

    pub fn min_width(
        &self,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) -> f32 {
        let caption = text::max_text_width(measure, [self.caption.as_str()], style.caption_font);
        let label = text::max_text_width(measure, [self.label.as_str()], style.button_font);
        caption.max(label).max(metrics.min_width)
    }

    pub fn layout(
        &mut self,
        footprint: &mut NodeFootprint,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) {
        layout::fit_width(footprint, self.min_width(style, metrics, measure));
        self.geometry = Some(layout::layout_button(footprint, &self.caption, metrics));
    }

    pub fn render(&self, style: &WidgetStyle, measure: &dyn TextMeasure) -> DrawList {
        let mut list = DrawList::new();
        let Some(geometry) = &self.geometry else {
            return list;
        };
        if let Some(divider) = geometry.divider {
            render::draw_divider(&mut list, divider, &self.caption, style, measure);
        }
        render::draw_button(
            &mut list,
            geometry.button,
            &self.label,
            self.phase == ButtonPhase::Pressed,
            style,
            measure.display_scale(),
        );
        list
    }

    /// Fires [`NodeHost::clicked`] on a primary release inside the button
    /// that follows a press inside it.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if !event.is_primary() {
            return EventResponse::Ignored;
        }
        match event.kind {
            PointerKind::Down if self.contains(event.pos) => {
                self.phase = ButtonPhase::Pressed;
                node.request_recompute();
                canvas.invalidate();
                EventResponse::Captured
            }
            PointerKind::Up if self.phase == ButtonPhase::Pressed => {
                self.phase = ButtonPhase::Idle;
                if self.contains(event.pos) {
                    debug!("Button {:?}: clicked", self.label);
                    node.clicked();
                    node.request_recompute();
                } else {
                    debug!("Button {:?}: press abandoned", self.label);
                }
                canvas.invalidate();
                EventResponse::Released
            }
            _ => EventResponse::Ignored,
        }
    }

    fn contains(&self, pos: Pos2) -> bool {
        self.geometry.as_ref().is_some_and(|g| g.button.contains(pos))
    }
}
