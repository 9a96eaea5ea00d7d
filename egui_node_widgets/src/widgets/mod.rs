//! Widget variants and the [`NodeWidget`] that composes one of them with a style.

pub mod button;
pub mod dropdown;
pub mod slider;

use std::borrow::Cow;

use egui::Pos2;

pub use button::{ButtonPhase, ButtonWidget};
pub use dropdown::{DropdownContent, DropdownLevel, DropdownPhase, DropdownWidget};
pub use slider::{SliderContent, SliderPhase, SliderWidget};

use crate::layout::WidgetGeometry;
use crate::render::DrawList;
use crate::style::{DEFAULT_STYLE, WidgetMetrics, WidgetStyle};
use crate::traits::{CanvasHost, NodeHost, TextMeasure};
use crate::types::{EventResponse, NodeFootprint, PointerEvent};

/// The kind-specific part of a widget.
#[derive(Clone, Debug)]
pub enum WidgetContent {
    Dropdown(DropdownWidget),
    Slider(SliderWidget),
    Button(ButtonWidget),
}

/// A widget attached below a node, with its style and metrics.
#[derive(Clone, Debug)]
pub struct NodeWidget {
    content: WidgetContent,
    style: Cow<'static, WidgetStyle>,
    metrics: WidgetMetrics,
}

impl NodeWidget {
    pub fn new(content: WidgetContent) -> Self {
        Self {
            content,
            style: Cow::Borrowed(&DEFAULT_STYLE),
            metrics: WidgetMetrics::default(),
        }
    }

    pub fn dropdown(content: DropdownContent) -> Self {
        Self::new(WidgetContent::Dropdown(DropdownWidget::new(content)))
    }

    pub fn slider(slider: SliderWidget) -> Self {
        Self::new(WidgetContent::Slider(slider))
    }

    pub fn button(button: ButtonWidget) -> Self {
        Self::new(WidgetContent::Button(button))
    }

    /// Use `style` instead of [`DEFAULT_STYLE`] for this instance.
    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = Cow::Owned(style);
        self
    }

    pub fn with_metrics(mut self, metrics: WidgetMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn content(&self) -> &WidgetContent {
        &self.content
    }

    pub fn style(&self) -> &WidgetStyle {
        &self.style
    }

    pub fn metrics(&self) -> &WidgetMetrics {
        &self.metrics
    }

    pub fn as_dropdown(&self) -> Option<&DropdownWidget> {
        match &self.content {
            WidgetContent::Dropdown(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dropdown_mut(&mut self) -> Option<&mut DropdownWidget> {
        match &mut self.content {
            WidgetContent::Dropdown(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_slider(&self) -> Option<&SliderWidget> {
        match &self.content {
            WidgetContent::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut SliderWidget> {
        match &mut self.content {
            WidgetContent::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&ButtonWidget> {
        match &self.content {
            WidgetContent::Button(b) => Some(b),
            _ => None,
        }
    }

    /// Replace the dropdown snapshot. No-op for other kinds.
    pub fn set_dropdown_content(&mut self, content: DropdownContent) {
        let metrics = self.metrics;
        if let Some(dropdown) = self.as_dropdown_mut() {
            dropdown.set_content(content, &metrics);
        }
    }

    /// Widen and grow `footprint` (the node's base footprint) around this widget.
    pub fn layout(&mut self, footprint: &mut NodeFootprint, measure: &dyn TextMeasure) {
        let style = &*self.style;
        match &mut self.content {
            WidgetContent::Dropdown(d) => d.layout(footprint, style, &self.metrics, measure),
            WidgetContent::Slider(s) => s.layout(footprint, style, &self.metrics, measure),
            WidgetContent::Button(b) => b.layout(footprint, style, &self.metrics, measure),
        }
    }

    pub fn render(&self, measure: &dyn TextMeasure) -> DrawList {
        match &self.content {
            WidgetContent::Dropdown(d) => d.render(&self.style, measure),
            WidgetContent::Slider(s) => s.render(&self.style, measure),
            WidgetContent::Button(b) => b.render(&self.style, measure),
        }
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        match &mut self.content {
            WidgetContent::Dropdown(d) => d.handle_event(event, &self.metrics, node, canvas),
            WidgetContent::Slider(s) => s.handle_event(event, node, canvas),
            WidgetContent::Button(b) => b.handle_event(event, node, canvas),
        }
    }

    /// Geometry of the last layout pass, `None` before the first one.
    pub fn geometry(&self) -> Option<WidgetGeometry<'_>> {
        match &self.content {
            WidgetContent::Dropdown(d) if !d.geometry().is_empty() => {
                Some(WidgetGeometry::Dropdown(d.geometry()))
            }
            WidgetContent::Dropdown(_) => None,
            WidgetContent::Slider(s) => s.geometry().map(WidgetGeometry::Slider),
            WidgetContent::Button(b) => b.geometry().map(WidgetGeometry::Button),
        }
    }

    /// True when `pos` falls on an interactive part of the widget.
    pub fn contains(&self, pos: Pos2) -> bool {
        match self.geometry() {
            Some(WidgetGeometry::Dropdown(levels)) => levels.iter().any(|l| {
                l.border.contains(pos) || l.overlay.as_ref().is_some_and(|o| o.band.contains(pos))
            }),
            Some(WidgetGeometry::Slider(s)) => s.track.contains(pos),
            Some(WidgetGeometry::Button(b)) => b.button.contains(pos),
            None => false,
        }
    }
}
