//! Pan/zoom canvas hosting the demo nodes and routing pointer events to their widgets.

use eframe::egui::{self, Color32, CursorIcon, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use eframe::egui::emath::TSTransform;
use egui_node_widgets::paint::{paint_draw_list, EguiTextMeasure};
use egui_node_widgets::{
    CanvasHost, CursorHint, EventResponse, FontSpec, PointerButton, PointerEvent, PointerKind,
    RangeEditOutcome, SliderRange, TextMeasure, DEFAULT_STYLE,
};
use log::debug;

use crate::config::AppConfig;
use crate::nodes::DemoNode;
use crate::widgets::range_editor::RangeEditor;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

pub struct CanvasTheme {
    pub background_color: Color32,
    pub grid_color: Color32,
    pub grid_spacing: f32,
    pub node_body_color: Color32,
    pub node_outline_color: Color32,
    pub title_color: Color32,
    pub pin_color: Color32,
    pub pin_label_color: Color32,
    pub pin_radius: f32,
    pub node_rounding: f32,
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(30, 30, 30),
            grid_color: Color32::from_rgb(40, 40, 40),
            grid_spacing: 50.0,
            node_body_color: Color32::from_rgb(200, 200, 200),
            node_outline_color: Color32::from_rgb(60, 60, 60),
            title_color: Color32::from_rgb(20, 20, 20),
            pin_color: Color32::from_rgb(90, 90, 90),
            pin_label_color: Color32::from_rgb(40, 40, 40),
            pin_radius: 3.0,
            node_rounding: 3.0,
        }
    }
}

// ---------------------------------------------------------------------------
// FrameHost
// ---------------------------------------------------------------------------

/// Canvas capabilities handed to the widgets for one frame.
struct FrameHost<'a> {
    measure: EguiTextMeasure<'a>,
    cursor: &'a mut CursorHint,
    repaint: bool,
    editor_request: Option<SliderRange>,
}

impl TextMeasure for FrameHost<'_> {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.measure.text_width(text, font)
    }

    fn display_scale(&self) -> f32 {
        self.measure.display_scale()
    }
}

impl CanvasHost for FrameHost<'_> {
    fn invalidate(&mut self) {
        self.repaint = true;
    }

    fn set_cursor(&mut self, cursor: CursorHint) {
        *self.cursor = cursor;
    }

    fn reset_cursor(&mut self) {
        *self.cursor = CursorHint::Default;
    }

    /// The modal is drawn later in the frame; its answer arrives on a later frame.
    fn open_range_editor(&mut self, current: SliderRange) -> RangeEditOutcome {
        self.editor_request = Some(current);
        RangeEditOutcome::Pending
    }
}

// ---------------------------------------------------------------------------
// NodeCanvas
// ---------------------------------------------------------------------------

pub struct NodeCanvas {
    pub nodes: Vec<DemoNode>,
    /// Pan offset in screen points.
    pan: Vec2,
    /// Zoom level (1.0 = 100%).
    zoom: f32,
    /// Node whose widget captured the pointer.
    capture: Option<usize>,
    cursor: CursorHint,
    range_editor: Option<RangeEditor>,
    /// Range editor answer waiting for the next frame, with its node.
    editor_outcome: Option<(usize, RangeEditOutcome)>,
    /// Canvas → screen mapping of the last frame.
    transform: TSTransform,
    theme: CanvasTheme,
    display_scale: f32,
}

const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 3.0;
const DEFAULT_ZOOM: f32 = 2.0;

impl NodeCanvas {
    pub fn new(nodes: Vec<DemoNode>, config: &AppConfig) -> Self {
        Self {
            nodes,
            pan: Vec2::new(40.0, 40.0),
            zoom: DEFAULT_ZOOM,
            capture: None,
            cursor: CursorHint::Default,
            range_editor: None,
            editor_outcome: None,
            transform: TSTransform::IDENTITY,
            theme: CanvasTheme::default(),
            display_scale: config.display_scale_or(1.0),
        }
    }

    pub fn reset_view(&mut self) {
        self.pan = Vec2::new(40.0, 40.0);
        self.zoom = DEFAULT_ZOOM;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[cfg(test)]
    pub(crate) fn set_view(&mut self, pan: Vec2, zoom: f32) {
        self.pan = pan;
        self.zoom = zoom;
    }

    /// Screen position of a canvas point, as of the last frame.
    pub fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.transform * pos
    }

    pub fn range_editor_open(&self) -> bool {
        self.range_editor.is_some()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.zoom <= 0.0 {
            self.zoom = DEFAULT_ZOOM;
        }
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        // Zoom via scroll wheel, keeping the point under the pointer fixed
        if let Some(hover) = ui.input(|i| i.pointer.hover_pos()) {
            if rect.contains(hover) {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    let old_zoom = self.zoom;
                    let new_zoom = (old_zoom + scroll * 0.002).clamp(MIN_ZOOM, MAX_ZOOM);
                    let graph_pos = (hover - rect.min - self.pan) / old_zoom;
                    self.pan = hover - rect.min - graph_pos * new_zoom;
                    self.zoom = new_zoom;
                }
            }
        }
        if response.dragged_by(egui::PointerButton::Middle) {
            self.pan += response.drag_delta();
        }
        self.transform = TSTransform::new(rect.min.to_vec2() + self.pan, self.zoom);

        let display_scale = self.display_scale;
        let mut cursor = self.cursor;
        let mut host = FrameHost {
            measure: EguiTextMeasure::new(&painter, display_scale),
            cursor: &mut cursor,
            repaint: false,
            editor_request: None,
        };

        if let Some((idx, outcome)) = self.editor_outcome.take() {
            if let Some(node) = self.nodes.get_mut(idx) {
                if let Some(slider) = node.widget.as_slider_mut() {
                    slider.complete_range_edit(outcome, &mut node.model, &mut host);
                }
            }
        }

        for node in &mut self.nodes {
            relayout(node, &host);
        }

        if self.range_editor.is_none() {
            for event in collect_events(ui, rect, self.transform.inverse()) {
                self.route(event, &mut host);
            }
        }

        let repaint = host.repaint;
        drop(host);
        self.cursor = cursor;
        if repaint {
            ui.ctx().request_repaint();
        }

        self.paint(&painter, rect, display_scale);
        match self.cursor {
            CursorHint::Default => {}
            CursorHint::Hand => ui.ctx().set_cursor_icon(CursorIcon::PointingHand),
            CursorHint::DragHorizontal => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
        }

        if let Some(editor) = &mut self.range_editor {
            if let Some(outcome) = editor.show(ui.ctx()) {
                self.editor_outcome = Some((editor.node(), outcome));
                self.range_editor = None;
                ui.ctx().request_repaint();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Event routing
    // -----------------------------------------------------------------------

    /// Captured pointers go to the capturing widget only. Presses go to the
    /// topmost widget under the pointer; moves and releases go to every widget
    /// so hover states and open lists can react to the pointer leaving them.
    fn route(&mut self, event: PointerEvent, host: &mut FrameHost<'_>) {
        if let Some(idx) = self.capture {
            let response = self.dispatch(idx, &event, host);
            if response == EventResponse::Released
                || (event.kind == PointerKind::Up && response != EventResponse::Captured)
            {
                debug!("Canvas: capture released by node {}", idx);
                self.capture = None;
            }
            return;
        }

        match event.kind {
            PointerKind::Move | PointerKind::Up => {
                for idx in 0..self.nodes.len() {
                    self.dispatch(idx, &event, host);
                }
            }
            PointerKind::Down | PointerKind::DoubleClick => {
                let target = (0..self.nodes.len())
                    .rev()
                    .find(|&i| self.nodes[i].widget.contains(event.pos));
                if let Some(idx) = target {
                    if self.dispatch(idx, &event, host) == EventResponse::Captured {
                        debug!("Canvas: node {} captured the pointer", self.nodes[idx].id);
                        self.capture = Some(idx);
                    }
                }
            }
        }
    }

    fn dispatch(
        &mut self,
        idx: usize,
        event: &PointerEvent,
        host: &mut FrameHost<'_>,
    ) -> EventResponse {
        let Some(node) = self.nodes.get_mut(idx) else {
            return EventResponse::Ignored;
        };
        let response = node.widget.handle_event(event, &mut node.model, host);
        if response.is_consumed() {
            node.sync_content();
            relayout(node, host);
        }
        if let Some(range) = host.editor_request.take() {
            self.range_editor = Some(RangeEditor::new(idx, range));
        }
        response
    }

    // -----------------------------------------------------------------------
    // Painting
    // -----------------------------------------------------------------------

    fn paint(&self, painter: &Painter, rect: Rect, display_scale: f32) {
        painter.rect_filled(rect, 0.0, self.theme.background_color);
        draw_grid(
            painter,
            rect,
            self.pan,
            self.theme.grid_color,
            self.theme.grid_spacing * self.zoom,
        );

        let measure = EguiTextMeasure::new(painter, display_scale);
        let clipped = painter.with_clip_rect(rect);
        for node in &self.nodes {
            self.paint_node_chrome(&clipped, node);
            paint_draw_list(&clipped, &node.widget.render(&measure), self.transform);
        }
    }

    fn paint_node_chrome(&self, painter: &Painter, node: &DemoNode) {
        let zoom = self.zoom;
        let theme = &self.theme;
        let fp = &node.footprint;
        let body = self.transform.mul_rect(fp.bounds);
        let rounding = theme.node_rounding * zoom;

        painter.rect_filled(body, rounding, theme.node_body_color);
        painter.rect_stroke(
            body,
            rounding,
            Stroke::new(zoom, theme.node_outline_color),
            StrokeKind::Outside,
        );
        painter.text(
            self.to_screen(Pos2::new(fp.bounds.center().x, fp.bounds.min.y + 2.0)),
            egui::Align2::CENTER_TOP,
            &node.title,
            egui::FontId::proportional(DEFAULT_STYLE.button_font.size * zoom),
            theme.title_color,
        );

        let label_font = egui::FontId::proportional(DEFAULT_STYLE.caption_font.size * zoom);
        for (anchor, name) in fp.inputs.iter().zip(&node.inputs) {
            let pivot = self.to_screen(anchor.pivot);
            painter.circle_filled(pivot, theme.pin_radius * zoom, theme.pin_color);
            painter.text(
                self.to_screen(anchor.bounds.left_center()) + Vec2::new(theme.pin_radius * zoom, 0.0),
                egui::Align2::LEFT_CENTER,
                name,
                label_font.clone(),
                theme.pin_label_color,
            );
        }
        for (anchor, name) in fp.outputs.iter().zip(&node.outputs) {
            let pivot = self.to_screen(anchor.pivot);
            painter.circle_filled(pivot, theme.pin_radius * zoom, theme.pin_color);
            painter.text(
                self.to_screen(anchor.bounds.right_center()) - Vec2::new(theme.pin_radius * zoom, 0.0),
                egui::Align2::RIGHT_CENTER,
                name,
                label_font.clone(),
                theme.pin_label_color,
            );
        }
    }
}

/// Rebuild a node's footprint from its base body and its widget.
fn relayout(node: &mut DemoNode, measure: &dyn TextMeasure) {
    let mut footprint = node.base_footprint();
    node.widget.layout(&mut footprint, measure);
    node.footprint = footprint;
}

/// Pointer events of this frame in canvas coordinates.
fn collect_events(ui: &egui::Ui, rect: Rect, to_canvas: TSTransform) -> Vec<PointerEvent> {
    ui.input(|i| {
        let mut events = Vec::new();
        for event in &i.events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    events.push(PointerEvent::moved(to_canvas * *pos));
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    if *pressed && !rect.contains(*pos) {
                        continue;
                    }
                    let canvas_pos = to_canvas * *pos;
                    let event = if *pressed {
                        PointerEvent::down(canvas_pos)
                    } else {
                        PointerEvent::up(canvas_pos)
                    };
                    events.push(event.with_button(map_button(*button)));
                }
                _ => {}
            }
        }
        if i.pointer.button_double_clicked(egui::PointerButton::Primary) {
            if let Some(pos) = i.pointer.interact_pos().filter(|p| rect.contains(*p)) {
                events.push(PointerEvent::double_click(to_canvas * pos));
            }
        }
        events
    })
}

fn map_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        egui::PointerButton::Middle => PointerButton::Middle,
        _ => PointerButton::None,
    }
}

/// Draw a background grid.
fn draw_grid(painter: &Painter, rect: Rect, pan: Vec2, color: Color32, spacing: f32) {
    if spacing <= 1.0 {
        return;
    }
    let stroke = Stroke::new(1.0, color);
    let mut x = rect.min.x + pan.x.rem_euclid(spacing);
    while x < rect.max.x {
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        x += spacing;
    }
    let mut y = rect.min.y + pan.y.rem_euclid(spacing);
    while y < rect.max.y {
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        y += spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_one_to_one() {
        assert_eq!(map_button(egui::PointerButton::Primary), PointerButton::Primary);
        assert_eq!(map_button(egui::PointerButton::Middle), PointerButton::Middle);
        assert_eq!(map_button(egui::PointerButton::Extra1), PointerButton::None);
    }

    #[test]
    fn to_screen_applies_pan_and_zoom() {
        let mut canvas = NodeCanvas::new(Vec::new(), &AppConfig::default());
        canvas.transform = TSTransform::new(Vec2::new(10.0, 20.0), 2.0);
        assert_eq!(canvas.to_screen(Pos2::new(5.0, 5.0)), Pos2::new(20.0, 30.0));
    }

    #[test]
    fn reset_view_restores_default_zoom() {
        let mut canvas = NodeCanvas::new(Vec::new(), &AppConfig::default());
        canvas.zoom = 0.5;
        canvas.reset_view();
        assert_eq!(canvas.zoom(), DEFAULT_ZOOM);
    }
}
