//! Lightweight data types shared between the widget engine and its hosts.

use egui::{Pos2, Rect, Vec2};

/// Mouse button carried by a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    /// No button involved (plain pointer motion).
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
    DoubleClick,
}

/// A pointer event in canvas coordinates (already adjusted for pan/zoom).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    pub button: PointerButton,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn down(pos: Pos2) -> Self {
        Self {
            pos,
            button: PointerButton::Primary,
            kind: PointerKind::Down,
        }
    }

    pub fn up(pos: Pos2) -> Self {
        Self {
            pos,
            button: PointerButton::Primary,
            kind: PointerKind::Up,
        }
    }

    pub fn moved(pos: Pos2) -> Self {
        Self {
            pos,
            button: PointerButton::None,
            kind: PointerKind::Move,
        }
    }

    pub fn double_click(pos: Pos2) -> Self {
        Self {
            pos,
            button: PointerButton::Primary,
            kind: PointerKind::DoubleClick,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// How a widget answered a pointer event.
///
/// Hosts use this to route pointer capture: after `Captured`, every event goes
/// to the capturing widget until it answers `Released` or the matching
/// pointer-up has been delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    /// The event was not for this widget.
    Ignored,
    Handled,
    Captured,
    Released,
}

impl EventResponse {
    pub fn is_consumed(self) -> bool {
        self != Self::Ignored
    }
}

/// Cursor shape a widget asks the host canvas to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Hand,
    DragHorizontal,
}

/// Connection point of one input or output parameter, with its label box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamAnchor {
    pub pivot: Pos2,
    pub bounds: Rect,
}

impl ParamAnchor {
    pub fn new(pivot: Pos2, bounds: Rect) -> Self {
        Self { pivot, bounds }
    }

    pub(crate) fn translate_x(&mut self, dx: f32) {
        self.pivot.x += dx;
        self.bounds = self.bounds.translate(Vec2::new(dx, 0.0));
    }
}

/// The owning node's footprint on the canvas.
///
/// Hosts hand the widget the node's *base* footprint on every layout pass;
/// the widget widens it, re-anchors the parameters and appends its bands below.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeFootprint {
    pub bounds: Rect,
    pub inputs: Vec<ParamAnchor>,
    pub outputs: Vec<ParamAnchor>,
}

impl NodeFootprint {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, anchor: ParamAnchor) -> Self {
        self.inputs.push(anchor);
        self
    }

    pub fn with_output(mut self, anchor: ParamAnchor) -> Self {
        self.outputs.push(anchor);
        self
    }
}

/// Range parameters shown in (and returned from) the slider's popup editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub digits: u32,
}

/// Result of asking the host to run the slider's numeric-range editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeEditOutcome {
    Confirmed(SliderRange),
    Cancelled,
    /// The editor is still open; the host reports the result later through
    /// `SliderWidget::complete_range_edit`.
    Pending,
}
