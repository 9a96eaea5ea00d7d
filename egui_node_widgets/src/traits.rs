//! Capability interfaces decoupling the widgets from the node and canvas that host them.

use crate::text::FontSpec;
use crate::types::{CursorHint, RangeEditOutcome, SliderRange};

/// The node that owns a widget.
///
/// Callbacks are fire-and-forget. Content changes flow back into the widget
/// only through a fresh content snapshot handed over by the host.
pub trait NodeHost {
    /// A dropdown option was picked: `level` is the dropdown list, `option` the row in it.
    fn selection_changed(&mut self, level: usize, option: usize) {
        let _ = (level, option);
    }

    /// The slider value changed. Called on every drag tick.
    fn value_changed(&mut self, value: f64) {
        let _ = value;
    }

    /// The slider range was edited through the popup editor.
    fn range_changed(&mut self, min: f64, max: f64) {
        let _ = (min, max);
    }

    /// The button was clicked.
    fn clicked(&mut self) {}

    /// Mark the node dirty and trigger a fresh solve/redraw cycle.
    fn request_recompute(&mut self);

    /// Snapshot state before a destructive change so the user can undo it.
    fn request_undo_checkpoint(&mut self, label: &str);
}

/// Text metrics provided by the host rendering layer.
pub trait TextMeasure {
    /// Width of `text` rendered with `font`, in canvas units.
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;

    /// Display scale factor; font sizes are divided by it so widths stay
    /// correct on high-resolution displays.
    fn display_scale(&self) -> f32 {
        1.0
    }
}

/// The canvas that dispatches pointer events and draws the widgets.
pub trait CanvasHost: TextMeasure {
    /// Request a redraw of the canvas.
    fn invalidate(&mut self);

    fn set_cursor(&mut self, cursor: CursorHint);

    fn reset_cursor(&mut self);

    /// Open the modal numeric-range editor pre-filled with `current`.
    fn open_range_editor(&mut self, current: SliderRange) -> RangeEditOutcome;
}
