//! Recording hosts for unit tests.

use crate::text::FontSpec;
use crate::traits::{CanvasHost, NodeHost, TextMeasure};
use crate::types::{CursorHint, RangeEditOutcome, SliderRange};

#[derive(Default)]
pub(crate) struct RecordingNode {
    pub selections: Vec<(usize, usize)>,
    pub values: Vec<f64>,
    pub ranges: Vec<(f64, f64)>,
    pub clicks: usize,
    pub recomputes: usize,
    pub undo_labels: Vec<String>,
}

impl NodeHost for RecordingNode {
    fn selection_changed(&mut self, level: usize, option: usize) {
        self.selections.push((level, option));
    }

    fn value_changed(&mut self, value: f64) {
        self.values.push(value);
    }

    fn range_changed(&mut self, min: f64, max: f64) {
        self.ranges.push((min, max));
    }

    fn clicked(&mut self) {
        self.clicks += 1;
    }

    fn request_recompute(&mut self) {
        self.recomputes += 1;
    }

    fn request_undo_checkpoint(&mut self, label: &str) {
        self.undo_labels.push(label.to_owned());
    }
}

/// Canvas with fixed-advance text: every char is `size * 0.5` wide.
pub(crate) struct RecordingCanvas {
    pub invalidations: usize,
    pub cursors: Vec<CursorHint>,
    pub cursor_resets: usize,
    pub editor_requests: Vec<SliderRange>,
    /// Answer returned by the next range editor request.
    pub editor_answer: RangeEditOutcome,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            invalidations: 0,
            cursors: Vec::new(),
            cursor_resets: 0,
            editor_requests: Vec::new(),
            editor_answer: RangeEditOutcome::Cancelled,
        }
    }
}

impl TextMeasure for RecordingCanvas {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }
}

impl CanvasHost for RecordingCanvas {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn set_cursor(&mut self, cursor: CursorHint) {
        self.cursors.push(cursor);
    }

    fn reset_cursor(&mut self) {
        self.cursor_resets += 1;
    }

    fn open_range_editor(&mut self, current: SliderRange) -> RangeEditOutcome {
        self.editor_requests.push(current);
        self.editor_answer
    }
}
