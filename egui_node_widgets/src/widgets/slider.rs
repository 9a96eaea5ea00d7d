//! Draggable value slider with a popup range editor.

use egui::Pos2;
use log::{debug, trace, warn};

use crate::error::WidgetError;
use crate::layout::{self, SliderGeometry};
use crate::render::{self, DrawList};
use crate::style::{WidgetMetrics, WidgetStyle};
use crate::text;
use crate::traits::{CanvasHost, NodeHost, TextMeasure};
use crate::types::{
    CursorHint, EventResponse, NodeFootprint, PointerEvent, PointerKind, RangeEditOutcome,
    SliderRange,
};

/// Largest supported display precision.
pub const MAX_DIGITS: u32 = 15;

/// Numeric range, current value and display precision of a slider.
///
/// The range ends are rounded inwards to `digits`, so the slider never reports
/// a value outside the range it was given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderContent {
    min: f64,
    max: f64,
    value: f64,
    digits: u32,
}

impl SliderContent {
    /// `value` is clamped into the range and rounded.
    pub fn new(min: f64, max: f64, value: f64, digits: u32) -> Result<Self, WidgetError> {
        if !min.is_finite() {
            return Err(WidgetError::NonFiniteValue("minimum"));
        }
        if !max.is_finite() {
            return Err(WidgetError::NonFiniteValue("maximum"));
        }
        if !value.is_finite() {
            return Err(WidgetError::NonFiniteValue("value"));
        }
        if digits > MAX_DIGITS {
            return Err(WidgetError::TooManyDigits(digits));
        }
        if min > max || !(max - min).is_finite() {
            return Err(WidgetError::InvalidRange { min, max });
        }
        let (lo, hi) = (
            text::round_up_to_digits(min, digits),
            text::round_down_to_digits(max, digits),
        );
        let (min, max) = if lo > hi {
            warn!("Slider: no {digits}-digit value inside [{min}, {max}], keeping the range as given");
            (min, max)
        } else {
            if lo != min || hi != max {
                warn!("Slider: range [{min}, {max}] narrowed to [{lo}, {hi}] at {digits} digits");
            }
            (lo, hi)
        };
        let mut content = Self {
            min,
            max,
            value: min,
            digits,
        };
        content.value = content.snap(value);
        Ok(content)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn range(&self) -> SliderRange {
        SliderRange {
            min: self.min,
            max: self.max,
            value: self.value,
            digits: self.digits,
        }
    }

    /// Position of the value along the range, 0 for a degenerate range.
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Value at `fraction` of the range, rounded to the display precision.
    pub fn value_at(&self, fraction: f64) -> f64 {
        let f = fraction.clamp(0.0, 1.0);
        self.snap(self.min * (1.0 - f) + self.max * f)
    }

    pub fn formatted_value(&self) -> String {
        text::format_fixed(self.value, self.digits)
    }

    fn snap(&self, value: f64) -> f64 {
        text::round_to_digits(value.clamp(self.min, self.max), self.digits).clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SliderPhase {
    #[default]
    Idle,
    /// Handle grabbed: pointer x and handle offset along the track at grab time.
    Dragging { start_x: f32, start_offset: f32 },
    /// Waiting for the host's range editor. Keeps the fraction of the value
    /// that was pre-filled, for re-deriving the value in the new range.
    PopupEditing { prefilled: SliderRange, fraction: f64 },
}

#[derive(Clone, Debug)]
pub struct SliderWidget {
    content: SliderContent,
    caption: String,
    phase: SliderPhase,
    hover: bool,
    geometry: Option<SliderGeometry>,
}

impl SliderWidget {
    pub fn new(content: SliderContent) -> Self {
        Self {
            content,
            caption: String::new(),
            phase: SliderPhase::Idle,
            hover: false,
            geometry: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn content(&self) -> &SliderContent {
        &self.content
    }

    pub fn value(&self) -> f64 {
        self.content.value
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn phase(&self) -> SliderPhase {
        self.phase
    }

    pub fn geometry(&self) -> Option<&SliderGeometry> {
        self.geometry.as_ref()
    }

    pub fn min_width(
        &self,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) -> f32 {
        text::max_text_width(measure, [self.caption.as_str()], style.caption_font)
            .max(metrics.min_width)
    }

    /// The handle is always placed from the current value, so a range edit
    /// repositions it on the next pass.
    pub fn layout(
        &mut self,
        footprint: &mut NodeFootprint,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) {
        layout::fit_width(footprint, self.min_width(style, metrics, measure));
        self.geometry = Some(layout::layout_slider(
            footprint,
            &self.caption,
            self.content.fraction() as f32,
            metrics,
        ));
    }

    pub fn render(&self, style: &WidgetStyle, measure: &dyn TextMeasure) -> DrawList {
        let mut list = DrawList::new();
        let Some(geometry) = &self.geometry else {
            return list;
        };
        if let Some(divider) = geometry.divider {
            render::draw_divider(&mut list, divider, &self.caption, style, measure);
        }
        render::draw_slider(
            &mut list,
            geometry,
            &self.content.formatted_value(),
            style,
            measure.display_scale(),
        );
        list
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        match event.kind {
            PointerKind::Down if event.is_primary() => self.pointer_down(event.pos, node),
            PointerKind::Up if event.is_primary() => self.pointer_up(node, canvas),
            PointerKind::Move => self.pointer_move(event.pos, node, canvas),
            PointerKind::DoubleClick if event.is_primary() => {
                self.double_click(event.pos, node, canvas)
            }
            _ => EventResponse::Ignored,
        }
    }

    /// Apply the answer of a range editor that returned
    /// [`RangeEditOutcome::Pending`].
    pub fn complete_range_edit(
        &mut self,
        outcome: RangeEditOutcome,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        let SliderPhase::PopupEditing { prefilled, fraction } = self.phase else {
            warn!("Slider: range edit result arrived while no editor was open");
            return EventResponse::Ignored;
        };

        match outcome {
            RangeEditOutcome::Pending => return EventResponse::Handled,
            RangeEditOutcome::Cancelled => debug!("Slider: range edit cancelled"),
            RangeEditOutcome::Confirmed(edited) => {
                match Self::edited_content(&edited, &prefilled, fraction) {
                    Ok(content) => {
                        debug!(
                            "Slider: range [{}, {}] value {} ({} digits)",
                            content.min, content.max, content.value, content.digits
                        );
                        self.content = content;
                        node.range_changed(content.min, content.max);
                        node.value_changed(content.value);
                        node.request_recompute();
                    }
                    Err(err) => warn!("Slider: range edit rejected: {err}"),
                }
            }
        }
        self.phase = SliderPhase::Idle;
        canvas.invalidate();
        EventResponse::Handled
    }

    /// An untouched value follows its old position into the new range.
    fn edited_content(
        edited: &SliderRange,
        prefilled: &SliderRange,
        fraction: f64,
    ) -> Result<SliderContent, WidgetError> {
        let content = SliderContent::new(edited.min, edited.max, edited.value, edited.digits)?;
        if edited.value == prefilled.value {
            Ok(SliderContent {
                value: content.value_at(fraction),
                ..content
            })
        } else {
            Ok(content)
        }
    }

    fn on_handle(&self, pos: Pos2) -> bool {
        self.geometry.as_ref().is_some_and(|g| g.handle.contains(pos))
    }

    fn pointer_down(&mut self, pos: Pos2, node: &mut dyn NodeHost) -> EventResponse {
        if !matches!(self.phase, SliderPhase::Idle) || !self.on_handle(pos) {
            return EventResponse::Ignored;
        }
        let Some(geometry) = &self.geometry else {
            return EventResponse::Ignored;
        };
        let start_offset = geometry.handle.min.x - geometry.track.min.x;
        debug!("Slider: drag started at offset {start_offset}");
        self.phase = SliderPhase::Dragging {
            start_x: pos.x,
            start_offset,
        };
        node.request_recompute();
        EventResponse::Captured
    }

    fn pointer_up(&mut self, node: &mut dyn NodeHost, canvas: &mut dyn CanvasHost) -> EventResponse {
        if !matches!(self.phase, SliderPhase::Dragging { .. }) {
            return EventResponse::Ignored;
        }
        debug!("Slider: drag committed at {}", self.content.value);
        self.phase = SliderPhase::Idle;
        node.request_recompute();
        canvas.invalidate();
        EventResponse::Released
    }

    fn pointer_move(
        &mut self,
        pos: Pos2,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if let SliderPhase::Dragging {
            start_x,
            start_offset,
        } = self.phase
        {
            let travel = self.geometry.as_ref().map_or(0.0, SliderGeometry::travel);
            let offset = (start_offset + pos.x - start_x).clamp(0.0, travel);
            let fraction = if travel > 0.0 { offset / travel } else { 0.0 };
            self.content.value = self.content.value_at(f64::from(fraction));
            trace!("Slider: value {}", self.content.value);

            canvas.set_cursor(CursorHint::DragHorizontal);
            node.value_changed(self.content.value);
            node.request_recompute();
            canvas.invalidate();
            return EventResponse::Handled;
        }

        if self.on_handle(pos) {
            if !self.hover {
                self.hover = true;
                canvas.set_cursor(CursorHint::DragHorizontal);
            }
            return EventResponse::Handled;
        }
        if self.hover {
            self.hover = false;
            canvas.reset_cursor();
            return EventResponse::Handled;
        }
        EventResponse::Ignored
    }

    fn double_click(
        &mut self,
        pos: Pos2,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if !self.on_handle(pos) {
            return EventResponse::Ignored;
        }
        let prefilled = self.content.range();
        debug!("Slider: opening range editor");
        self.phase = SliderPhase::PopupEditing {
            prefilled,
            fraction: self.content.fraction(),
        };
        let outcome = canvas.open_range_editor(prefilled);
        self.complete_range_edit(outcome, node, canvas)
    }
}
