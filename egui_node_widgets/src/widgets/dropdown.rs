//! Cascading multi-level dropdown.
//!
//! The widget only displays the option lists it is given and mutates its own copy
//! of the selections. When a pick at one level should change the options of deeper
//! levels, the owning node rebuilds the content and the host hands the new
//! snapshot over with [`DropdownWidget::set_content`].

use egui::Pos2;
use log::{debug, trace, warn};

use crate::error::WidgetError;
use crate::layout::{self, DropdownLevelGeometry, LevelBand, ScrollMetrics};
use crate::render::{self, DrawList, ValueBoxState};
use crate::style::{WidgetMetrics, WidgetStyle};
use crate::text;
use crate::traits::{CanvasHost, NodeHost, TextMeasure};
use crate::types::{CursorHint, EventResponse, NodeFootprint, PointerEvent, PointerKind};

/// One selectable slot in the cascade.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownLevel {
    options: Vec<String>,
    /// `None` shows the placeholder.
    selection: Option<String>,
    caption: String,
    placeholder: Option<String>,
}

impl DropdownLevel {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selection: None,
            caption: String::new(),
            placeholder: None,
        }
    }

    /// Text of the divider drawn above the level.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Hint shown until the user picks a real option.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Index of the first option equal to the current selection.
    pub fn selected_index(&self) -> Option<usize> {
        let selection = self.selection.as_deref()?;
        self.options.iter().position(|o| o == selection)
    }

    /// True when no real option is selected; a selection missing from the
    /// option list counts as the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.selected_index().is_none()
    }

    pub fn display_text(&self) -> &str {
        match self.selected_index() {
            Some(i) => &self.options[i],
            None => self.placeholder.as_deref().unwrap_or(""),
        }
    }

    fn is_selected(&self, option: &str) -> bool {
        self.selected_index()
            .is_some_and(|i| self.options[i] == option)
    }

    /// Returns false when the level has no placeholder to fall back to.
    fn reset_to_placeholder(&mut self) -> bool {
        if self.placeholder.is_none() {
            return false;
        }
        self.selection = None;
        true
    }
}

/// Immutable snapshot of every level, as supplied by the owning node.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownContent {
    levels: Vec<DropdownLevel>,
}

impl DropdownContent {
    /// Levels without a selection start on their placeholder, or on their first
    /// option when no placeholder is configured.
    pub fn new(levels: Vec<DropdownLevel>) -> Result<Self, WidgetError> {
        if levels.is_empty() {
            return Err(WidgetError::EmptyLevels);
        }
        let mut levels = levels;
        for (i, level) in levels.iter_mut().enumerate() {
            if let Some(placeholder) = &level.placeholder {
                if level.options.contains(placeholder) {
                    return Err(WidgetError::PlaceholderIsOption {
                        level: i,
                        placeholder: placeholder.clone(),
                    });
                }
            }
            if level.selection.is_none() && level.placeholder.is_none() {
                level.selection = level.options.first().cloned();
            }
            if level.selection.is_some() && level.is_placeholder() {
                warn!(
                    "Dropdown level {}: selection {:?} is not an option, showing placeholder",
                    i, level.selection
                );
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[DropdownLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&DropdownLevel> {
        self.levels.get(index)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// Interaction phase. At most one level is open at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DropdownPhase {
    #[default]
    Closed,
    Open {
        level: usize,
    },
    /// The scrollbar thumb of the open level is being dragged.
    ScrollDragging {
        level: usize,
        start_y: f32,
        start_offset: f32,
    },
}

impl DropdownPhase {
    pub fn open_level(&self) -> Option<usize> {
        match *self {
            Self::Closed => None,
            Self::Open { level } | Self::ScrollDragging { level, .. } => Some(level),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct DropdownState {
    phase: DropdownPhase,
    /// Scrollbar thumb offset inside the overlay band.
    thumb_offset: f32,
    /// Pointer over an arrow box.
    hover: bool,
    /// The current press opened the level, so its pointer-up must not close it again.
    opened_by_press: bool,
}

#[derive(Clone, Debug)]
pub struct DropdownWidget {
    content: DropdownContent,
    state: DropdownState,
    geometry: Vec<DropdownLevelGeometry>,
}

impl DropdownWidget {
    pub fn new(content: DropdownContent) -> Self {
        Self {
            content,
            state: DropdownState::default(),
            geometry: Vec::new(),
        }
    }

    pub fn content(&self) -> &DropdownContent {
        &self.content
    }

    /// Adopt a fresh snapshot from the owning node.
    pub fn set_content(&mut self, content: DropdownContent, metrics: &WidgetMetrics) {
        self.content = content;
        match self.state.phase.open_level() {
            Some(level) if level >= self.content.level_count() => self.close(),
            Some(level) => {
                let scroll = ScrollMetrics::new(self.content.levels[level].options.len(), metrics);
                self.state.thumb_offset = scroll.clamp_thumb(self.state.thumb_offset);
            }
            None => {}
        }
    }

    pub fn phase(&self) -> DropdownPhase {
        self.state.phase
    }

    pub fn open_level(&self) -> Option<usize> {
        self.state.phase.open_level()
    }

    pub fn selected_index(&self, level: usize) -> Option<usize> {
        self.content.level(level)?.selected_index()
    }

    pub fn display_text(&self, level: usize) -> Option<&str> {
        self.content.level(level).map(DropdownLevel::display_text)
    }

    /// Content scroll of the open level, in canvas units.
    pub fn scroll_offset(&self, metrics: &WidgetMetrics) -> f32 {
        self.state
            .phase
            .open_level()
            .and_then(|level| self.content.level(level))
            .map_or(0.0, |level| {
                ScrollMetrics::new(level.options.len(), metrics).content_offset(self.state.thumb_offset)
            })
    }

    pub fn geometry(&self) -> &[DropdownLevelGeometry] {
        &self.geometry
    }

    /// Narrowest footprint that fits every caption, placeholder and option.
    pub fn min_width(
        &self,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) -> f32 {
        let levels = self.content.levels();
        let captions = text::max_text_width(
            measure,
            levels.iter().map(DropdownLevel::caption),
            style.caption_font,
        );
        let placeholders = text::max_text_width(
            measure,
            levels.iter().filter_map(DropdownLevel::placeholder),
            style.caption_font,
        );
        let options = text::max_text_width(
            measure,
            levels.iter().flat_map(|l| l.options.iter().map(String::as_str)),
            style.label_font,
        );
        captions
            .max(placeholders)
            .max(options)
            .max(metrics.min_width)
    }

    pub fn layout(
        &mut self,
        footprint: &mut NodeFootprint,
        style: &WidgetStyle,
        metrics: &WidgetMetrics,
        measure: &dyn TextMeasure,
    ) {
        layout::fit_width(footprint, self.min_width(style, metrics, measure));
        let bands: Vec<LevelBand<'_>> = self
            .content
            .levels
            .iter()
            .map(|l| LevelBand {
                caption: &l.caption,
                option_count: l.options.len(),
            })
            .collect();
        self.geometry = layout::layout_dropdown(
            footprint,
            &bands,
            self.state.phase.open_level(),
            self.state.thumb_offset,
            metrics,
        );
    }

    pub fn render(&self, style: &WidgetStyle, measure: &dyn TextMeasure) -> DrawList {
        let scale = measure.display_scale();
        let open = self.state.phase.open_level();
        let dragging = matches!(self.state.phase, DropdownPhase::ScrollDragging { .. });
        let mut list = DrawList::new();

        for (i, (level, geo)) in self.content.levels.iter().zip(&self.geometry).enumerate() {
            if let Some(divider) = geo.divider {
                render::draw_divider(&mut list, divider, &level.caption, style, measure);
            }
            let state = ValueBoxState {
                placeholder: level.is_placeholder(),
                active: open == Some(i),
            };
            render::draw_value_box(
                &mut list,
                geo.border,
                geo.text,
                level.display_text(),
                state,
                style,
                scale,
            );
            render::draw_dropdown_arrow(&mut list, geo.arrow, style.arrow_color);
        }

        // Overlays last so they sit above everything else.
        for (level, geo) in self.content.levels.iter().zip(&self.geometry) {
            if let Some(overlay) = &geo.overlay {
                render::draw_overlay(&mut list, overlay, &level.options, dragging, style, scale);
            }
        }
        list
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        metrics: &WidgetMetrics,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        match event.kind {
            PointerKind::Down if event.is_primary() => self.pointer_down(event.pos, node, canvas),
            PointerKind::Up if event.is_primary() => self.pointer_up(event.pos, node, canvas),
            PointerKind::Move => self.pointer_move(event.pos, metrics, canvas),
            _ => EventResponse::Ignored,
        }
    }

    fn pointer_down(
        &mut self,
        pos: Pos2,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if let Some(level) = self.state.phase.open_level() {
            let thumb = self
                .geometry
                .get(level)
                .and_then(|g| g.overlay.as_ref())
                .and_then(|o| o.thumb);
            if thumb.is_some_and(|t| t.contains(pos)) {
                debug!("Dropdown level {}: scroll drag started", level);
                self.state.phase = DropdownPhase::ScrollDragging {
                    level,
                    start_y: pos.y,
                    start_offset: self.state.thumb_offset,
                };
                canvas.invalidate();
                return EventResponse::Captured;
            }
        }

        let Some(level) = self.value_box_at(pos) else {
            return EventResponse::Ignored;
        };
        if self.state.phase.open_level() != Some(level) {
            self.open(level);
            self.state.opened_by_press = true;
            node.request_recompute();
            canvas.invalidate();
        }
        EventResponse::Captured
    }

    fn pointer_up(
        &mut self,
        pos: Pos2,
        node: &mut dyn NodeHost,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if let DropdownPhase::ScrollDragging { level, .. } = self.state.phase {
            debug!(
                "Dropdown level {}: scroll committed at {}",
                level, self.state.thumb_offset
            );
            self.state.phase = DropdownPhase::Open { level };
            node.request_recompute();
            canvas.invalidate();
            return EventResponse::Released;
        }

        let opened_by_press = std::mem::take(&mut self.state.opened_by_press);

        if let Some(level) = self.value_box_at(pos) {
            if self.state.phase.open_level() == Some(level) {
                if !opened_by_press {
                    self.close();
                }
            } else {
                self.open(level);
            }
            node.request_recompute();
            canvas.invalidate();
            return EventResponse::Handled;
        }

        let Some(level) = self.state.phase.open_level() else {
            return EventResponse::Ignored;
        };
        let overlay = self.geometry.get(level).and_then(|g| g.overlay.as_ref());
        match overlay {
            Some(overlay) if overlay.band.contains(pos) => {
                let Some(row) = overlay.row_at(pos) else {
                    return EventResponse::Handled;
                };
                self.pick(level, row, node);
            }
            _ => {
                debug!("Dropdown level {}: dismissed", level);
                self.close();
            }
        }
        node.request_recompute();
        canvas.invalidate();
        EventResponse::Handled
    }

    fn pointer_move(
        &mut self,
        pos: Pos2,
        metrics: &WidgetMetrics,
        canvas: &mut dyn CanvasHost,
    ) -> EventResponse {
        if let DropdownPhase::ScrollDragging {
            level,
            start_y,
            start_offset,
        } = self.state.phase
        {
            let count = self.content.levels.get(level).map_or(0, |l| l.options.len());
            let scroll = ScrollMetrics::new(count, metrics);
            self.state.thumb_offset = scroll.clamp_thumb(start_offset + (pos.y - start_y));
            trace!("Dropdown level {}: thumb at {}", level, self.state.thumb_offset);
            canvas.invalidate();
            return EventResponse::Handled;
        }

        let over_arrow = self.geometry.iter().any(|g| g.arrow.contains(pos));
        if over_arrow {
            if !self.state.hover {
                self.state.hover = true;
                canvas.set_cursor(CursorHint::Hand);
            }
            return EventResponse::Handled;
        }
        if self.state.hover {
            self.state.hover = false;
            canvas.reset_cursor();
            return EventResponse::Handled;
        }
        EventResponse::Ignored
    }

    fn value_box_at(&self, pos: Pos2) -> Option<usize> {
        self.geometry.iter().position(|g| g.border.contains(pos))
    }

    /// Pick `row` at `level`, then close the level.
    fn pick(&mut self, level: usize, row: usize, node: &mut dyn NodeHost) {
        let Some(option) = self.content.levels[level].options.get(row).cloned() else {
            return;
        };
        if self.content.levels[level].is_selected(&option) {
            debug!("Dropdown level {}: {:?} already selected", level, option);
            self.close();
            return;
        }

        node.request_undo_checkpoint(&format!("Selected {option}"));
        debug!("Dropdown level {}: selected {:?}", level, option);
        self.content.levels[level].selection = Some(option);
        // Deeper option lists are about to be replaced by the owning node.
        for deeper in self.content.levels.iter_mut().skip(level + 1) {
            deeper.reset_to_placeholder();
        }
        self.close();
        node.selection_changed(level, row);
    }

    fn open(&mut self, level: usize) {
        debug!("Dropdown level {}: open", level);
        self.state.phase = DropdownPhase::Open { level };
        self.state.thumb_offset = 0.0;
    }

    fn close(&mut self) {
        self.state.phase = DropdownPhase::Closed;
        self.state.thumb_offset = 0.0;
        self.state.opened_by_press = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DEFAULT_STYLE;
    use crate::test_support::{RecordingCanvas, RecordingNode};
    use egui::{Rect, Vec2, pos2};

    fn footprint() -> NodeFootprint {
        NodeFootprint::new(Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(120.0, 40.0)))
    }

    fn content() -> DropdownContent {
        DropdownContent::new(vec![
            DropdownLevel::new(["X", "Y"]).with_caption("Top"),
            DropdownLevel::new(["1", "2", "3"]).with_placeholder("Pick a number"),
        ])
        .unwrap()
    }

    struct Rig {
        widget: DropdownWidget,
        node: RecordingNode,
        canvas: RecordingCanvas,
        metrics: WidgetMetrics,
    }

    impl Rig {
        fn new(content: DropdownContent) -> Self {
            let mut rig = Self {
                widget: DropdownWidget::new(content),
                node: RecordingNode::default(),
                canvas: RecordingCanvas::default(),
                metrics: WidgetMetrics::default(),
            };
            rig.layout();
            rig
        }

        fn layout(&mut self) {
            let mut fp = footprint();
            self.widget
                .layout(&mut fp, &DEFAULT_STYLE, &self.metrics, &self.canvas);
        }

        fn send(&mut self, event: PointerEvent) -> EventResponse {
            let response =
                self.widget
                    .handle_event(&event, &self.metrics, &mut self.node, &mut self.canvas);
            self.layout();
            response
        }

        fn click(&mut self, pos: Pos2) {
            self.send(PointerEvent::down(pos));
            self.send(PointerEvent::up(pos));
        }

        fn value_box(&self, level: usize) -> Pos2 {
            self.widget.geometry()[level].text.center()
        }

        fn row(&self, level: usize, row: usize) -> Pos2 {
            self.widget.geometry()[level]
                .overlay
                .as_ref()
                .and_then(|o| o.rows[row])
                .map(|r| r.center())
                .unwrap()
        }
    }

    // ── content ──

    #[test]
    fn missing_selection_defaults_to_first_option_or_placeholder() {
        let c = content();
        assert_eq!(c.levels()[0].display_text(), "X");
        assert!(c.levels()[1].is_placeholder());
        assert_eq!(c.levels()[1].display_text(), "Pick a number");
    }

    #[test]
    fn unknown_selection_reads_as_placeholder() {
        let c = DropdownContent::new(vec![DropdownLevel::new(["a"]).with_selection("zzz")]).unwrap();
        assert!(c.levels()[0].is_placeholder());
        assert_eq!(c.levels()[0].display_text(), "");
    }

    #[test]
    fn placeholder_must_not_be_an_option() {
        let err = DropdownContent::new(vec![DropdownLevel::new(["a", "b"]).with_placeholder("b")]);
        assert!(matches!(err, Err(WidgetError::PlaceholderIsOption { level: 0, .. })));
    }

    #[test]
    fn no_levels_is_rejected() {
        assert_eq!(DropdownContent::new(Vec::new()), Err(WidgetError::EmptyLevels));
    }

    // ── open / close ──

    #[test]
    fn click_on_value_box_opens_and_second_click_closes() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(0);
        rig.click(pos);
        assert_eq!(rig.widget.phase(), DropdownPhase::Open { level: 0 });
        rig.click(pos);
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
        assert!(rig.node.recomputes >= 2);
    }

    #[test]
    fn opening_another_level_closes_the_first() {
        let mut rig = Rig::new(content());
        let first = rig.value_box(0);
        rig.click(first);
        let second = rig.value_box(1);
        rig.click(second);
        assert_eq!(rig.widget.open_level(), Some(1));
        assert!(rig.widget.geometry()[0].overlay.is_none());
    }

    #[test]
    fn up_outside_closes_without_callback() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(0);
        rig.click(pos);
        rig.send(PointerEvent::up(pos2(-50.0, -50.0)));
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
        assert!(rig.node.selections.is_empty());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(0);
        let response = rig.send(PointerEvent::down(pos).with_button(crate::types::PointerButton::Secondary));
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
    }

    // ── selection ──

    #[test]
    fn picking_a_new_option_fires_callback_and_resets_deeper_levels() {
        let mut rig = Rig::new(
            DropdownContent::new(vec![
                DropdownLevel::new(["X", "Y"]),
                DropdownLevel::new(["1", "2"]).with_selection("2").with_placeholder("-"),
            ])
            .unwrap(),
        );
        let pos = rig.value_box(0);
        rig.click(pos);
        let row = rig.row(0, 1);
        rig.click(row);

        assert_eq!(rig.node.selections, vec![(0, 1)]);
        assert_eq!(rig.node.undo_labels, vec!["Selected Y".to_string()]);
        assert_eq!(rig.widget.display_text(0), Some("Y"));
        assert!(rig.widget.content().levels()[1].is_placeholder());
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
    }

    #[test]
    fn picking_the_current_option_only_closes() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(0);
        rig.click(pos);
        let row = rig.row(0, 0);
        rig.click(row);
        assert!(rig.node.selections.is_empty());
        assert!(rig.node.undo_labels.is_empty());
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
    }

    #[test]
    fn shallower_levels_are_untouched_by_a_pick() {
        let mut rig = Rig::new(
            DropdownContent::new(vec![
                DropdownLevel::new(["a", "b"]).with_selection("b"),
                DropdownLevel::new(["X", "Y"]).with_placeholder("-"),
                DropdownLevel::new(["1", "2"]).with_selection("1").with_placeholder("-"),
            ])
            .unwrap(),
        );
        let pos = rig.value_box(1);
        rig.click(pos);
        let row = rig.row(1, 0);
        rig.click(row);
        assert_eq!(rig.widget.display_text(0), Some("b"));
        assert_eq!(rig.widget.display_text(1), Some("X"));
        assert!(rig.widget.content().levels()[2].is_placeholder());
    }

    #[test]
    fn levels_without_placeholder_keep_their_selection() {
        let mut rig = Rig::new(
            DropdownContent::new(vec![
                DropdownLevel::new(["X", "Y"]),
                DropdownLevel::new(["1", "2"]).with_selection("2"),
            ])
            .unwrap(),
        );
        let pos = rig.value_box(0);
        rig.click(pos);
        let row = rig.row(0, 1);
        rig.click(row);
        assert_eq!(rig.node.selections, vec![(0, 1)]);
        assert_eq!(rig.widget.display_text(1), Some("2"));
    }

    #[test]
    fn duplicate_labels_compare_by_text() {
        let mut rig = Rig::new(
            DropdownContent::new(vec![DropdownLevel::new(["same", "same"]).with_selection("same")])
                .unwrap(),
        );
        let pos = rig.value_box(0);
        rig.click(pos);
        let row = rig.row(0, 1);
        rig.click(row);
        assert!(rig.node.selections.is_empty());
    }

    // ── content refresh ──

    #[test]
    fn set_content_closes_a_vanished_open_level() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(1);
        rig.click(pos);
        let smaller = DropdownContent::new(vec![DropdownLevel::new(["X"])]).unwrap();
        rig.widget.set_content(smaller, &rig.metrics);
        assert_eq!(rig.widget.phase(), DropdownPhase::Closed);
    }

    // ── hover ──

    #[test]
    fn hovering_the_arrow_sets_and_resets_the_cursor_once() {
        let mut rig = Rig::new(content());
        let arrow = rig.widget.geometry()[0].arrow.center();
        rig.send(PointerEvent::moved(arrow));
        rig.send(PointerEvent::moved(arrow + Vec2::new(0.5, 0.0)));
        rig.send(PointerEvent::moved(pos2(-10.0, -10.0)));
        rig.send(PointerEvent::moved(pos2(-20.0, -10.0)));
        assert_eq!(rig.canvas.cursors, vec![CursorHint::Hand]);
        assert_eq!(rig.canvas.cursor_resets, 1);
    }

    // ── render ──

    #[test]
    fn render_shows_selection_placeholder_and_open_rows() {
        let mut rig = Rig::new(content());
        let pos = rig.value_box(1);
        rig.click(pos);
        let list = rig.widget.render(&DEFAULT_STYLE, &rig.canvas);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Top", "X", "Pick a number", "1", "2", "3"]);
    }

    #[test]
    fn min_width_covers_the_longest_option() {
        let widget = DropdownWidget::new(
            DropdownContent::new(vec![DropdownLevel::new(["a very very long option label"])])
                .unwrap(),
        );
        let canvas = RecordingCanvas::default();
        let w = widget.min_width(&DEFAULT_STYLE, &WidgetMetrics::default(), &canvas);
        // 29 chars * 3.5 + 8
        assert_eq!(w, 29.0 * 3.5 + 8.0);
    }
}
