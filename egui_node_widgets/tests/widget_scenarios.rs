//! End-to-end widget scenarios against a mock node and canvas.
//!
//! The mock node rebuilds its dropdown content after every selection, like a real
//! owning node would, and the tests hand the new snapshot back to the widget.

use egui::{Pos2, Rect, Vec2, pos2};
use egui_node_widgets::layout::ScrollMetrics;
use egui_node_widgets::{
    CanvasHost, CursorHint, DropdownContent, DropdownLevel, EventResponse, FontSpec, NodeFootprint,
    NodeHost, NodeWidget, PointerEvent, RangeEditOutcome, SliderContent, SliderRange,
    SliderWidget, TextMeasure, WidgetGeometry, WidgetMetrics,
};

// ---------------------------------------------------------------------------
// Mock hosts
// ---------------------------------------------------------------------------

/// Owning node with a two-level cascade: the level-1 list depends on level 0.
struct CascadeNode {
    top: Vec<&'static str>,
    top_choice: usize,
    selections: Vec<(usize, usize)>,
    undo_labels: Vec<String>,
    recomputes: usize,
}

impl CascadeNode {
    fn new() -> Self {
        Self {
            top: vec!["X", "Y"],
            top_choice: 0,
            selections: Vec::new(),
            undo_labels: Vec::new(),
            recomputes: 0,
        }
    }

    fn remap(option: &str) -> Vec<&'static str> {
        match option {
            "Y" => vec!["7", "8"],
            _ => vec!["1", "2", "3"],
        }
    }

    fn content(&self) -> DropdownContent {
        let top = self.top[self.top_choice];
        DropdownContent::new(vec![
            DropdownLevel::new(self.top.clone()).with_selection(top),
            DropdownLevel::new(Self::remap(top)).with_placeholder("Choose"),
        ])
        .unwrap()
    }
}

impl NodeHost for CascadeNode {
    fn selection_changed(&mut self, level: usize, option: usize) {
        self.selections.push((level, option));
        if level == 0 {
            self.top_choice = option;
        }
    }

    fn request_recompute(&mut self) {
        self.recomputes += 1;
    }

    fn request_undo_checkpoint(&mut self, label: &str) {
        self.undo_labels.push(label.to_owned());
    }
}

#[derive(Default)]
struct ValueNode {
    values: Vec<f64>,
    ranges: Vec<(f64, f64)>,
}

impl NodeHost for ValueNode {
    fn value_changed(&mut self, value: f64) {
        self.values.push(value);
    }

    fn range_changed(&mut self, min: f64, max: f64) {
        self.ranges.push((min, max));
    }

    fn request_recompute(&mut self) {}

    fn request_undo_checkpoint(&mut self, _label: &str) {}
}

struct MockCanvas {
    editor_answer: RangeEditOutcome,
    cursors: Vec<CursorHint>,
    invalidations: usize,
}

impl MockCanvas {
    fn new() -> Self {
        Self {
            editor_answer: RangeEditOutcome::Cancelled,
            cursors: Vec::new(),
            invalidations: 0,
        }
    }
}

impl TextMeasure for MockCanvas {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }
}

impl CanvasHost for MockCanvas {
    fn invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn set_cursor(&mut self, cursor: CursorHint) {
        self.cursors.push(cursor);
    }

    fn reset_cursor(&mut self) {
        self.cursors.push(CursorHint::Default);
    }

    fn open_range_editor(&mut self, _current: SliderRange) -> RangeEditOutcome {
        self.editor_answer
    }
}

fn base() -> NodeFootprint {
    NodeFootprint::new(Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(110.0, 30.0)))
}

fn relayout(widget: &mut NodeWidget, canvas: &MockCanvas) -> NodeFootprint {
    let mut fp = base();
    widget.layout(&mut fp, canvas);
    fp
}

fn value_box(widget: &NodeWidget, level: usize) -> Pos2 {
    widget.as_dropdown().unwrap().geometry()[level].text.center()
}

fn row(widget: &NodeWidget, level: usize, row: usize) -> Pos2 {
    widget.as_dropdown().unwrap().geometry()[level]
        .overlay
        .as_ref()
        .and_then(|o| o.rows[row])
        .map(|r| r.center())
        .unwrap()
}

fn click(widget: &mut NodeWidget, pos: Pos2, node: &mut dyn NodeHost, canvas: &mut MockCanvas) {
    widget.handle_event(&PointerEvent::down(pos), node, canvas);
    relayout(widget, canvas);
    widget.handle_event(&PointerEvent::up(pos), node, canvas);
    relayout(widget, canvas);
}

// ---------------------------------------------------------------------------
// Dropdown
// ---------------------------------------------------------------------------

#[test]
fn test_cascade_selection_refreshes_deeper_level() {
    let mut node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::dropdown(
        DropdownContent::new(vec![
            DropdownLevel::new(["X", "Y"]).with_selection("X"),
            DropdownLevel::new(["1", "2", "3"])
                .with_selection("1")
                .with_placeholder("Choose"),
        ])
        .unwrap(),
    );
    relayout(&mut widget, &canvas);

    let open = value_box(&widget, 0);
    click(&mut widget, open, &mut node, &mut canvas);
    let y = row(&widget, 0, 1);
    click(&mut widget, y, &mut node, &mut canvas);

    // Level 1 falls back to its placeholder before the node refreshes it.
    let dropdown = widget.as_dropdown().unwrap();
    assert!(dropdown.content().levels()[1].is_placeholder());
    assert_eq!(node.selections, vec![(0, 1)]);
    assert_eq!(node.undo_labels, vec!["Selected Y".to_string()]);
    assert!(node.recomputes > 0);

    widget.set_dropdown_content(node.content());
    relayout(&mut widget, &canvas);
    let dropdown = widget.as_dropdown().unwrap();
    assert_eq!(dropdown.content().levels()[1].options(), ["7", "8"]);
    assert_eq!(dropdown.display_text(1), Some("Choose"));
    assert_eq!(dropdown.display_text(0), Some("Y"));
}

#[test]
fn test_at_most_one_level_is_open() {
    let mut node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::dropdown(node.content());
    relayout(&mut widget, &canvas);

    for level in [0, 1, 1, 0, 1, 0, 0] {
        let pos = value_box(&widget, level);
        click(&mut widget, pos, &mut node, &mut canvas);
        let open: Vec<usize> = widget
            .as_dropdown()
            .unwrap()
            .geometry()
            .iter()
            .enumerate()
            .filter(|(_, g)| g.overlay.is_some())
            .map(|(i, _)| i)
            .collect();
        assert!(open.len() <= 1);
        assert_eq!(open.first().copied(), widget.as_dropdown().unwrap().open_level());
    }
}

#[test]
fn test_reselecting_current_option_is_silent() {
    let mut node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::dropdown(node.content());
    relayout(&mut widget, &canvas);

    let open = value_box(&widget, 0);
    click(&mut widget, open, &mut node, &mut canvas);
    let x = row(&widget, 0, 0);
    click(&mut widget, x, &mut node, &mut canvas);

    assert!(node.selections.is_empty());
    assert!(node.undo_labels.is_empty());
    assert_eq!(widget.as_dropdown().unwrap().open_level(), None);
}

#[test]
fn test_levels_without_placeholder_are_not_reset() {
    let mut node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::dropdown(
        DropdownContent::new(vec![
            DropdownLevel::new(["X", "Y"]),
            DropdownLevel::new(["1", "2", "3"]).with_selection("3"),
        ])
        .unwrap(),
    );
    relayout(&mut widget, &canvas);

    let open = value_box(&widget, 0);
    click(&mut widget, open, &mut node, &mut canvas);
    let y = row(&widget, 0, 1);
    click(&mut widget, y, &mut node, &mut canvas);

    assert_eq!(node.selections, vec![(0, 1)]);
    assert_eq!(widget.as_dropdown().unwrap().display_text(1), Some("3"));
}

#[test]
fn test_scroll_drag_maps_thumb_travel_to_content_offset() {
    let metrics = WidgetMetrics::default();
    let options: Vec<String> = (1..=16).map(|i| format!("Item {i}")).collect();
    let mut node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget =
        NodeWidget::dropdown(DropdownContent::new(vec![DropdownLevel::new(options)]).unwrap());
    relayout(&mut widget, &canvas);

    let open = value_box(&widget, 0);
    click(&mut widget, open, &mut node, &mut canvas);

    let scroll = ScrollMetrics::new(16, &metrics);
    let thumb = widget.as_dropdown().unwrap().geometry()[0]
        .overlay
        .as_ref()
        .and_then(|o| o.thumb)
        .unwrap()
        .center();
    let response = widget.handle_event(&PointerEvent::down(thumb), &mut node, &mut canvas);
    assert_eq!(response, EventResponse::Captured);

    let drag = |dy: f32| PointerEvent::moved(thumb + Vec2::new(0.0, dy));
    widget.handle_event(&drag(0.4 * scroll.travel), &mut node, &mut canvas);
    let offset = widget.as_dropdown().unwrap().scroll_offset(&metrics);
    assert!((offset - 0.4 * 6.0 * 15.0).abs() < 1e-3);

    widget.handle_event(&drag(10_000.0), &mut node, &mut canvas);
    assert_eq!(widget.as_dropdown().unwrap().scroll_offset(&metrics), 90.0);
    widget.handle_event(&drag(-10_000.0), &mut node, &mut canvas);
    assert_eq!(widget.as_dropdown().unwrap().scroll_offset(&metrics), 0.0);

    let response = widget.handle_event(&PointerEvent::up(thumb), &mut node, &mut canvas);
    assert_eq!(response, EventResponse::Released);
    assert_eq!(widget.as_dropdown().unwrap().open_level(), Some(0));
    assert!(canvas.invalidations > 0);
}

#[test]
fn test_layout_is_idempotent() {
    let node = CascadeNode::new();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::dropdown(node.content());
    relayout(&mut widget, &canvas);
    let open = value_box(&widget, 1);
    let mut sink = CascadeNode::new();
    click(&mut widget, open, &mut sink, &mut canvas);

    let first_fp = relayout(&mut widget, &canvas);
    let first = widget.as_dropdown().unwrap().geometry().to_vec();
    let second_fp = relayout(&mut widget, &canvas);
    assert_eq!(first_fp, second_fp);
    assert_eq!(
        widget.geometry(),
        Some(WidgetGeometry::Dropdown(first.as_slice()))
    );
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

fn slider_widget() -> NodeWidget {
    NodeWidget::slider(SliderWidget::new(
        SliderContent::new(0.0, 100.0, 50.0, 0).unwrap(),
    ))
}

fn handle(widget: &NodeWidget) -> Pos2 {
    widget.as_slider().unwrap().geometry().unwrap().handle.center()
}

#[test]
fn test_slider_drag_to_73_percent() {
    let mut node = ValueNode::default();
    let mut canvas = MockCanvas::new();
    let mut widget = slider_widget();
    relayout(&mut widget, &canvas);

    let geo = widget.as_slider().unwrap().geometry().unwrap().clone();
    let start = handle(&widget);
    let target_offset = 0.73 * geo.travel();
    let current_offset = geo.handle.min.x - geo.track.min.x;
    let to = start + Vec2::new(target_offset - current_offset, 0.0);

    widget.handle_event(&PointerEvent::down(start), &mut node, &mut canvas);
    widget.handle_event(&PointerEvent::moved(to), &mut node, &mut canvas);
    widget.handle_event(&PointerEvent::up(to), &mut node, &mut canvas);
    relayout(&mut widget, &canvas);

    assert_eq!(widget.as_slider().unwrap().value(), 73.0);
    assert_eq!(node.values.last(), Some(&73.0));
    assert!(canvas.cursors.contains(&CursorHint::DragHorizontal));
}

#[test]
fn test_slider_range_edit_repositions_handle() {
    let mut node = ValueNode::default();
    let mut canvas = MockCanvas::new();
    let mut widget = slider_widget();
    relayout(&mut widget, &canvas);
    let before = widget.as_slider().unwrap().geometry().unwrap().handle;

    canvas.editor_answer = RangeEditOutcome::Confirmed(SliderRange {
        min: 0.0,
        max: 10.0,
        value: 50.0,
        digits: 2,
    });
    let at = handle(&widget);
    widget.handle_event(&PointerEvent::double_click(at), &mut node, &mut canvas);
    relayout(&mut widget, &canvas);

    let slider = widget.as_slider().unwrap();
    assert_eq!(slider.value(), 5.0);
    assert_eq!(slider.content().formatted_value(), "5.00");
    assert_eq!(node.ranges, vec![(0.0, 10.0)]);
    assert_eq!(slider.geometry().unwrap().handle, before);
}

#[test]
fn test_slider_values_always_in_range_and_rounded() {
    let mut node = ValueNode::default();
    let mut canvas = MockCanvas::new();
    let mut widget = NodeWidget::slider(SliderWidget::new(
        SliderContent::new(-2.5, 7.25, 0.0, 2).unwrap(),
    ));
    relayout(&mut widget, &canvas);
    let start = handle(&widget);
    widget.handle_event(&PointerEvent::down(start), &mut node, &mut canvas);
    for i in 0..60 {
        let dx = (i as f32 * 7.3) % 200.0 - 100.0;
        widget.handle_event(
            &PointerEvent::moved(start + Vec2::new(dx, 0.0)),
            &mut node,
            &mut canvas,
        );
    }
    assert_eq!(node.values.len(), 60);
    for v in node.values {
        assert!((-2.5..=7.25).contains(&v));
        assert_eq!((v * 100.0).round() / 100.0, v);
    }
}
