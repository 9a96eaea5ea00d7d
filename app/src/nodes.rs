//! Demo owning nodes: each holds its domain state and answers its widget's callbacks.

use egui::{Pos2, Rect, Vec2};
use egui_node_widgets::{
    ButtonWidget, DEFAULT_STYLE, DropdownContent, DropdownLevel, NodeFootprint, NodeHost,
    NodeWidget, ParamAnchor, SliderContent, SliderWidget, WidgetError,
};
use log::{debug, info};
use uuid::Uuid;

use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Cascading dropdown
// ---------------------------------------------------------------------------

const TOP_LEVEL: [&str; 4] = ["ListA", "ListB", "ListC", "ListD"];

/// Item count of the second-level list behind each top-level entry.
const ITEM_COUNTS: [(char, usize); 4] = [('A', 13), ('B', 9), ('C', 16), ('D', 6)];

fn items_for(list: usize) -> Vec<String> {
    let (letter, count) = ITEM_COUNTS[list.min(ITEM_COUNTS.len() - 1)];
    (1..=count).map(|i| format!("Item {letter}{i}")).collect()
}

/// Two-level cascade: the second list depends on the first selection.
#[derive(Debug, Default)]
pub struct CascadeModel {
    list: usize,
    item: usize,
    /// Last item picked at the second level.
    pub output: Option<String>,
    /// Undo checkpoints requested by the widget, newest last.
    pub checkpoints: Vec<String>,
    content_stale: bool,
}

impl CascadeModel {
    pub fn content(&self) -> Result<DropdownContent, WidgetError> {
        let items = items_for(self.list);
        let item = items.get(self.item).cloned().unwrap_or_default();
        DropdownContent::new(vec![
            DropdownLevel::new(TOP_LEVEL)
                .with_caption("TopLevel List")
                .with_selection(TOP_LEVEL[self.list]),
            DropdownLevel::new(items)
                .with_caption("Level2 Items")
                .with_selection(item),
        ])
    }

    /// Fresh content after a selection changed the option lists.
    pub fn take_refreshed_content(&mut self) -> Option<Result<DropdownContent, WidgetError>> {
        std::mem::take(&mut self.content_stale).then(|| self.content())
    }
}

impl NodeHost for CascadeModel {
    fn selection_changed(&mut self, level: usize, option: usize) {
        match level {
            0 => {
                self.list = option.min(TOP_LEVEL.len() - 1);
                self.item = 0;
            }
            _ => {
                self.item = option;
                let item = items_for(self.list).get(option).cloned();
                if let Some(item) = &item {
                    info!("You selected: {}", item);
                }
                self.output = item;
            }
        }
        self.content_stale = true;
    }

    fn request_recompute(&mut self) {
        debug!("Cascade node: recompute");
    }

    fn request_undo_checkpoint(&mut self, label: &str) {
        self.checkpoints.push(label.to_owned());
    }
}

// ---------------------------------------------------------------------------
// Slider / button
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SliderModel {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SliderModel {
    fn default() -> Self {
        Self {
            value: 50.0,
            min: 0.0,
            max: 100.0,
        }
    }
}

impl NodeHost for SliderModel {
    fn value_changed(&mut self, value: f64) {
        self.value = value;
    }

    fn range_changed(&mut self, min: f64, max: f64) {
        info!("Slider range set to [{}, {}]", min, max);
        self.min = min;
        self.max = max;
    }

    fn request_recompute(&mut self) {}

    fn request_undo_checkpoint(&mut self, _label: &str) {}
}

#[derive(Debug, Default)]
pub struct ButtonModel {
    pub clicks: u32,
}

impl NodeHost for ButtonModel {
    fn clicked(&mut self) {
        self.clicks += 1;
        info!("Button clicked {} times", self.clicks);
    }

    fn request_recompute(&mut self) {}

    fn request_undo_checkpoint(&mut self, _label: &str) {}
}

// ---------------------------------------------------------------------------
// DemoNode
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum NodeModel {
    Cascade(CascadeModel),
    Slider(SliderModel),
    Button(ButtonModel),
}

impl NodeModel {
    fn host(&mut self) -> &mut dyn NodeHost {
        match self {
            NodeModel::Cascade(m) => m,
            NodeModel::Slider(m) => m,
            NodeModel::Button(m) => m,
        }
    }

    /// Text shown for the node's output parameter.
    pub fn output_text(&self) -> String {
        match self {
            NodeModel::Cascade(m) => m.output.clone().unwrap_or_else(|| "-".to_owned()),
            NodeModel::Slider(m) => format!("{}", m.value),
            NodeModel::Button(m) => m.clicks.to_string(),
        }
    }
}

impl NodeHost for NodeModel {
    fn selection_changed(&mut self, level: usize, option: usize) {
        self.host().selection_changed(level, option);
    }

    fn value_changed(&mut self, value: f64) {
        self.host().value_changed(value);
    }

    fn range_changed(&mut self, min: f64, max: f64) {
        self.host().range_changed(min, max);
    }

    fn clicked(&mut self) {
        self.host().clicked();
    }

    fn request_recompute(&mut self) {
        self.host().request_recompute();
    }

    fn request_undo_checkpoint(&mut self, label: &str) {
        self.host().request_undo_checkpoint(label);
    }
}

/// Height of one parameter row in the node body.
const PARAM_ROW: f32 = 14.0;
/// Height of the title strip.
const TITLE_HEIGHT: f32 = 16.0;

pub struct DemoNode {
    pub id: Uuid,
    pub title: String,
    /// Top-left corner of the base body, in canvas units.
    pub origin: Pos2,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub model: NodeModel,
    pub widget: NodeWidget,
    /// Footprint after the last layout pass.
    pub footprint: NodeFootprint,
}

impl DemoNode {
    fn new(
        title: &str,
        origin: Pos2,
        inputs: &[&str],
        outputs: &[&str],
        model: NodeModel,
        widget: NodeWidget,
    ) -> Self {
        let mut node = Self {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            origin,
            inputs: inputs.iter().map(|s| (*s).to_owned()).collect(),
            outputs: outputs.iter().map(|s| (*s).to_owned()).collect(),
            model,
            widget,
            footprint: NodeFootprint::new(Rect::NOTHING),
        };
        node.footprint = node.base_footprint();
        node
    }

    pub fn cascade(origin: Pos2) -> Result<Self, WidgetError> {
        let model = CascadeModel::default();
        let widget = NodeWidget::dropdown(model.content()?);
        Ok(Self::new(
            "DropDown",
            origin,
            &["Input1"],
            &["Output1"],
            NodeModel::Cascade(model),
            widget,
        ))
    }

    pub fn slider(origin: Pos2) -> Result<Self, WidgetError> {
        let model = SliderModel::default();
        let content = SliderContent::new(model.min, model.max, model.value, 0)?;
        let widget = NodeWidget::slider(SliderWidget::new(content).with_caption("Opt description"));
        Ok(Self::new(
            "Slider",
            origin,
            &["Input1"],
            &["Output1"],
            NodeModel::Slider(model),
            widget,
        ))
    }

    pub fn button(origin: Pos2) -> Self {
        Self::new(
            "Button",
            origin,
            &[],
            &["Clicks"],
            NodeModel::Button(ButtonModel::default()),
            NodeWidget::button(ButtonWidget::new("Click me").with_caption("Action")),
        )
    }

    /// Apply the configured widget style and metrics.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if config.style != DEFAULT_STYLE {
            self.widget = self.widget.with_style(config.style.clone());
        }
        self.widget = self.widget.with_metrics(config.metrics);
        self
    }

    /// Body and parameter anchors before any widget is attached.
    ///
    /// Inputs sit on the left edge with their labels inside the body; outputs
    /// mirror them on the right.
    pub fn base_footprint(&self) -> NodeFootprint {
        let rows = self.inputs.len().max(self.outputs.len()).max(1) as f32;
        let size = Vec2::new(60.0, TITLE_HEIGHT + rows * PARAM_ROW);
        let mut footprint = NodeFootprint::new(Rect::from_min_size(self.origin, size));
        let label = Vec2::new(28.0, PARAM_ROW);

        for i in 0..self.inputs.len() {
            let y = self.origin.y + TITLE_HEIGHT + i as f32 * PARAM_ROW;
            let bounds = Rect::from_min_size(Pos2::new(self.origin.x, y), label);
            footprint = footprint.with_input(ParamAnchor::new(bounds.left_center(), bounds));
        }
        for i in 0..self.outputs.len() {
            let y = self.origin.y + TITLE_HEIGHT + i as f32 * PARAM_ROW;
            let bounds =
                Rect::from_min_size(Pos2::new(self.origin.x + size.x - label.x, y), label);
            footprint = footprint.with_output(ParamAnchor::new(bounds.right_center(), bounds));
        }
        footprint
    }

    /// Pull fresh dropdown content from the model after a cascading selection.
    pub fn sync_content(&mut self) {
        let NodeModel::Cascade(model) = &mut self.model else {
            return;
        };
        match model.take_refreshed_content() {
            Some(Ok(content)) => self.widget.set_dropdown_content(content),
            Some(Err(e)) => log::warn!("Cascade node: {}", e),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Domain: Remap ──

    #[test]
    fn remap_lists_have_source_lengths() {
        assert_eq!(items_for(0).len(), 13);
        assert_eq!(items_for(1).len(), 9);
        assert_eq!(items_for(2).len(), 16);
        assert_eq!(items_for(3).len(), 6);
        assert_eq!(items_for(2)[15], "Item C16");
    }

    #[test]
    fn initial_content_selects_first_entries() {
        let model = CascadeModel::default();
        let content = model.content().unwrap();
        assert_eq!(content.levels()[0].display_text(), "ListA");
        assert_eq!(content.levels()[1].display_text(), "Item A1");
        assert_eq!(content.levels()[1].caption(), "Level2 Items");
    }

    #[test]
    fn top_level_pick_swaps_second_list() {
        let mut model = CascadeModel::default();
        model.selection_changed(0, 2);
        let content = model.take_refreshed_content().unwrap().unwrap();
        assert_eq!(content.levels()[1].options().len(), 16);
        assert_eq!(content.levels()[1].display_text(), "Item C1");
        assert!(model.take_refreshed_content().is_none());
        assert_eq!(model.output, None);
    }

    #[test]
    fn second_level_pick_sets_output() {
        let mut model = CascadeModel::default();
        model.selection_changed(0, 1);
        model.selection_changed(1, 4);
        assert_eq!(model.output.as_deref(), Some("Item B5"));
        let content = model.take_refreshed_content().unwrap().unwrap();
        assert_eq!(content.levels()[1].display_text(), "Item B5");
    }

    // ── Domain: Slider / Button ──

    #[test]
    fn slider_model_tracks_callbacks() {
        let mut model = NodeModel::Slider(SliderModel::default());
        model.value_changed(73.0);
        model.range_changed(0.0, 10.0);
        let NodeModel::Slider(slider) = &model else {
            unreachable!()
        };
        assert_eq!((slider.value, slider.min, slider.max), (73.0, 0.0, 10.0));
        assert_eq!(model.output_text(), "73");
    }

    #[test]
    fn button_model_counts_clicks() {
        let mut model = NodeModel::Button(ButtonModel::default());
        model.clicked();
        model.clicked();
        assert_eq!(model.output_text(), "2");
    }

    // ── Domain: Footprint ──

    #[test]
    fn config_style_is_applied_to_the_widget() {
        let mut config = AppConfig::default();
        config.metrics.visible_rows = 4;
        let node = DemoNode::button(Pos2::ZERO).with_config(&config);
        assert_eq!(node.widget.metrics().visible_rows, 4);
        assert_eq!(*node.widget.style(), DEFAULT_STYLE);
    }

    #[test]
    fn base_footprint_places_anchors_on_the_edges() {
        let node = DemoNode::button(Pos2::new(10.0, 20.0));
        let fp = node.base_footprint();
        assert!(fp.inputs.is_empty());
        assert_eq!(fp.outputs.len(), 1);
        assert_eq!(fp.outputs[0].pivot.x, fp.bounds.max.x);
        assert_eq!(fp.bounds.min, Pos2::new(10.0, 20.0));
    }
}
