//! Modal editor for a slider's minimum, maximum, value and digits.

use eframe::egui::{self, Color32, Context, Id, Key, Order};
use egui_node_widgets::widgets::slider::MAX_DIGITS;
use egui_node_widgets::{RangeEditOutcome, SliderRange};

pub struct RangeEditor {
    /// Index of the node whose slider opened the editor.
    node: usize,
    draft: SliderRange,
}

impl RangeEditor {
    pub fn new(node: usize, current: SliderRange) -> Self {
        Self {
            node,
            draft: current,
        }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    /// Draw the editor over a blocking backdrop. Returns the outcome once the
    /// user confirms or cancels.
    #[allow(deprecated)]
    pub fn show(&mut self, ctx: &Context) -> Option<RangeEditOutcome> {
        let id = Id::new("slider_range_editor");

        egui::Area::new(id.with("backdrop"))
            .interactable(true)
            .fixed_pos(egui::pos2(0.0, 0.0))
            .order(Order::Middle)
            .show(ctx, |ui| {
                let screen_rect = ctx.input(|i| i.screen_rect());
                ui.allocate_rect(screen_rect, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(100));
            });

        let mut outcome = None;
        let speed = 10f64.powi(-(self.draft.digits as i32)).max(0.001);
        egui::Window::new("Slider range")
            .id(id)
            .resizable(false)
            .collapsible(false)
            .order(Order::Foreground)
            .default_pos(ctx.input(|i| i.screen_rect()).center())
            .show(ctx, |ui| {
                egui::Grid::new(id.with("fields"))
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Minimum");
                        ui.add(egui::DragValue::new(&mut self.draft.min).speed(speed));
                        ui.end_row();
                        ui.label("Maximum");
                        ui.add(egui::DragValue::new(&mut self.draft.max).speed(speed));
                        ui.end_row();
                        ui.label("Value");
                        ui.add(egui::DragValue::new(&mut self.draft.value).speed(speed));
                        ui.end_row();
                        ui.label("Digits");
                        ui.add(egui::DragValue::new(&mut self.draft.digits).range(0..=MAX_DIGITS));
                        ui.end_row();
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        outcome = Some(RangeEditOutcome::Confirmed(self.draft));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(RangeEditOutcome::Cancelled);
                    }
                });
            });

        if outcome.is_none() && ctx.input(|i| i.key_pressed(Key::Escape)) {
            outcome = Some(RangeEditOutcome::Cancelled);
        }
        outcome
    }
}
