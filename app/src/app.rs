use eframe::egui::{self, Pos2, Visuals};
use log::error;

use crate::canvas::NodeCanvas;
use crate::config::AppConfig;
use crate::nodes::{DemoNode, NodeModel};

pub struct WidgetDemoApp {
    pub canvas: NodeCanvas,
}

impl WidgetDemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let mut nodes = Vec::new();
        match DemoNode::cascade(Pos2::new(0.0, 0.0)) {
            Ok(node) => nodes.push(node.with_config(&config)),
            Err(e) => error!("Failed to build the dropdown node: {}", e),
        }
        match DemoNode::slider(Pos2::new(140.0, 0.0)) {
            Ok(node) => nodes.push(node.with_config(&config)),
            Err(e) => error!("Failed to build the slider node: {}", e),
        }
        nodes.push(DemoNode::button(Pos2::new(280.0, 0.0)).with_config(&config));

        Self {
            canvas: NodeCanvas::new(nodes, &config),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("outputs_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.heading("Outputs");
                ui.separator();
                for node in &self.canvas.nodes {
                    ui.label(format!("{}: {}", node.title, node.model.output_text()));
                }

                let checkpoints = self.canvas.nodes.iter().find_map(|node| match &node.model {
                    NodeModel::Cascade(model) => Some(&model.checkpoints),
                    _ => None,
                });
                if let Some(checkpoints) = checkpoints.filter(|c| !c.is_empty()) {
                    ui.separator();
                    ui.label("Undo checkpoints");
                    for label in checkpoints.iter().rev() {
                        ui.small(label.as_str());
                    }
                }

                if self.canvas.range_editor_open() {
                    ui.separator();
                    ui.label("Editing slider range");
                }

                ui.separator();
                ui.label(format!("Zoom: {:.0}%", self.canvas.zoom() * 100.0));
                if ui.button("Reset view").clicked() {
                    self.canvas.reset_view();
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas.show(ui));
    }
}

impl eframe::App for WidgetDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
