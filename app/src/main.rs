use eframe::egui;

mod app;
mod canvas;
mod config;
mod nodes;
mod widgets;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = config::load_config();
    eframe::run_native(
        "Node Widgets Demo",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
            ..Default::default()
        },
        Box::new(|cc| Ok(Box::new(app::WidgetDemoApp::new(cc, config)))),
    )
}
