//! Interactive widgets drawn inside the nodes of an egui node-graph canvas.
//!
//! A [`NodeWidget`] adds a cascading dropdown, a draggable slider or a push button
//! below a node. Hosts describe the node's footprint, forward pointer events in
//! canvas coordinates, and implement [`NodeHost`] and [`CanvasHost`] to receive
//! callbacks. Rendering produces a [`DrawList`] that [`paint::paint_draw_list`]
//! paints onto an `egui::Painter`.

pub mod error;
pub mod layout;
pub mod paint;
pub mod render;
pub mod style;
pub mod text;
pub mod traits;
pub mod types;
pub mod widgets;

#[cfg(test)]
mod test_support;

pub use error::WidgetError;
pub use layout::WidgetGeometry;
pub use render::{DrawCommand, DrawList};
pub use style::{DEFAULT_STYLE, WidgetMetrics, WidgetStyle};
pub use text::FontSpec;
pub use traits::{CanvasHost, NodeHost, TextMeasure};
pub use types::*;
pub use widgets::{
    ButtonWidget, DropdownContent, DropdownLevel, DropdownWidget, NodeWidget, SliderContent,
    SliderWidget, WidgetContent,
};
