//! Layout engine: nested rectangles for each widget, stacked below the node's footprint.
//!
//! Every function here is pure over its inputs. Widgets re-run the whole layout on
//! every pass from the node's base footprint, so the same content and state always
//! give the same geometry.

use egui::{Align, Pos2, Rect, Vec2};

use crate::style::WidgetMetrics;
use crate::types::NodeFootprint;

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// Widen `footprint` to at least `min_width` and re-anchor its parameters.
///
/// The footprint grows symmetrically about its horizontal centre. Outputs move
/// right by half the added width and inputs move left by the same amount, pivot
/// and label box together, so every anchor keeps its offset from its edge.
/// Returns the added width.
pub fn fit_width(footprint: &mut NodeFootprint, min_width: f32) -> f32 {
    let bounds = footprint.bounds;
    let added = (min_width - bounds.width()).max(0.0);
    let half = added / 2.0;

    if added > 0.0 {
        footprint.bounds = Rect::from_min_size(
            Pos2::new(bounds.min.x - half, bounds.min.y),
            Vec2::new(bounds.width() + added, bounds.height()),
        );

        for output in &mut footprint.outputs {
            output.translate_x(half);
        }
        for input in &mut footprint.inputs {
            input.translate_x(-half);
        }
    }

    added
}

/// Divider and control rectangles of one stacked band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlBand {
    pub divider: Option<Rect>,
    pub control: Rect,
}

/// Stack a (captioned) control band of `height` below the footprint and grow it.
pub fn stack_control(
    footprint: &mut NodeFootprint,
    caption: &str,
    height: f32,
    metrics: &WidgetMetrics,
) -> ControlBand {
    let bounds = footprint.bounds;
    let s = metrics.spacing;

    let divider_height = if caption.is_empty() {
        0.0
    } else {
        metrics.divider_height
    };
    let divider = (!caption.is_empty()).then(|| {
        Rect::from_min_size(
            Pos2::new(bounds.min.x, bounds.max.y + s / 2.0),
            Vec2::new(bounds.width(), divider_height),
        )
    });

    let control = Rect::from_min_size(
        Pos2::new(bounds.min.x + 2.0 * s, bounds.max.y + divider_height + 2.0 * s),
        Vec2::new((bounds.width() - 2.0 - 4.0 * s).max(0.0), height),
    );

    footprint.bounds.max.y += divider_height + height + 4.0 * s;

    ControlBand { divider, control }
}

// ---------------------------------------------------------------------------
// Dropdown
// ---------------------------------------------------------------------------

/// Per-level input to the dropdown layout.
#[derive(Clone, Copy, Debug)]
pub struct LevelBand<'a> {
    pub caption: &'a str,
    pub option_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownLevelGeometry {
    pub divider: Option<Rect>,
    /// Border around the value box.
    pub border: Rect,
    /// Left part of the value box holding the selection text.
    pub text: Rect,
    /// Right part of the value box holding the arrow.
    pub arrow: Rect,
    /// Present while this level is open.
    pub overlay: Option<OverlayGeometry>,
}

/// Row list of an open dropdown level.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayGeometry {
    pub band: Rect,
    /// One entry per option, clipped to `band`; `None` when scrolled fully out.
    pub rows: Vec<Option<Rect>>,
    /// Scrollbar thumb, only when the options overflow the band.
    pub thumb: Option<Rect>,
    /// Current content scroll, in canvas units.
    pub content_offset: f32,
}

impl OverlayGeometry {
    /// Index of the visible row under `pos`.
    pub fn row_at(&self, pos: Pos2) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.is_some_and(|r| r.contains(pos)))
    }
}

/// Scroll arithmetic of an open dropdown level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the overlay band.
    pub visible_height: f32,
    /// Height of all rows together.
    pub content_height: f32,
    pub thumb_height: f32,
    /// Distance the thumb can travel inside the band.
    pub travel: f32,
}

impl ScrollMetrics {
    pub fn new(option_count: usize, metrics: &WidgetMetrics) -> Self {
        let row = metrics.dropdown_height;
        let visible_height = option_count.min(metrics.visible_rows) as f32 * row;
        let content_height = option_count as f32 * row;
        let thumb_height = if option_count > metrics.visible_rows {
            (visible_height * metrics.visible_rows as f32 / option_count as f32).max(2.0 * row)
        } else {
            visible_height
        };
        Self {
            visible_height,
            content_height,
            thumb_height,
            travel: (visible_height - thumb_height).max(0.0),
        }
    }

    pub fn scrollable(&self) -> bool {
        self.content_height > self.visible_height
    }

    pub fn max_content_offset(&self) -> f32 {
        (self.content_height - self.visible_height).max(0.0)
    }

    pub fn clamp_thumb(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.travel)
    }

    /// Content scroll matching a thumb offset.
    pub fn content_offset(&self, thumb_offset: f32) -> f32 {
        if self.travel <= 0.0 {
            return 0.0;
        }
        self.clamp_thumb(thumb_offset) / self.travel * self.max_content_offset()
    }
}

/// Clip `row` to `band`: partially visible rows are truncated, hidden ones dropped.
pub fn clip_to_band(row: Rect, band: Rect) -> Option<Rect> {
    if row.max.y <= band.min.y || row.min.y >= band.max.y {
        return None;
    }
    Some(Rect::from_x_y_ranges(
        row.x_range(),
        row.min.y.max(band.min.y)..=row.max.y.min(band.max.y),
    ))
}

/// Lay out every dropdown level below the footprint, with an overlay for the open one.
pub fn layout_dropdown(
    footprint: &mut NodeFootprint,
    levels: &[LevelBand<'_>],
    open: Option<usize>,
    thumb_offset: f32,
    metrics: &WidgetMetrics,
) -> Vec<DropdownLevelGeometry> {
    let s = metrics.spacing;
    let h = metrics.dropdown_height;

    levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let band = stack_control(footprint, level.caption, h, metrics);
            let border = band.control;
            let text = Rect::from_min_size(border.min, Vec2::new((border.width() - h).max(0.0), h));
            let arrow = Rect::from_min_size(
                Pos2::new(border.max.x - h, border.min.y),
                Vec2::new(h.min(border.width()), h),
            );

            let overlay = (open == Some(i)).then(|| {
                let overlay = layout_overlay(border, level.option_count, thumb_offset, metrics);
                footprint.bounds.max.y += overlay.band.height() + s;
                overlay
            });

            DropdownLevelGeometry {
                divider: band.divider,
                border,
                text,
                arrow,
                overlay,
            }
        })
        .collect()
}

fn layout_overlay(
    border: Rect,
    option_count: usize,
    thumb_offset: f32,
    metrics: &WidgetMetrics,
) -> OverlayGeometry {
    let h = metrics.dropdown_height;
    let scroll = ScrollMetrics::new(option_count, metrics);
    let band = Rect::from_min_size(
        Pos2::new(border.min.x, border.max.y + metrics.spacing),
        Vec2::new(border.width(), scroll.visible_height),
    );

    let thumb = scroll.scrollable().then(|| {
        Rect::from_min_size(
            Pos2::new(
                band.max.x - metrics.scrollbar_width,
                band.min.y + scroll.clamp_thumb(thumb_offset),
            ),
            Vec2::new(metrics.scrollbar_width, scroll.thumb_height),
        )
    });

    let content_offset = scroll.content_offset(thumb_offset);
    let rows = (0..option_count)
        .map(|j| {
            let row = Rect::from_min_size(
                Pos2::new(band.min.x, band.min.y + j as f32 * h - content_offset),
                Vec2::new(band.width(), h),
            );
            clip_to_band(row, band)
        })
        .collect();

    OverlayGeometry {
        band,
        rows,
        thumb,
        content_offset,
    }
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct SliderGeometry {
    pub divider: Option<Rect>,
    pub track: Rect,
    pub handle: Rect,
    /// Room for the value text, on the wider side of the handle.
    pub value_text: Rect,
    /// Horizontal alignment of the value text inside `value_text`.
    pub value_align: Align,
}

impl SliderGeometry {
    /// Distance the handle can travel along the track.
    pub fn travel(&self) -> f32 {
        (self.track.width() - self.handle.width()).max(0.0)
    }
}

/// Lay out the slider with its handle at `fraction` (0..=1) of the track.
pub fn layout_slider(
    footprint: &mut NodeFootprint,
    caption: &str,
    fraction: f32,
    metrics: &WidgetMetrics,
) -> SliderGeometry {
    let band = stack_control(footprint, caption, metrics.slider_height, metrics);
    let track = band.control;
    let size = metrics.handle_size;
    let travel = (track.width() - size).max(0.0);

    let handle = Rect::from_min_size(
        Pos2::new(
            track.min.x + fraction.clamp(0.0, 1.0) * travel,
            track.center().y - size / 2.0,
        ),
        Vec2::splat(size),
    );

    let (value_text, value_align) = if fraction < 0.5 {
        (
            Rect::from_x_y_ranges(handle.max.x..=track.max.x, track.y_range()),
            Align::Min,
        )
    } else {
        (
            Rect::from_x_y_ranges(track.min.x..=handle.min.x, track.y_range()),
            Align::Max,
        )
    };

    SliderGeometry {
        divider: band.divider,
        track,
        handle,
        value_text,
        value_align,
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonGeometry {
    pub divider: Option<Rect>,
    pub button: Rect,
}

pub fn layout_button(
    footprint: &mut NodeFootprint,
    caption: &str,
    metrics: &WidgetMetrics,
) -> ButtonGeometry {
    let band = stack_control(footprint, caption, metrics.button_height, metrics);
    ButtonGeometry {
        divider: band.divider,
        button: band.control,
    }
}

/// Latest geometry of a widget, by kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WidgetGeometry<'a> {
    Dropdown(&'a [DropdownLevelGeometry]),
    Slider(&'a SliderGeometry),
    Button(&'a ButtonGeometry),
}
