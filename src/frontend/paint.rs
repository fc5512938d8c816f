//! Canvas rendering for a digitizing session
//!
//! Draws one frame from the session state alone: the chart image under the
//! current view transform, the calibrated axes, every marker series, the
//! Edit-mode selection outline, the snapped pointer preview and the controls
//! overlay. Nothing here mutates the session.

use crate::axes::{AxisCalibration, AxisCapture, AxisKind};
use crate::cursor::Mode;
use crate::session::Session;
use crate::types::{GlobalCoord, MarkerShape, ScreenPos};
use crate::view::ViewTransform;
use egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, TextureHandle, Vec2,
};

/// Canvas fill behind the chart image
const BACKGROUND: Color32 = Color32::from_rgb(190, 190, 190);
/// Marker opacity in Normal mode and for the selected series in Edit mode
const SERIES_ALPHA: u8 = 178;
/// Marker opacity for unselected series in Edit mode
const DIMMED_ALPHA: u8 = 77;
/// Opacity of the snapped pointer preview
const PREVIEW_ALPHA: u8 = 127;
/// Half-width of the triangle markers relative to the marker radius
const TRIANGLE_WIDTH_RATIO: f32 = 0.86603;
/// Degrees of hue spread across the series palette
const HUE_RANGE: f32 = 350.0;

const BANNER_HEIGHT: f32 = 22.0;
const OVERLAY_FONT_SIZE: f32 = 14.0;

/// Everything the canvas needs to draw one frame
pub struct CanvasContext<'a> {
    pub session: &'a Session,
    pub texture: Option<&'a TextureHandle>,
    /// Pointer position in window coordinates, when hovering the canvas
    pub pointer: Option<Pos2>,
    pub last_error: Option<&'a str>,
}

/// Render the full canvas into `rect`
pub fn render_canvas(painter: &Painter, rect: Rect, ctx: &CanvasContext<'_>) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let session = ctx.session;
    let view = session.view();
    let origin = rect.min;

    if let Some(texture) = ctx.texture {
        render_image(painter, origin, view, texture);
    }
    render_axes(painter, origin, view, session.axes());
    if let Some(capture) = session.cursor().capture() {
        render_rubber_band(painter, origin, view, capture, ctx.pointer);
    }
    render_series(painter, origin, view, session);
    if session.mode().is_normal() {
        if let Some(pointer) = ctx.pointer {
            render_pointer_preview(painter, origin, view, session, pointer);
        }
    }
    render_overlay(painter, rect, session, ctx.last_error);
}

/// Project a global coordinate into window coordinates
fn project(origin: Pos2, view: &ViewTransform, point: GlobalCoord) -> Pos2 {
    let pos = view.to_screen(point);
    origin + Vec2::new(pos.x as f32, pos.y as f32)
}

fn render_image(painter: &Painter, origin: Pos2, view: &ViewTransform, texture: &TextureHandle) {
    let min = project(origin, view, GlobalCoord::new(0.0, 0.0));
    let size = texture.size_vec2() * view.zoom() as f32;
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(texture.id(), Rect::from_min_size(min, size), uv, Color32::WHITE);
}

fn render_axes(painter: &Painter, origin: Pos2, view: &ViewTransform, axes: &AxisCalibration) {
    for kind in [AxisKind::Horizontal, AxisKind::Vertical] {
        let axis = axes.axis(kind);
        painter.line_segment(
            [
                project(origin, view, axis.start),
                project(origin, view, axis.end),
            ],
            Stroke::new(1.0, Color32::RED),
        );
    }
}

/// Rubber band from the pending capture point to the pointer, kept
/// axis-aligned the same way the committed axis will be
fn render_rubber_band(
    painter: &Painter,
    origin: Pos2,
    view: &ViewTransform,
    capture: &AxisCapture,
    pointer: Option<Pos2>,
) {
    if let (Some(start), Some(pointer)) = (capture.pending_start(), pointer) {
        let start_pos = project(origin, view, start);
        let end_pos = match capture.kind() {
            AxisKind::Horizontal => Pos2::new(pointer.x, start_pos.y),
            AxisKind::Vertical => Pos2::new(start_pos.x, pointer.y),
        };
        painter.line_segment([start_pos, end_pos], Stroke::new(1.0, Color32::RED));
    }
}

fn render_series(painter: &Painter, origin: Pos2, view: &ViewTransform, session: &Session) {
    let store = session.store();
    let count = store.len();
    let edit = session.mode().is_edit();
    let (selected_series, selected_marker) = session.cursor().selection();

    for (index, series) in store.all().iter().enumerate() {
        let alpha = if edit && index != selected_series {
            DIMMED_ALPHA
        } else {
            SERIES_ALPHA
        };
        let color = series_color(index, count, 0.9, 0.9, alpha);
        let radius = (series.marker_size() * view.zoom()) as f32;
        for marker in series.markers() {
            draw_marker(
                painter,
                series.marker_shape(),
                project(origin, view, *marker),
                radius,
                color,
                Stroke::NONE,
            );
        }
    }

    // Black outline around the selected marker in Edit mode.
    if edit {
        if let Some(series) = store.get(selected_series) {
            if let Some(marker) = series.markers().get(selected_marker) {
                let radius = ((series.marker_size() + 3.0) * view.zoom()) as f32;
                draw_marker(
                    painter,
                    series.marker_shape(),
                    project(origin, view, *marker),
                    radius,
                    Color32::TRANSPARENT,
                    Stroke::new(1.0, Color32::BLACK),
                );
            }
        }
    }
}

/// Ghost marker at the pointer, snapped to the global pixel grid
fn render_pointer_preview(
    painter: &Painter,
    origin: Pos2,
    view: &ViewTransform,
    session: &Session,
    pointer: Pos2,
) {
    if view.zoom() <= 0.0 {
        return;
    }
    let canvas = ScreenPos::new(
        (pointer.x - origin.x) as i32,
        (pointer.y - origin.y) as i32,
    );
    let snapped = view.to_screen(view.to_global(canvas));
    let center = origin + Vec2::new(snapped.x as f32, snapped.y as f32);

    let store = session.store();
    let series = store.working();
    let color = series_color(store.working_index(), store.len(), 1.0, 1.0, PREVIEW_ALPHA);
    let radius = (series.marker_size() * view.zoom()) as f32;
    draw_marker(painter, series.marker_shape(), center, radius, color, Stroke::NONE);
}

fn draw_marker(
    painter: &Painter,
    shape: MarkerShape,
    center: Pos2,
    radius: f32,
    fill: Color32,
    stroke: Stroke,
) {
    match shape {
        MarkerShape::Circle => {
            painter.circle(center, radius, fill, stroke);
        }
        MarkerShape::Square => {
            painter.rect(
                Rect::from_center_size(center, Vec2::splat(radius * 2.0)),
                0.0,
                fill,
                stroke,
                StrokeKind::Middle,
            );
        }
        MarkerShape::Rhombus => {
            let points = vec![
                Pos2::new(center.x, center.y - radius),
                Pos2::new(center.x + radius, center.y),
                Pos2::new(center.x, center.y + radius),
                Pos2::new(center.x - radius, center.y),
            ];
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
        MarkerShape::Triangle => {
            let half_width = radius * TRIANGLE_WIDTH_RATIO;
            let points = vec![
                Pos2::new(center.x, center.y - radius),
                Pos2::new(center.x + half_width, center.y + radius * 0.5),
                Pos2::new(center.x - half_width, center.y + radius * 0.5),
            ];
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
        MarkerShape::TriangleInverted => {
            let half_width = radius * TRIANGLE_WIDTH_RATIO;
            let points = vec![
                Pos2::new(center.x - half_width, center.y - radius * 0.5),
                Pos2::new(center.x + half_width, center.y - radius * 0.5),
                Pos2::new(center.x, center.y + radius),
            ];
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
    }
}

/// Mode banner along the bottom edge, help lines stacked above it
fn render_overlay(painter: &Painter, rect: Rect, session: &Session, last_error: Option<&str>) {
    let banner = Rect::from_min_max(
        Pos2::new(rect.left(), rect.bottom() - BANNER_HEIGHT),
        rect.max,
    );
    painter.rect_filled(banner, 0.0, Color32::from_gray(100));
    painter.text(
        Pos2::new(banner.left() + 6.0, banner.center().y),
        Align2::LEFT_CENTER,
        session.mode().display_name(),
        FontId::proportional(OVERLAY_FONT_SIZE),
        Color32::WHITE,
    );
    if let Some(error) = last_error {
        painter.text(
            Pos2::new(banner.right() - 6.0, banner.center().y),
            Align2::RIGHT_CENTER,
            error,
            FontId::proportional(OVERLAY_FONT_SIZE),
            Color32::RED,
        );
    }

    if !session.help_visible() {
        return;
    }
    let mut bottom = banner.top();
    for line in help_lines(session.mode()) {
        let galley = painter.layout_no_wrap(
            line.to_string(),
            FontId::proportional(OVERLAY_FONT_SIZE),
            Color32::BLACK,
        );
        let pos = Pos2::new(rect.left(), bottom - galley.rect.height());
        painter.rect_filled(
            Rect::from_min_size(pos, galley.rect.size()),
            0.0,
            Color32::from_rgba_unmultiplied(255, 255, 255, 200),
        );
        painter.galley(pos, galley, Color32::BLACK);
        bottom = pos.y;
    }
}

fn help_lines(mode: &Mode) -> &'static [&'static str] {
    match mode {
        Mode::Normal => &[
            "E: EDIT mode   M: marker shape   Mouse wheel: marker size   Left click: add marker   Right click: remove last marker",
            "CTRL+Wheel: zoom   Arrows: move view   SPACE: reset view   S: save session   C: compute and export data",
            "RETURN: add a new series   N: next series   P: previous series",
            "H: hide/show controls   X or Y: calibrate the X or Y axis",
        ],
        Mode::Edit => &[
            "ESCAPE: NORMAL mode   LEFT/RIGHT (+SHIFT): previous/next marker   UP/DOWN (+SHIFT): previous/next series",
            "HOME/END: first/last marker   SHIFT+HOME/END: first/last series",
            "WASD: move the marker   CTRL+Wheel: zoom",
            "DELETE: remove the marker   SHIFT+DELETE: remove the series",
            "H: hide/show controls",
        ],
        Mode::AxisCapture(_) => &[
            "Left click: place the first reference point, then the second",
            "Right click: discard the pending point",
        ],
    }
}

/// Palette color for a series, hues spread evenly over the store
fn series_color(index: usize, count: usize, saturation: f32, value: f32, alpha: u8) -> Color32 {
    let hue = index as f32 * HUE_RANGE / count as f32;
    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Convert HSV (hue 0-360, saturation 0-1, value 0-1) to RGB (u8, u8, u8)
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
