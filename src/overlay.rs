//! Overlay surface geometry and what to draw on it.
//!
//! The surface has a fixed logical size (400×400 by default) but
//! may be displayed stretched to fill the preview. Pointer positions are
//! translated against the displayed rectangle and rescaled into surface
//! pixels before they reach the controller.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::data::point::Point2D;

pub const MARKER_RADIUS: f32 = 5.0;
pub const MARKER_COLOR: Color32 = Color32::BLUE;
pub const LINE_WIDTH: f32 = 2.0;
pub const LINE_COLOR: Color32 = Color32::RED;

/// Placement of the overlay surface on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    /// Where the surface is displayed, in screen points.
    pub screen_rect: Rect,
    /// Logical surface size, in surface pixels.
    pub surface_size: Vec2,
}

impl OverlayGeometry {
    pub fn new(screen_rect: Rect, surface_size: Vec2) -> Self {
        Self {
            screen_rect,
            surface_size,
        }
    }

    fn ratio(&self) -> Vec2 {
        let size = self.screen_rect.size();
        Vec2::new(
            if size.x > 0.0 { self.surface_size.x / size.x } else { 1.0 },
            if size.y > 0.0 { self.surface_size.y / size.y } else { 1.0 },
        )
    }

    /// Screen position to surface pixels. `None` outside the displayed rect.
    pub fn to_local(&self, screen_pos: Pos2) -> Option<Point2D> {
        if !self.screen_rect.contains(screen_pos) {
            return None;
        }
        let rel = screen_pos - self.screen_rect.min;
        let r = self.ratio();
        Some(Point2D::new((rel.x * r.x) as f64, (rel.y * r.y) as f64))
    }

    /// Surface pixels back to a screen position.
    pub fn to_screen(&self, p: Point2D) -> Pos2 {
        let r = self.ratio();
        self.screen_rect.min + Vec2::new(p.x as f32 / r.x, p.y as f32 / r.y)
    }
}

/// A primitive drawn on the overlay, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayShape {
    Marker {
        center: Point2D,
        radius: f32,
        color: Color32,
    },
    Line {
        from: Point2D,
        to: Point2D,
        width: f32,
        color: Color32,
    },
}

/// Shapes for the current session: a marker while one point is pending,
/// otherwise the line of the last completed measurement.
pub fn overlay_shapes(
    pending: Option<Point2D>,
    last_pair: Option<(Point2D, Point2D)>,
) -> Vec<OverlayShape> {
    if let Some(center) = pending {
        return vec![OverlayShape::Marker {
            center,
            radius: MARKER_RADIUS,
            color: MARKER_COLOR,
        }];
    }
    match last_pair {
        Some((from, to)) => vec![OverlayShape::Line {
            from,
            to,
            width: LINE_WIDTH,
            color: LINE_COLOR,
        }],
        None => Vec::new(),
    }
}

/// Paint `shapes` into `painter` using `geom` for placement.
pub fn paint_shapes(painter: &egui::Painter, geom: &OverlayGeometry, shapes: &[OverlayShape]) {
    for shape in shapes {
        match *shape {
            OverlayShape::Marker {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(geom.to_screen(center), radius, color);
            }
            OverlayShape::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment(
                    [geom.to_screen(from), geom.to_screen(to)],
                    egui::Stroke::new(width, color),
                );
            }
        }
    }
}
