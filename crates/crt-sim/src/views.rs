//! Screen-space geometry for the three orthogonal viewpoints.
//!
//! The front view looks down the tube at the phosphor screen. The side view
//! shows the vertical plates and is driven by `y`; the top view shows the
//! horizontal plates and is driven by `x`. Coordinates are canvas pixels
//! with `y` growing downwards.

use crt_core::{BeamPosition, Line, QuadraticBezierCurve};
use glam::DVec2;

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size * 0.5
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.size.x
            && p.y <= self.origin.y + self.size.y
    }
}

/// Looking straight at the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontView {
    pub width: f64,
    pub height: f64,
    pub max_deflection: f64,
}

impl FrontView {
    const FRAME_HALF_WIDTH: f64 = 0.95;
    const FRAME_HALF_HEIGHT: f64 = 0.75;

    pub fn new(width: f64, height: f64, max_deflection: f64) -> Self {
        Self { width, height, max_deflection }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn scale(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Map a beam position onto canvas pixels. Full deflection lands one
    /// `scale` away from the centre.
    pub fn project(&self, position: BeamPosition) -> DVec2 {
        let c = self.center();
        let k = self.scale() / self.max_deflection;
        DVec2::new(c.x + position.x * k, c.y - position.y * k)
    }

    /// The outline of the phosphor screen.
    pub fn screen_frame(&self) -> Rect {
        let c = self.center();
        let s = self.scale();
        Rect::new(
            c.x - s * Self::FRAME_HALF_WIDTH,
            c.y - s * Self::FRAME_HALF_HEIGHT,
            s * Self::FRAME_HALF_WIDTH * 2.0,
            s * Self::FRAME_HALF_HEIGHT * 2.0,
        )
    }
}

/// Which pair of plates a lateral view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateAxis {
    /// Side view, deflected by `y`.
    Vertical,
    /// Top view, deflected by `x`.
    Horizontal,
}

impl PlateAxis {
    pub fn component(&self, position: BeamPosition) -> f64 {
        match self {
            PlateAxis::Vertical => position.y,
            PlateAxis::Horizontal => position.x,
        }
    }
}

/// The beam from gun to screen, as two quadratic segments meeting between
/// the plates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamPath {
    pub to_plates: QuadraticBezierCurve,
    pub to_screen: QuadraticBezierCurve,
}

/// Cross-section of the tube seen from the side or from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralView {
    pub width: f64,
    pub height: f64,
    pub axis: PlateAxis,
    pub max_deflection: f64,
}

impl LateralView {
    const GUN_X: f64 = 20.0;
    const GUN_WIDTH: f64 = 40.0;
    const GUN_HEIGHT: f64 = 20.0;
    const BEAM_CONTROL_X: f64 = 100.0;
    const PLATES_X: f64 = 150.0;
    const PLATE_SIZE: f64 = 30.0;
    const PLATE_GAP: f64 = 10.0;
    const SCREEN_INSET: f64 = 50.0;
    /// Distance past the plates of the control point that bends the beam.
    const BEAM_BEND_OFFSET: f64 = 50.0;
    const SCREEN_MARGIN: f64 = 20.0;

    pub fn new(width: f64, height: f64, axis: PlateAxis, max_deflection: f64) -> Self {
        Self { width, height, axis, max_deflection }
    }

    pub fn side(width: f64, height: f64, max_deflection: f64) -> Self {
        Self::new(width, height, PlateAxis::Vertical, max_deflection)
    }

    pub fn top(width: f64, height: f64, max_deflection: f64) -> Self {
        Self::new(width, height, PlateAxis::Horizontal, max_deflection)
    }

    fn mid_y(&self) -> f64 {
        self.height / 2.0
    }

    fn screen_x(&self) -> f64 {
        self.width - Self::SCREEN_INSET
    }

    /// Pixel offset of the spot from the axis, positive upwards.
    pub fn deflection(&self, position: BeamPosition) -> f64 {
        let scale = self.height / 2.0;
        self.axis.component(position) * scale / self.max_deflection
    }

    pub fn gun(&self) -> Rect {
        Rect::new(
            Self::GUN_X,
            self.mid_y() - Self::GUN_HEIGHT / 2.0,
            Self::GUN_WIDTH,
            Self::GUN_HEIGHT,
        )
    }

    /// Upper and lower deflection plates.
    pub fn plates(&self) -> [Rect; 2] {
        let y = self.mid_y();
        [
            Rect::new(
                Self::PLATES_X,
                y - Self::PLATE_GAP - Self::PLATE_SIZE,
                Self::PLATE_SIZE,
                Self::PLATE_SIZE,
            ),
            Rect::new(
                Self::PLATES_X,
                y + Self::PLATE_GAP,
                Self::PLATE_SIZE,
                Self::PLATE_SIZE,
            ),
        ]
    }

    pub fn center_line(&self) -> Line {
        Line::new(DVec2::new(0.0, self.mid_y()), DVec2::new(self.width, self.mid_y()))
    }

    pub fn screen(&self) -> Line {
        Line::new(
            DVec2::new(self.screen_x(), Self::SCREEN_MARGIN),
            DVec2::new(self.screen_x(), self.height - Self::SCREEN_MARGIN),
        )
    }

    pub fn beam_path(&self, position: BeamPosition) -> BeamPath {
        let y = self.mid_y();
        let gun_exit = DVec2::new(Self::GUN_X + Self::GUN_WIDTH, y);
        let between_plates = DVec2::new(Self::PLATES_X + Self::PLATE_SIZE / 2.0, y);
        BeamPath {
            to_plates: QuadraticBezierCurve::new(
                gun_exit,
                DVec2::new(Self::BEAM_CONTROL_X, y),
                between_plates,
            ),
            to_screen: QuadraticBezierCurve::new(
                between_plates,
                DVec2::new(Self::PLATES_X + Self::BEAM_BEND_OFFSET, y),
                self.spot(position),
            ),
        }
    }

    /// Where the beam meets the screen.
    pub fn spot(&self, position: BeamPosition) -> DVec2 {
        DVec2::new(self.screen_x(), self.mid_y() - self.deflection(position))
    }
}

/// The three viewpoints of one frame, sized by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoints {
    pub front: FrontView,
    pub side: LateralView,
    pub top: LateralView,
}

/// Projected beam for all three views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedBeam {
    pub front_spot: DVec2,
    pub side_path: BeamPath,
    pub top_path: BeamPath,
}

impl Viewpoints {
    pub fn new(front: DVec2, lateral: DVec2, max_deflection: f64) -> Self {
        Self {
            front: FrontView::new(front.x, front.y, max_deflection),
            side: LateralView::side(lateral.x, lateral.y, max_deflection),
            top: LateralView::top(lateral.x, lateral.y, max_deflection),
        }
    }

    pub fn project(&self, position: BeamPosition) -> ProjectedBeam {
        ProjectedBeam {
            front_spot: self.front.project(position),
            side_path: self.side.beam_path(position),
            top_path: self.top.beam_path(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crt_core::Shape;

    #[test]
    fn test_front_center_maps_to_canvas_center() {
        let view = FrontView::new(400.0, 300.0, 0.15);
        assert_eq!(view.project(BeamPosition::CENTER), DVec2::new(200.0, 150.0));
    }

    #[test]
    fn test_front_full_deflection_reaches_scale() {
        let view = FrontView::new(400.0, 300.0, 0.15);
        let p = view.project(BeamPosition::new(0.15, 0.075));
        assert!((p.x - 350.0).abs() < 1e-9);
        assert!((p.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_front_frame() {
        let view = FrontView::new(400.0, 400.0, 0.15);
        let frame = view.screen_frame();
        assert!((frame.origin.x - 10.0).abs() < 1e-9);
        assert!((frame.origin.y - 50.0).abs() < 1e-9);
        assert!((frame.size.x - 380.0).abs() < 1e-9);
        assert!((frame.size.y - 300.0).abs() < 1e-9);
        assert!(frame.contains(view.project(BeamPosition::new(0.1, -0.1))));
    }

    #[test]
    fn test_lateral_geometry() {
        let view = LateralView::side(400.0, 200.0, 0.15);
        assert_eq!(view.gun(), Rect::new(20.0, 90.0, 40.0, 20.0));
        let [upper, lower] = view.plates();
        assert_eq!(upper, Rect::new(150.0, 60.0, 30.0, 30.0));
        assert_eq!(lower, Rect::new(150.0, 110.0, 30.0, 30.0));
        let screen = view.screen();
        assert_eq!(screen.start(), DVec2::new(350.0, 20.0));
        assert_eq!(screen.end(), DVec2::new(350.0, 180.0));
        let axis = view.center_line();
        assert_eq!(axis.start(), DVec2::new(0.0, 100.0));
        assert_eq!(axis.end(), DVec2::new(400.0, 100.0));
        assert!((axis.length() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_view_follows_y_and_top_follows_x() {
        let pos = BeamPosition::new(-0.075, 0.15);
        let side = LateralView::side(400.0, 200.0, 0.15);
        let top = LateralView::top(400.0, 200.0, 0.15);
        assert!((side.spot(pos).y - 0.0).abs() < 1e-9);
        assert!((top.spot(pos).y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_beam_path_is_continuous() {
        let view = LateralView::top(400.0, 200.0, 0.15);
        let pos = BeamPosition::new(0.05, 0.0);
        let path = view.beam_path(pos);
        assert_eq!(path.to_plates.start(), DVec2::new(60.0, 100.0));
        assert!(path.to_plates.end().distance(path.to_screen.start()) < 1e-9);
        assert!(path.to_screen.end().distance(view.spot(pos)) < 1e-9);
        assert_eq!(path.to_screen.control(), DVec2::new(200.0, 100.0));
    }

    #[test]
    fn test_beam_bend_is_independent_of_canvas_width() {
        let narrow = LateralView::side(300.0, 200.0, 0.15);
        let wide = LateralView::side(800.0, 200.0, 0.15);
        let pos = BeamPosition::new(0.0, 0.1);
        assert_eq!(narrow.beam_path(pos).to_screen.control(), DVec2::new(200.0, 100.0));
        assert_eq!(wide.beam_path(pos).to_screen.control(), DVec2::new(200.0, 100.0));
        assert!((wide.spot(pos).x - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewpoints_project() {
        let views = Viewpoints::new(DVec2::new(300.0, 300.0), DVec2::new(400.0, 200.0), 0.15);
        let beam = views.project(BeamPosition::new(0.0, 0.075));
        assert!((beam.front_spot.y - 75.0).abs() < 1e-9);
        assert!((beam.side_path.to_screen.end().y - 50.0).abs() < 1e-9);
        assert!((beam.top_path.to_screen.end().y - 100.0).abs() < 1e-9);
    }
}
