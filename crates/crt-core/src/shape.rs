use glam::DVec2;

/// A path segment that can be sampled at any drawing progress in `[0, 1]`.
///
/// Used by the viewpoint projections to describe the beam path and the tube
/// outline in screen coordinates.
pub trait Shape: Send + Sync {
    /// Sample the shape at a given drawing progress in [0, 1].
    fn next_vector(&self, drawing_progress: f64) -> DVec2;

    /// Approximate path length.
    fn length(&self) -> f64;

    /// Shape type name for debugging.
    fn shape_type(&self) -> &'static str;

    fn start(&self) -> DVec2 {
        self.next_vector(0.0)
    }

    fn end(&self) -> DVec2 {
        self.next_vector(1.0)
    }
}

/// Compute total path length of a collection of shapes.
pub fn total_length(shapes: &[&dyn Shape]) -> f64 {
    shapes.iter().map(|s| s.length()).sum()
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: DVec2,
    pub to: DVec2,
}

impl Line {
    pub fn new(from: DVec2, to: DVec2) -> Self {
        Self { from, to }
    }
}

impl Shape for Line {
    fn next_vector(&self, drawing_progress: f64) -> DVec2 {
        self.from.lerp(self.to, drawing_progress)
    }

    fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    fn shape_type(&self) -> &'static str {
        "Line"
    }
}

/// A cubic Bezier curve defined by 4 control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
    pub p4: DVec2,
}

impl CubicBezierCurve {
    pub fn new(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> Self {
        Self { p1, p2, p3, p4 }
    }
}

impl Shape for CubicBezierCurve {
    fn next_vector(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        self.p1 * (mt2 * mt)
            + self.p2 * (3.0 * mt2 * t)
            + self.p3 * (3.0 * mt * t2)
            + self.p4 * (t2 * t)
    }

    fn length(&self) -> f64 {
        // Octagonal boundary approximation of the chord.
        let dx = (self.p4.x - self.p1.x).abs();
        let dy = (self.p4.y - self.p1.y).abs();
        0.41 * dx.min(dy) + 0.941246 * dx.max(dy)
    }

    fn shape_type(&self) -> &'static str {
        "CubicBezierCurve"
    }
}

/// A quadratic Bezier curve, stored as a cubic Bezier using degree elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierCurve {
    control: DVec2,
    inner: CubicBezierCurve,
}

impl QuadraticBezierCurve {
    pub fn new(start: DVec2, control: DVec2, end: DVec2) -> Self {
        let c2 = start + (control - start) * (2.0 / 3.0);
        let c3 = end + (control - end) * (2.0 / 3.0);
        Self {
            control,
            inner: CubicBezierCurve::new(start, c2, c3, end),
        }
    }

    pub fn control(&self) -> DVec2 {
        self.control
    }
}

impl Shape for QuadraticBezierCurve {
    fn next_vector(&self, drawing_progress: f64) -> DVec2 {
        self.inner.next_vector(drawing_progress)
    }

    fn length(&self) -> f64 {
        self.inner.length()
    }

    fn shape_type(&self) -> &'static str {
        "QuadraticBezierCurve"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_interpolation() {
        let line = Line::new(DVec2::ZERO, DVec2::new(10.0, 10.0));
        let mid = line.next_vector(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_length() {
        let line = Line::new(DVec2::ZERO, DVec2::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_matches_direct_formula() {
        let a = DVec2::new(60.0, 100.0);
        let c = DVec2::new(200.0, 100.0);
        let b = DVec2::new(350.0, 40.0);
        let curve = QuadraticBezierCurve::new(a, c, b);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let mt = 1.0 - t;
            let expected = a * (mt * mt) + c * (2.0 * mt * t) + b * (t * t);
            assert!(curve.next_vector(t).distance(expected) < 1e-9);
        }
        assert_eq!(curve.start(), a);
        assert!(curve.end().distance(b) < 1e-9);
        assert_eq!(curve.control(), c);
    }

    #[test]
    fn test_total_length() {
        let a = Line::new(DVec2::ZERO, DVec2::new(3.0, 4.0));
        let b = Line::new(DVec2::ZERO, DVec2::new(6.0, 8.0));
        assert!((total_length(&[&a, &b]) - 15.0).abs() < 1e-9);
    }
}
