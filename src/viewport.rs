//! Bounding boxes and fitting results onto a unit surface
//!
//! This module contains pure calculation logic; mapping onto an actual
//! drawing surface is left to the caller.

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Bounding box of a set of points
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut bb = Self::empty();
        for (x, y) in points {
            bb.include_point(x, y);
        }
        bb
    }

    /// Check if the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Expand the bounding box to include a point
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Scale and center points into `[margin, 1 - margin]` on both axes.
///
/// Scaling is uniform, so the longer side of the extent spans the available
/// range and the aspect ratio is kept. A zero-size extent maps every point
/// to the center.
pub fn fit_to_margin(points: &mut [(f64, f64)], margin: f64) {
    let bounds = BoundingBox::from_points(points.iter().copied());
    if bounds.is_empty() {
        return;
    }

    let span = bounds.width().max(bounds.height());
    let available = 1.0 - 2.0 * margin;
    let scale = if span > 0.0 { available / span } else { 0.0 };
    let (cx, cy) = (bounds.center_x(), bounds.center_y());

    for (x, y) in points.iter_mut() {
        *x = 0.5 + (*x - cx) * scale;
        *y = 0.5 + (*y - cy) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-12 && (actual.1 - expected.1).abs() < 1e-12,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn bounding_box_empty() {
        let bb = BoundingBox::empty();
        assert!(bb.is_empty());
    }

    #[test]
    fn bounding_box_include_point() {
        let mut bb = BoundingBox::empty();
        bb.include_point(10.0, 20.0);
        bb.include_point(-5.0, 30.0);

        assert!(!bb.is_empty());
        assert_eq!(bb.min_x, -5.0);
        assert_eq!(bb.max_x, 10.0);
        assert_eq!(bb.min_y, 20.0);
        assert_eq!(bb.max_y, 30.0);
        assert_eq!(bb.width(), 15.0);
        assert_eq!(bb.center_y(), 25.0);
    }

    #[test]
    fn fit_spans_the_longer_axis() {
        let mut points = vec![(-100.0, -50.0), (100.0, 50.0)];
        fit_to_margin(&mut points, 0.05);

        // 200 wide, 100 tall: x covers [0.05, 0.95], y half of that around 0.5
        assert_close(points[0], (0.05, 0.275));
        assert_close(points[1], (0.95, 0.725));
    }

    #[test]
    fn fit_with_zero_margin_uses_unit_square() {
        let mut points = vec![(0.0, 0.0), (10.0, 10.0), (5.0, 2.5)];
        fit_to_margin(&mut points, 0.0);

        assert_close(points[0], (0.0, 0.0));
        assert_close(points[1], (1.0, 1.0));
        assert_close(points[2], (0.5, 0.25));
    }

    #[test]
    fn fit_single_point_goes_to_center() {
        let mut points = vec![(42.0, -7.0)];
        fit_to_margin(&mut points, 0.1);
        assert_close(points[0], (0.5, 0.5));
    }

    #[test]
    fn fit_empty_does_nothing() {
        let mut points: Vec<(f64, f64)> = Vec::new();
        fit_to_margin(&mut points, 0.05);
        assert!(points.is_empty());
    }
}
