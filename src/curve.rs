//! Drawing segments produced by the SVG path resolver

use crate::{BBox, Point, Scalar, SvgArc, utils::linspace};
use std::fmt;

/// Number of samples used to flatten curved segments
pub const DEFAULT_SAMPLES: usize = 50;

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Length of the line
    pub fn length(&self) -> Scalar {
        let Self([p0, p1]) = self;
        p0.dist(*p1)
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }

    pub fn start(&self) -> Point {
        self.0[0]
    }

    pub fn end(&self) -> Point {
        self.0[1]
    }

    /// Direction vector of the line (not normalized)
    pub fn direction(&self) -> Point {
        self.end() - self.start()
    }

    /// Angle of the line direction relative to the x-axis
    pub fn angle(&self) -> Scalar {
        self.direction().angle()
    }

    /// Linear interpolation between start (`t = 0`) and end (`t = 1`)
    pub fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = self;
        *p0 + t * (*p1 - *p0)
    }
}

// -----------------------------------------------------------------------------
// Quadratic bezier curve
// -----------------------------------------------------------------------------

/// Quadratic bezier curve, only used as an intermediate form before elevation
/// to a cubic curve.
#[derive(Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 3]);

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quad([p0, p1, p2]) = self;
        write!(f, "Quad {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Quad {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    pub fn points(&self) -> [Point; 3] {
        self.0
    }

    /// Find smooth point used by SVG parser
    pub fn smooth(&self) -> Point {
        let Quad([_p0, p1, p2]) = self;
        2.0 * *p2 - *p1
    }
}

// -----------------------------------------------------------------------------
// Cubic bezier curve
// -----------------------------------------------------------------------------

/// Cubic bezier curve
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }

    pub fn start(&self) -> Point {
        self.0[0]
    }

    pub fn end(&self) -> Point {
        self.0[3]
    }

    /// Find smooth point used by SVG parser
    pub fn smooth(&self) -> Point {
        let Cubic([_p0, _p1, p2, p3]) = self;
        2.0 * *p3 - *p2
    }

    /// Evaluate curve at parameter value `t` in (0.0..=1.0), in Bernstein form
    ///
    /// `t = 0` and `t = 1` return exactly the first and the last control points.
    pub fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1, p2, p3]) = self;
        let s = 1.0 - t;
        let b0 = s * s * s;
        let b1 = 3.0 * s * s * t;
        let b2 = 3.0 * s * t * t;
        let b3 = t * t * t;
        b0 * *p0 + b1 * *p1 + b2 * *p2 + b3 * *p3
    }

    /// Sample curve at `samples` evenly spaced parameter values (at least both ends)
    pub fn flatten(&self, samples: usize) -> impl Iterator<Item = Point> + '_ {
        linspace(0.0, 1.0, samples.max(2)).map(move |t| self.at(t))
    }
}

impl From<Quad> for Cubic {
    fn from(quad: Quad) -> Self {
        let Quad([p0, p1, p2]) = quad;
        Self([
            p0,
            p0 + (2.0 / 3.0) * (p1 - p0),
            p2 + (2.0 / 3.0) * (p1 - p2),
            p2,
        ])
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// Absolute drawing segment
#[derive(Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Cubic(Cubic),
    Arc(SvgArc),
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Line(line) => line.fmt(f),
            Segment::Cubic(cubic) => cubic.fmt(f),
            Segment::Arc(arc) => arc.fmt(f),
        }
    }
}

impl Segment {
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.start(),
            Segment::Cubic(cubic) => cubic.start(),
            Segment::Arc(arc) => arc.start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.end(),
            Segment::Cubic(cubic) => cubic.end(),
            Segment::Arc(arc) => arc.end,
        }
    }

    pub fn to_line(&self) -> Option<Line> {
        match self {
            Segment::Line(line) => Some(*line),
            _ => None,
        }
    }

    pub fn to_cubic(&self) -> Option<Cubic> {
        match self {
            Segment::Cubic(cubic) => Some(*cubic),
            _ => None,
        }
    }

    pub fn to_arc(&self) -> Option<SvgArc> {
        match self {
            Segment::Arc(arc) => Some(*arc),
            _ => None,
        }
    }

    /// Append flattened points of the segment to `out`
    ///
    /// Lines contribute both ends, curves `samples` points including both ends.
    pub fn flatten(&self, samples: usize, out: &mut impl Extend<Point>) {
        match self {
            Segment::Line(line) => out.extend(line.points()),
            Segment::Cubic(cubic) => out.extend(cubic.flatten(samples)),
            Segment::Arc(arc) => arc.flatten(samples, out),
        }
    }

    /// Extend provided `init` bounding box with the bounding box of the segment
    ///
    /// Arcs are bounded exactly, cubic curves by their flattened points.
    pub fn bbox(&self, init: Option<BBox>) -> BBox {
        let bbox = match self {
            Segment::Arc(arc) => match arc.to_ellip_arc() {
                Some(ellip) => ellip.bbox(None),
                None => BBox::new(arc.start, arc.end),
            },
            _ => {
                let mut points = Vec::new();
                self.flatten(DEFAULT_SAMPLES, &mut points);
                BBox::from_points(points).unwrap_or_else(|| BBox::new(self.start(), self.end()))
            }
        };
        match init {
            Some(init) => init.union(bbox),
            None => bbox,
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Cubic> for Segment {
    fn from(cubic: Cubic) -> Self {
        Self::Cubic(cubic)
    }
}

impl From<Quad> for Segment {
    fn from(quad: Quad) -> Self {
        Self::Cubic(quad.into())
    }
}

impl From<SvgArc> for Segment {
    fn from(arc: SvgArc) -> Self {
        Self::Arc(arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_cubic_ends_exact() {
        let cubic = Cubic::new((0.1, 0.7), (3.3, -1.9), (2.2, 8.4), (-5.3, 0.3));
        assert_eq!(cubic.at(0.0), cubic.start());
        assert_eq!(cubic.at(1.0), cubic.end());

        let points: Vec<_> = cubic.flatten(DEFAULT_SAMPLES).collect();
        assert_eq!(points.len(), DEFAULT_SAMPLES);
        assert_eq!(points[0], Point::new(0.1, 0.7));
        assert_eq!(points[DEFAULT_SAMPLES - 1], Point::new(-5.3, 0.3));
    }

    #[test]
    fn test_cubic_at() {
        let cubic = Cubic::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let mid = cubic.at(0.5);
        assert_approx_eq!(mid.x(), 0.5);
        assert_approx_eq!(mid.y(), 0.75);
        // at least both ends even when asked for fewer samples
        assert_eq!(cubic.flatten(0).count(), 2);
    }

    #[test]
    fn test_quad_to_cubic() {
        let quad = Quad::new((0.0, 0.0), (3.0, 3.0), (6.0, 0.0));
        let cubic = Cubic::from(quad);
        let [p0, p1, p2, p3] = cubic.points();
        assert_eq!(p0, Point::new(0.0, 0.0));
        assert!(p1.is_close_to(Point::new(2.0, 2.0)));
        assert!(p2.is_close_to(Point::new(4.0, 2.0)));
        assert_eq!(p3, Point::new(6.0, 0.0));
        // quadratic and elevated cubic agree at the middle
        assert!(cubic.at(0.5).is_close_to(Point::new(3.0, 1.5)));
        assert_eq!(quad.smooth(), Point::new(9.0, -3.0));
        assert!(cubic.smooth().is_close_to(Point::new(8.0, -2.0)));
    }

    #[test]
    fn test_line() {
        let line = Line::new((1.0, 1.0), (4.0, 5.0));
        assert_approx_eq!(line.length(), 5.0);
        assert_eq!(line.at(0.0), line.start());
        assert!(line.at(0.5).is_close_to(Point::new(2.5, 3.0)));
        assert_approx_eq!(line.angle(), (4.0f64).atan2(3.0));

        let mut points = Vec::new();
        Segment::from(line).flatten(DEFAULT_SAMPLES, &mut points);
        assert_eq!(points, vec![Point::new(1.0, 1.0), Point::new(4.0, 5.0)]);
    }

    #[test]
    fn test_segment_bbox() {
        let line = Segment::from(Line::new((1.0, 1.0), (4.0, -5.0)));
        let bbox = line.bbox(None);
        assert_eq!(bbox.min(), Point::new(1.0, -5.0));
        assert_eq!(bbox.max(), Point::new(4.0, 1.0));

        let arc = Segment::from(SvgArc {
            start: Point::new(0.0, 0.0),
            radii: Point::new(5.0, 5.0),
            x_axis_rot: 0.0,
            large: false,
            sweep: false,
            end: Point::new(10.0, 0.0),
        });
        let bbox = arc.bbox(Some(bbox));
        assert_eq!(bbox.min(), Point::new(0.0, -5.0));
        assert_approx_eq!(bbox.max().y(), 5.0, 1e-9);
    }
}
