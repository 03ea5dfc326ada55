use crate::{BBox, DEFAULT_SAMPLES, PI, Point, Scalar, Segment, Transform, svg::parse_segments};
use std::{fmt, io::Write, str::FromStr};

/// Mutable polyline with an anchor used as the default pivot of transformations
///
/// Always contains at least two points. Length is kept in sync with the points after
/// every mutation.
#[derive(Clone, PartialEq)]
pub struct Path {
    /// Flattened points of the path
    points: Vec<Point>,
    /// Sum of the distances between consecutive points
    length: Scalar,
    /// Default pivot for rotation and scale, centroid unless set explicitly
    anchor: Point,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Path closed:{} points:{} anchor:{:?}",
            self.is_closed(),
            self.points.len(),
            self.anchor
        )?;
        for point in self.points.iter() {
            writeln!(f, "  {:?}", point)?;
        }
        Ok(())
    }
}

impl Path {
    /// Create path from the list of points
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Result<Self, Error> {
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                count: points.len(),
            });
        }
        let mut path = Self {
            length: polyline_length(&points),
            anchor: Point::default(),
            points,
        };
        path.anchor = path.centroid();
        Ok(path)
    }

    /// Create path from the flat list of coordinates `[x0, y0, x1, y1, ...]`
    pub fn from_coords(coords: &[Scalar]) -> Result<Self, Error> {
        if coords.len() % 2 != 0 {
            return Err(Error::InvalidArgument {
                reason: format!("odd number of coordinates: {}", coords.len()),
            });
        }
        Self::new(coords.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])))
    }

    /// Parse SVG path data, curves are flattened with `samples` points each
    pub fn from_svg_path(text: impl AsRef<[u8]>, samples: usize) -> Result<Self, Error> {
        let _span = tracing::debug_span!("[path] from_svg_path", samples).entered();
        let segments = parse_segments(text)?;
        tracing::trace!(count = segments.len(), "[path] segments resolved");
        Self::from_segments(&segments, samples)
    }

    /// Flatten segments into a path
    pub fn from_segments(segments: &[Segment], samples: usize) -> Result<Self, Error> {
        Self::new(flatten_segments(segments, samples))
    }

    /// Points of the path
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Flat list of coordinates `[x0, y0, x1, y1, ...]`
    pub fn coords(&self) -> Vec<Scalar> {
        self.points.iter().flat_map(|point| point.0).collect()
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    pub fn segments_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Total length of the path
    pub fn length(&self) -> Scalar {
        self.length
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: impl Into<Point>) -> &mut Self {
        self.anchor = anchor.into();
        self
    }

    /// Whether the last point coincides with the first one
    pub fn is_closed(&self) -> bool {
        self.start().is_close_to(self.end())
    }

    /// Append the first point to the end unless the path is already closed
    pub fn close(&mut self) -> &mut Self {
        if !self.is_closed() {
            self.points.push(self.start());
            self.update();
        }
        self
    }

    /// Remove closing point, the path never gets shorter than two points
    pub fn open(&mut self) -> &mut Self {
        if self.is_closed() && self.points.len() > 2 {
            self.points.pop();
            self.update();
        }
        self
    }

    /// Mean of the points, the closing point is not counted twice
    pub fn centroid(&self) -> Point {
        let points = if self.is_closed() && self.points.len() > 2 {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points[..]
        };
        let sum = points
            .iter()
            .fold(Point::default(), |sum, point| sum + *point);
        sum / points.len() as Scalar
    }

    /// Bounding box of the points
    pub fn bounds(&self) -> BBox {
        let first = self.start();
        self.points
            .iter()
            .fold(BBox::new(first, first), |bbox, point| bbox.extend(*point))
    }

    /// Move points and the anchor by `[dx, dy]`
    pub fn translate(&mut self, dx: Scalar, dy: Scalar) -> &mut Self {
        let offset = Point::new(dx, dy);
        for point in self.points.iter_mut() {
            *point = *point + offset;
        }
        self.anchor = self.anchor + offset;
        self.update();
        self
    }

    /// Rotate by `angle` (radians) around `pivot`, or around the anchor if not provided
    ///
    /// The anchor itself does not move.
    pub fn rotate(&mut self, angle: Scalar, pivot: Option<Point>) -> &mut Self {
        let pivot = pivot.unwrap_or(self.anchor);
        self.apply(Transform::identity().rotate_around(angle, pivot))
    }

    /// Scale by `[sx, sy]` relative to `pivot`, or to the anchor if not provided
    ///
    /// The anchor itself does not move.
    pub fn scale(&mut self, sx: Scalar, sy: Scalar, pivot: Option<Point>) -> &mut Self {
        let pivot = pivot.unwrap_or(self.anchor);
        self.apply(Transform::identity().scale_around(sx, sy, pivot))
    }

    /// Apply an arbitrary affine transformation to the points and the anchor
    pub fn transform(&mut self, tr: Transform) -> &mut Self {
        self.anchor = tr.apply(self.anchor);
        self.apply(tr)
    }

    /// Move the path so its anchor lands on `target`
    pub fn set_position(&mut self, target: impl Into<Point>) -> &mut Self {
        let Point([dx, dy]) = target.into() - self.anchor;
        self.translate(dx, dy)
    }

    /// Reverse direction of the path
    pub fn reverse(&mut self) -> &mut Self {
        self.points.reverse();
        self.update();
        self
    }

    /// Translated copy of the path
    pub fn translated(&self, dx: Scalar, dy: Scalar) -> Self {
        let mut path = self.clone();
        path.translate(dx, dy);
        path
    }

    /// Rotated copy of the path
    pub fn rotated(&self, angle: Scalar, pivot: Option<Point>) -> Self {
        let mut path = self.clone();
        path.rotate(angle, pivot);
        path
    }

    /// Scaled copy of the path
    pub fn scaled(&self, sx: Scalar, sy: Scalar, pivot: Option<Point>) -> Self {
        let mut path = self.clone();
        path.scale(sx, sy, pivot);
        path
    }

    /// Closed path that goes through the points of this path `count` times
    pub fn repeated(&self, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidArgument {
                reason: "repeat count must be positive".to_owned(),
            });
        }
        let mut path = self.clone();
        path.open();
        path.points = path.points.repeat(count);
        path.close();
        path.update();
        Ok(path)
    }

    /// Make the point at `index` the start of the closed loop
    pub fn set_start(&mut self, index: usize) -> &mut Self {
        self.open();
        let shift = index % self.points.len();
        self.points.rotate_left(shift);
        self.close();
        self.update();
        self
    }

    /// Insert a point at `t` fraction of the length of the path
    ///
    /// Returns `false` if the point already exists (including `t` equal to `0` or `1`).
    pub fn add_point_at(&mut self, t: Scalar) -> Result<bool, Error> {
        check_param(t)?;
        if t == 0.0 || t == 1.0 {
            return Ok(false);
        }
        let (index, frac) = self.locate(t)?;
        let (p0, p1) = (self.points[index], self.points[index + 1]);
        let point = p0 + frac * (p1 - p0);
        if point.is_close_to(p0) || point.is_close_to(p1) {
            return Ok(false);
        }
        self.points.insert(index + 1, point);
        self.update();
        tracing::trace!(t, index = index + 1, "[path] point inserted");
        Ok(true)
    }

    /// Point at `t` fraction of the length of the path and the tangent angle at it
    pub fn point_and_tangent_at(&self, t: Scalar) -> Result<(Point, Scalar), Error> {
        check_param(t)?;
        if self.length <= 0.0 {
            return Err(Error::DegenerateGeometry);
        }
        let last = self.points.len() - 1;
        if t == 0.0 {
            let angle = (self.points[1] - self.points[0]).angle();
            return Ok((self.points[0], angle));
        }
        if t == 1.0 {
            let angle = (self.points[last] - self.points[last - 1]).angle();
            return Ok((self.points[last], angle));
        }
        let (index, frac) = self.locate(t)?;
        let (p0, p1) = (self.points[index], self.points[index + 1]);
        Ok((p0 + frac * (p1 - p0), (p1 - p0).angle()))
    }

    /// Points at `distance` on both sides of the path at `t`, perpendicular to the tangent
    pub fn offset_points(&self, t: Scalar, distance: Scalar) -> Result<(Point, Point), Error> {
        let (point, angle) = self.point_and_tangent_at(t)?;
        Ok((
            Point::polar(point, distance, angle + PI / 2.0),
            Point::polar(point, distance, angle - PI / 2.0),
        ))
    }

    /// Replace points with `count` points evenly spaced along the path
    pub fn resample(&mut self, count: usize) -> Result<&mut Self, Error> {
        if count < 2 {
            return Err(Error::InvalidArgument {
                reason: format!("at least two samples required, got {}", count),
            });
        }
        let points = crate::linspace(0.0, 1.0, count)
            .map(|t| self.point_and_tangent_at(t).map(|(point, _)| point))
            .collect::<Result<Vec<_>, Error>>()?;
        self.points = points;
        self.update();
        Ok(self)
    }

    /// Save path in SVG path format
    pub fn save(&self, mut out: impl Write) -> std::io::Result<()> {
        write!(&mut out, "{}", self)
    }

    /// Convert path to SVG path representation
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }

    /// Find segment containing point at `t` and fraction of the segment length
    fn locate(&self, t: Scalar) -> Result<(usize, Scalar), Error> {
        if self.length <= 0.0 {
            return Err(Error::DegenerateGeometry);
        }
        let target = t * self.length;
        let mut total = 0.0;
        let mut last = None;
        for (index, pair) in self.points.windows(2).enumerate() {
            let length = pair[0].dist(pair[1]);
            if length <= 0.0 {
                continue;
            }
            if total + length >= target {
                let frac = ((target - total) / length).clamp(0.0, 1.0);
                return Ok((index, frac));
            }
            total += length;
            last = Some(index);
        }
        // accumulated rounding error, target is at the very end
        last.map(|index| (index, 1.0))
            .ok_or(Error::DegenerateGeometry)
    }

    /// Apply transformation to the points only
    fn apply(&mut self, tr: Transform) -> &mut Self {
        for point in self.points.iter_mut() {
            *point = tr.apply(*point);
        }
        self.update();
        self
    }

    /// Recompute derived length
    fn update(&mut self) {
        self.length = polyline_length(&self.points);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{:?}", self.start())?;
        for (index, point) in self.points[1..].iter().enumerate() {
            if index == 0 {
                write!(f, " L{:?}", point)?;
            } else {
                write!(f, " {:?}", point)?;
            }
        }
        if self.is_closed() {
            write!(f, " Z")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(text: &str) -> Result<Path, Self::Err> {
        Path::from_svg_path(text, DEFAULT_SAMPLES)
    }
}

/// Flatten segments into a single list of points without adjacent duplicates
pub fn flatten_segments(segments: &[Segment], samples: usize) -> Vec<Point> {
    let mut points = Vec::new();
    for segment in segments {
        segment.flatten(samples, &mut points);
    }
    dedup_points(&points)
}

/// Drop point `i` if it coincides with point `i + 1`, the last point is always kept
fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut result: Vec<Point> = points
        .windows(2)
        .filter(|pair| !pair[0].is_close_to(pair[1]))
        .map(|pair| pair[0])
        .collect();
    result.extend(points.last().copied());
    result
}

fn polyline_length(points: &[Point]) -> Scalar {
    points.windows(2).map(|pair| pair[0].dist(pair[1])).sum()
}

fn check_param(t: Scalar) -> Result<(), Error> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            reason: format!("parameter must be in [0, 1], got {}", t),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed path data
    Grammar { reason: String, offset: usize },
    /// Argument outside of its valid range
    InvalidArgument { reason: String },
    /// Query on a path of zero length
    DegenerateGeometry,
    /// Path requires at least two points
    TooFewPoints { count: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Grammar { reason, offset } => {
                write!(f, "path grammar error at {}: {}", offset, reason)
            }
            Error::InvalidArgument { reason } => write!(f, "invalid argument: {}", reason),
            Error::DegenerateGeometry => write!(f, "path has zero length"),
            Error::TooFewPoints { count } => {
                write!(f, "path requires at least two points, got {}", count)
            }
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SvgArc, assert_approx_eq};

    fn assert_points_close(left: &[Point], right: &[Point]) {
        assert_eq!(left.len(), right.len(), "{:?} != {:?}", left, right);
        for (p0, p1) in left.iter().zip(right) {
            assert!(p0.dist(*p1) < 1e-9, "{:?} != {:?}", p0, p1);
        }
    }

    fn line() -> Path {
        Path::new([(0.0, 0.0), (10.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_construct() -> Result<(), Error> {
        let path = Path::from_coords(&[0.0, 0.0, 3.0, 4.0, 3.0, 0.0])?;
        assert_eq!(path.points_count(), 3);
        assert_eq!(path.segments_count(), 2);
        assert_approx_eq!(path.length(), 9.0);
        assert!(path.anchor().is_close_to(Point::new(2.0, 4.0 / 3.0)));
        assert_eq!(path.coords(), vec![0.0, 0.0, 3.0, 4.0, 3.0, 0.0]);

        assert!(matches!(
            Path::from_coords(&[0.0, 0.0, 1.0]),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            Path::new([(1.0, 1.0)]),
            Err(Error::TooFewPoints { count: 1 })
        );
        assert_eq!(
            "M1,1".parse::<Path>(),
            Err(Error::TooFewPoints { count: 0 })
        );
        assert!(matches!(
            "L1,1".parse::<Path>(),
            Err(Error::Grammar { offset: 0, .. })
        ));
        // overflowing coordinate is rejected instead of collapsing into its neighbour
        assert!(matches!(
            "M0,0 L1e999,0".parse::<Path>(),
            Err(Error::Grammar { offset: 6, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_parse_lines() -> Result<(), Error> {
        let path: Path = "M0,0 L1,1 2,2 3,3".parse()?;
        assert_eq!(
            path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(3.0, 3.0)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_close_equivalence() -> Result<(), Error> {
        let mut path: Path = "M0,0 L10,0 L10,10 Z".parse()?;
        assert!(!path.is_closed());
        path.close();
        let explicit: Path = "M0,0 L10,0 L10,10 L0,0".parse()?;
        assert!(explicit.is_closed());
        assert_eq!(path.points(), explicit.points());
        assert_eq!(path.anchor(), explicit.anchor());
        assert_approx_eq!(path.length(), explicit.length());
        Ok(())
    }

    #[test]
    fn test_close_open() -> Result<(), Error> {
        let mut path = Path::new([(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)])?;
        path.close();
        assert_eq!(path.points_count(), 4);
        assert_approx_eq!(path.length(), 12.0);
        path.close();
        assert_eq!(path.points_count(), 4);
        // closing point is not counted by the centroid
        assert!(path.centroid().is_close_to(Point::new(8.0 / 3.0, 1.0)));

        path.open();
        assert_eq!(path.points_count(), 3);
        assert_approx_eq!(path.length(), 7.0);
        path.open();
        assert_eq!(path.points_count(), 3);

        // never shrinks below two points
        let mut path = Path::new([(1.0, 1.0), (1.0, 1.0)])?;
        assert!(path.is_closed());
        path.open();
        assert_eq!(path.points_count(), 2);
        Ok(())
    }

    #[test]
    fn test_dedup() {
        let p = |x, y| Point::new(x, y);
        let points = [p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)];
        assert_eq!(dedup_points(&points), vec![p(0.0, 0.0), p(1.0, 0.0)]);
        // closeness is relative
        let points = [p(1e6, 0.0), p(1e6 + 1e-5, 0.0), p(2e6, 0.0)];
        assert_eq!(dedup_points(&points), vec![p(1e6 + 1e-5, 0.0), p(2e6, 0.0)]);
        assert!(dedup_points(&[]).is_empty());
    }

    #[test]
    fn test_flatten_cubic() -> Result<(), Error> {
        let path = Path::from_svg_path("M0,0 C0,1 1,1 1,0 L2,0", 10)?;
        assert_eq!(path.points_count(), 11);
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        assert_eq!(path.points()[9], Point::new(1.0, 0.0));
        assert_eq!(path.end(), Point::new(2.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_arc_flattened() -> Result<(), Error> {
        let path = Path::from_svg_path("M0,0 A5,5 0 0 0 10,0", 21)?;
        assert_eq!(path.points_count(), 21);
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        assert_eq!(path.end(), Point::new(10.0, 0.0));
        for point in path.points() {
            assert_approx_eq!(point.dist(Point::new(5.0, 0.0)), 5.0, 1e-9);
        }
        assert_approx_eq!(path.bounds().max().y(), 5.0, 1e-9);
        // chords are shorter than the arc
        assert!(path.length() < 5.0 * PI && path.length() > 5.0 * PI - 0.1);
        Ok(())
    }

    #[test]
    fn test_arc_zero_radius_is_line() -> Result<(), Error> {
        let path = Path::from_svg_path("M0,0 A0,5 0 0 1 10,0", DEFAULT_SAMPLES)?;
        assert_eq!(path.points(), &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        let arc = SvgArc {
            start: Point::new(1.0, 1.0),
            radii: Point::new(3.0, 3.0),
            x_axis_rot: 0.0,
            large: false,
            sweep: false,
            end: Point::new(1.0, 1.0),
        };
        let path = Path::from_segments(&[arc.into()], DEFAULT_SAMPLES);
        assert_eq!(path, Err(Error::TooFewPoints { count: 1 }));
        Ok(())
    }

    #[test]
    fn test_translate_and_position() -> Result<(), Error> {
        let mut path = line();
        assert_eq!(path.anchor(), Point::new(5.0, 0.0));
        path.translate(1.0, 2.0);
        assert_eq!(path.start(), Point::new(1.0, 2.0));
        assert_eq!(path.anchor(), Point::new(6.0, 2.0));
        assert_approx_eq!(path.length(), 10.0);

        path.set_position((0.0, 0.0));
        assert_eq!(path.anchor(), Point::new(0.0, 0.0));
        assert_eq!(path.points(), &[Point::new(-5.0, 0.0), Point::new(5.0, 0.0)]);

        path.set_anchor((-5.0, 0.0)).set_position((0.0, 0.0));
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_rotate() -> Result<(), Error> {
        let original: Path = "M0,0 L10,0 L10,10 L3,7".parse()?;
        let mut path = original.clone();
        path.rotate(0.7, None).rotate(-0.7, None);
        assert_points_close(path.points(), original.points());
        assert_eq!(path.anchor(), original.anchor());

        // isometry
        path.rotate(1.3, Some(Point::new(-4.0, 2.0)));
        assert_approx_eq!(path.length(), original.length(), 1e-9);
        assert_eq!(path.anchor(), original.anchor());

        let rotated = line().rotated(PI / 2.0, Some(Point::new(0.0, 0.0)));
        assert_points_close(
            rotated.points(),
            &[Point::new(0.0, 0.0), Point::new(0.0, 10.0)],
        );
        Ok(())
    }

    #[test]
    fn test_scale() -> Result<(), Error> {
        let original: Path = "M0,0 L10,0 L10,10 L3,7".parse()?;
        let mut path = original.clone();
        path.scale(1.0, 1.0, None);
        assert_points_close(path.points(), original.points());
        path.scale(3.0, 0.5, None).scale(1.0 / 3.0, 2.0, None);
        assert_points_close(path.points(), original.points());
        assert_approx_eq!(path.length(), original.length(), 1e-9);

        let scaled = line().scaled(2.0, 1.0, Some(Point::new(0.0, 0.0)));
        assert_eq!(scaled.end(), Point::new(20.0, 0.0));
        assert_approx_eq!(scaled.length(), 20.0);
        Ok(())
    }

    #[test]
    fn test_transform() -> Result<(), Error> {
        let mut path = line();
        path.transform(Transform::identity().translate(0.0, 5.0).scale(0.5, 1.0));
        assert_eq!(path.points(), &[Point::new(0.0, 5.0), Point::new(5.0, 5.0)]);
        assert_eq!(path.anchor(), Point::new(2.5, 5.0));
        assert_approx_eq!(path.length(), 5.0);
        Ok(())
    }

    #[test]
    fn test_point_and_tangent() -> Result<(), Error> {
        let path: Path = "M0,0 L10,0 L10,10".parse()?;
        let (point, angle) = path.point_and_tangent_at(0.0)?;
        assert_eq!(point, Point::new(0.0, 0.0));
        assert_approx_eq!(angle, 0.0);
        let (point, angle) = path.point_and_tangent_at(1.0)?;
        assert_eq!(point, Point::new(10.0, 10.0));
        assert_approx_eq!(angle, PI / 2.0);

        let (point, angle) = path.point_and_tangent_at(0.25)?;
        assert!(point.is_close_to(Point::new(5.0, 0.0)));
        assert_approx_eq!(angle, 0.0);
        let (point, angle) = path.point_and_tangent_at(0.75)?;
        assert!(point.is_close_to(Point::new(10.0, 5.0)));
        assert_approx_eq!(angle, PI / 2.0);

        assert!(matches!(
            path.point_and_tangent_at(1.5),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            path.point_and_tangent_at(-0.1),
            Err(Error::InvalidArgument { .. })
        ));

        let degenerate = Path::new([(1.0, 1.0), (1.0, 1.0)])?;
        assert_eq!(
            degenerate.point_and_tangent_at(0.0),
            Err(Error::DegenerateGeometry)
        );
        assert_eq!(
            degenerate.point_and_tangent_at(0.5),
            Err(Error::DegenerateGeometry)
        );
        Ok(())
    }

    #[test]
    fn test_tangent_skips_zero_segments() -> Result<(), Error> {
        let path = Path::new([(0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (5.0, 5.0)])?;
        let (point, angle) = path.point_and_tangent_at(0.5)?;
        assert!(point.is_close_to(Point::new(5.0, 0.0)));
        assert_approx_eq!(angle, 0.0);
        let (_, angle) = path.point_and_tangent_at(0.6)?;
        assert_approx_eq!(angle, PI / 2.0);
        Ok(())
    }

    #[test]
    fn test_offset_points() -> Result<(), Error> {
        let (left, right) = line().offset_points(0.5, 2.0)?;
        assert!(left.is_close_to(Point::new(5.0, 2.0)));
        assert!(right.is_close_to(Point::new(5.0, -2.0)));

        let degenerate = Path::new([(1.0, 1.0), (1.0, 1.0)])?;
        assert_eq!(
            degenerate.offset_points(0.5, 1.0),
            Err(Error::DegenerateGeometry)
        );
        Ok(())
    }

    #[test]
    fn test_add_point() -> Result<(), Error> {
        let mut path = line();
        assert!(path.add_point_at(0.5)?);
        assert_eq!(path.points_count(), 3);
        assert!(path.points()[1].is_close_to(Point::new(5.0, 0.0)));
        assert_approx_eq!(path.length(), 10.0);
        // already there
        assert!(!path.add_point_at(0.5)?);
        assert_eq!(path.points_count(), 3);

        assert!(!path.add_point_at(0.0)?);
        assert!(!path.add_point_at(1.0)?);
        assert_eq!(path.points_count(), 3);
        assert!(matches!(
            path.add_point_at(2.0),
            Err(Error::InvalidArgument { .. })
        ));

        let mut degenerate = Path::new([(1.0, 1.0), (1.0, 1.0)])?;
        assert_eq!(degenerate.add_point_at(0.5), Err(Error::DegenerateGeometry));
        Ok(())
    }

    #[test]
    fn test_resample() -> Result<(), Error> {
        let mut path: Path = "M0,0 L10,0 L10,10".parse()?;
        path.resample(5)?;
        assert_points_close(
            path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 5.0),
                Point::new(10.0, 10.0),
            ],
        );
        assert_approx_eq!(path.length(), 20.0, 1e-9);
        assert!(matches!(path.resample(1), Err(Error::InvalidArgument { .. })));
        assert_eq!(path.points_count(), 5);

        // zero length path has nothing to sample and is left untouched
        let mut degenerate = Path::new([(1.0, 1.0), (1.0, 1.0)])?;
        assert!(matches!(
            degenerate.resample(3),
            Err(Error::DegenerateGeometry)
        ));
        assert_eq!(
            degenerate.points(),
            &[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]
        );
        Ok(())
    }

    #[test]
    fn test_clone_is_independent() -> Result<(), Error> {
        let path: Path = "M0,0 L10,0 L10,10".parse()?;
        let mut copy = path.clone();
        copy.translate(5.0, 5.0).close().add_point_at(0.25)?;
        copy.set_anchor((-1.0, -1.0));

        assert_eq!(
            path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
        assert_approx_eq!(path.length(), 20.0);
        assert!(path.anchor().is_close_to(Point::new(20.0 / 3.0, 10.0 / 3.0)));
        assert_eq!(copy.points_count(), 5);
        assert_eq!(copy.start(), Point::new(5.0, 5.0));
        Ok(())
    }

    #[test]
    fn test_reverse_and_start() -> Result<(), Error> {
        let mut path = Path::new([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])?;
        path.reverse();
        assert_eq!(path.points()[1], Point::new(1.0, 1.0));

        path.set_start(1);
        assert_eq!(
            path.points(),
            &[
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0)
            ]
        );
        assert!(path.is_closed());
        assert_approx_eq!(path.length(), 2.0 + 2.0f64.sqrt(), 1e-9);
        Ok(())
    }

    #[test]
    fn test_repeated() -> Result<(), Error> {
        let path = Path::new([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])?;
        let twice = path.repeated(2)?;
        assert_eq!(twice.points_count(), 7);
        assert!(twice.is_closed());
        assert_approx_eq!(twice.length(), 2.0 * path.length(), 1e-9);
        assert!(matches!(path.repeated(0), Err(Error::InvalidArgument { .. })));
        Ok(())
    }

    #[test]
    fn test_svg_output() -> Result<(), Error> {
        let mut path = Path::new([(0.0, 0.0), (10.0, 0.0), (10.0, 2.5)])?;
        assert_eq!(path.to_svg_path(), "M0,0 L10,0 10,2.5");
        path.close();
        assert_eq!(path.to_string(), "M0,0 L10,0 10,2.5 0,0 Z");
        let parsed: Path = path.to_string().parse()?;
        assert_eq!(parsed.points(), path.points());
        Ok(())
    }

    #[test]
    fn test_bounds() -> Result<(), Error> {
        let path: Path = "M1,5 L-2,3 4,-1".parse()?;
        let bbox = path.bounds();
        assert_eq!(bbox.min(), Point::new(-2.0, -1.0));
        assert_eq!(bbox.max(), Point::new(4.0, 5.0));
        Ok(())
    }
}
