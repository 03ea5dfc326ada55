//! Preset shapes built on top of the point list constructor
use crate::{Cubic, Error, PI, Path, Point, Quad, Scalar};

/// Ratio of the inner to the outer radius of the five-pointed star
const STAR_INNER_RATIO: Scalar = 0.38196601125;

impl Path {
    /// Straight line from `start` to `end`
    pub fn line(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self, Error> {
        Self::new([start.into(), end.into()])
    }

    /// Closed rectangle with the upper-left corner at `origin`
    pub fn rectangle(
        origin: impl Into<Point>,
        width: Scalar,
        height: Scalar,
    ) -> Result<Self, Error> {
        let Point([x, y]) = origin.into();
        Self::bbox((x, y), (x + width, y + height))
    }

    /// Closed rectangle given its upper-left and bottom-right corners
    pub fn bbox(
        upper_left: impl Into<Point>,
        bottom_right: impl Into<Point>,
    ) -> Result<Self, Error> {
        let Point([x0, y0]) = upper_left.into();
        let Point([x1, y1]) = bottom_right.into();
        Self::new([(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)])
    }

    /// Closed ellipse approximated with `samples` points, anchored at its center
    pub fn ellipse(
        center: impl Into<Point>,
        rx: Scalar,
        ry: Scalar,
        samples: usize,
    ) -> Result<Self, Error> {
        if samples < 3 {
            return Err(Error::InvalidArgument {
                reason: format!("ellipse requires at least three samples, got {}", samples),
            });
        }
        let center = center.into();
        let step = 2.0 * PI / samples as Scalar;
        let mut path = Self::new((0..samples).map(|index| {
            let (sin, cos) = (index as Scalar * step).sin_cos();
            center + Point::new(rx * cos, ry * sin)
        }))?;
        path.set_anchor(center).close();
        Ok(path)
    }

    /// Closed circle approximated with `samples` points, anchored at its center
    pub fn circle(center: impl Into<Point>, radius: Scalar, samples: usize) -> Result<Self, Error> {
        Self::ellipse(center, radius, radius, samples)
    }

    /// Flattened cubic bezier curve
    pub fn cubic_bezier(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
        samples: usize,
    ) -> Result<Self, Error> {
        let cubic = Cubic::new(p0, p1, p2, p3);
        Self::new(cubic.flatten(samples))
    }

    /// Flattened quadratic bezier curve
    pub fn quadratic_bezier(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        samples: usize,
    ) -> Result<Self, Error> {
        let cubic = Cubic::from(Quad::new(p0, p1, p2));
        Self::new(cubic.flatten(samples))
    }

    /// Closed regular polygon inscribed into the circle of `radius`, anchored at `center`
    ///
    /// The polygon is rotated so that its bottom side is horizontal.
    pub fn regular_polygon(
        center: impl Into<Point>,
        sides: usize,
        radius: Scalar,
    ) -> Result<Self, Error> {
        if sides < 3 {
            return Err(Error::InvalidArgument {
                reason: format!("polygon requires at least three sides, got {}", sides),
            });
        }
        let center = center.into();
        let align = PI / 2.0 - PI / sides as Scalar;
        let mut path = Self::new((0..=sides).map(|index| {
            let angle = index as Scalar / sides as Scalar * 2.0 * PI + align;
            Point::polar(center, radius, angle)
        }))?;
        path.set_anchor(center);
        Ok(path)
    }

    /// Closed regular polygon with the given length of the side
    pub fn regular_polygon_from_side(
        center: impl Into<Point>,
        sides: usize,
        side: Scalar,
    ) -> Result<Self, Error> {
        let radius = 0.5 * side / (PI / sides as Scalar).sin();
        Self::regular_polygon(center, sides, radius)
    }

    /// Closed five-pointed star with outer points on the circle of `radius`
    pub fn star(center: impl Into<Point>, radius: Scalar) -> Result<Self, Error> {
        let center = center.into();
        let outer = Self::regular_polygon(center, 5, radius)?;
        let inner = Self::regular_polygon(center, 5, radius * STAR_INNER_RATIO)?
            .rotated(PI / 5.0, None);
        let mut points: Vec<Point> = outer
            .points()
            .iter()
            .zip(inner.points())
            .flat_map(|(outer, inner)| [*outer, *inner])
            .collect();
        // inner point after the closing outer point
        points.pop();
        let mut path = Self::new(points)?;
        path.set_anchor(center);
        Ok(path)
    }
}
