use crate::{BBox, EPSILON, PI, Point, Scalar, Transform, utils::solve_sin_cos};
use std::fmt;

/// Elliptic arc segment as it is written in SVG path data (endpoint parametrization)
#[derive(Clone, Copy, PartialEq)]
pub struct SvgArc {
    pub start: Point,
    /// radii along x and y axes before the rotation
    pub radii: Point,
    /// rotation of the x-axis of the ellipse in degrees
    pub x_axis_rot: Scalar,
    pub large: bool,
    pub sweep: bool,
    pub end: Point,
}

impl fmt::Debug for SvgArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc {:?} radii:{:?} rot:{:.3?} large:{} sweep:{} {:?}",
            self.start,
            self.radii,
            self.x_axis_rot,
            self.large as u8,
            self.sweep as u8,
            self.end
        )
    }
}

impl SvgArc {
    /// Convert to center parametrization, `None` if the arc degrades to a straight line
    pub fn to_ellip_arc(&self) -> Option<EllipArc> {
        EllipArc::new_param(
            self.start,
            self.end,
            self.radii.x(),
            self.radii.y(),
            self.x_axis_rot,
            self.large,
            self.sweep,
        )
    }

    /// Append `samples` points evenly spaced in angle along the arc to `out`
    ///
    /// The first and the last points are exactly `start` and `end`. Degenerate arcs
    /// (zero radius or coincident ends) are treated as a straight line.
    pub fn flatten(&self, samples: usize, out: &mut impl Extend<Point>) {
        match self.to_ellip_arc() {
            None => out.extend([self.start, self.end]),
            Some(arc) => {
                let samples = samples.max(2);
                let last = samples - 1;
                out.extend((0..samples).map(|index| {
                    if index == 0 {
                        self.start
                    } else if index == last {
                        self.end
                    } else {
                        arc.at(index as Scalar / last as Scalar)
                    }
                }));
            }
        }
    }
}

/// Elliptical Arc
#[derive(Clone, Copy, PartialEq)]
pub struct EllipArc {
    /// center of the ellipse
    center: Point,
    /// radius along x-axis before the rotation
    rx: Scalar,
    /// radius along y-axis before the rotation
    ry: Scalar,
    /// rotation
    phi: Scalar,
    /// angular start
    eta: Scalar,
    /// angular size
    eta_delta: Scalar,
}

impl fmt::Debug for EllipArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc center:{:?} radius:{:?} phi:{:.3?} eta:{:.3?} eta_delta:{:.3?}",
            self.center,
            Point([self.rx, self.ry]),
            self.phi,
            self.eta,
            self.eta_delta
        )
    }
}

impl EllipArc {
    /// Convert arc from SVG arguments to parametric curve
    ///
    /// This code mostly comes from arc implementation notes from svg sepc
    /// (Arc to Parametric)[https://www.w3.org/TR/SVG/implnote.html#ArcImplementationNotes]
    pub fn new_param(
        src: Point,
        dst: Point,
        rx: Scalar,
        ry: Scalar,
        x_axis_rot: Scalar,
        large_flag: bool,
        sweep_flag: bool,
    ) -> Option<Self> {
        let rx = rx.abs();
        let ry = ry.abs();
        if rx < EPSILON || ry < EPSILON || src.is_close_to(dst) {
            return None;
        }
        let phi = x_axis_rot * PI / 180.0;

        // Eq 5.1
        let Point([x1, y1]) = Transform::default().rotate(-phi).apply(0.5 * (src - dst));
        // scale/normalize radii
        let s = (x1 / rx).powi(2) + (y1 / ry).powi(2);
        let (rx, ry) = if s > 1.0 {
            let s = s.sqrt();
            (rx * s, ry * s)
        } else {
            (rx, ry)
        };
        // Eq 5.2
        let sq = ((rx * ry).powi(2) / ((rx * y1).powi(2) + (ry * x1).powi(2)) - 1.0)
            .max(0.0)
            .sqrt();
        let sq = if large_flag == sweep_flag { -sq } else { sq };
        let center = sq * Point([rx * y1 / ry, -ry * x1 / rx]);
        let Point([cx, cy]) = center;
        // Eq 5.3 convert center to initail coordinates
        let center = Transform::default().rotate(phi).apply(center) + 0.5 * (dst + src);
        // Eq 5.5-6
        let v0 = Point([1.0, 0.0]);
        let v1 = Point([(x1 - cx) / rx, (y1 - cy) / ry]);
        let v2 = Point([(-x1 - cx) / rx, (-y1 - cy) / ry]);
        // initial angle
        let eta = v0.angle_between(v1)?;
        //delta angle to be covered when t changes from 0..1
        let eta_delta = v1.angle_between(v2)?.rem_euclid(2.0 * PI);
        let eta_delta = if !sweep_flag && eta_delta > 0.0 {
            eta_delta - 2.0 * PI
        } else if sweep_flag && eta_delta < 0.0 {
            eta_delta + 2.0 * PI
        } else {
            eta_delta
        };

        Some(Self {
            center,
            rx,
            ry,
            phi,
            eta,
            eta_delta,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radii(&self) -> Point {
        Point([self.rx, self.ry])
    }

    /// Angular size of the arc, positive when the arc goes in the positive-angle direction
    pub fn sweep_angle(&self) -> Scalar {
        self.eta_delta
    }

    pub fn at(&self, t: Scalar) -> Point {
        let (angle_sin, angle_cos) = (self.eta + t * self.eta_delta).sin_cos();
        let point = Point([self.rx * angle_cos, self.ry * angle_sin]);
        Transform::default().rotate(self.phi).apply(point) + self.center
    }

    pub fn start(&self) -> Point {
        self.at(0.0)
    }

    pub fn end(&self) -> Point {
        self.at(1.0)
    }

    /// Parameter values at which the arc reaches its extremes along x or y axes
    ///
    /// With `eta(t) = eta + eta_delta * t`:
    ///   x'(eta) = -rx * sin(eta) * cos(phi) - ry * cos(eta) * sin(phi)
    ///   y'(eta) = -rx * sin(eta) * sin(phi) + ry * cos(eta) * cos(phi)
    pub fn extremities(&self) -> Vec<Scalar> {
        let (phi_sin, phi_cos) = self.phi.sin_cos();
        let mut params = solve_sin_cos(
            -self.rx * phi_cos,
            -self.ry * phi_sin,
            self.eta,
            self.eta_delta,
        );
        params.extend(solve_sin_cos(
            -self.rx * phi_sin,
            self.ry * phi_cos,
            self.eta,
            self.eta_delta,
        ));
        params.sort_by(|t0, t1| t0.total_cmp(t1));
        params
    }

    /// Extend provided `init` bounding box with the bounding box of the arc
    pub fn bbox(&self, init: Option<BBox>) -> BBox {
        let bbox = self
            .extremities()
            .into_iter()
            .fold(BBox::new(self.start(), self.end()), |bbox, t| {
                bbox.extend(self.at(t))
            });
        match init {
            Some(init) => init.union(bbox),
            None => bbox,
        }
    }

    pub fn reverse(&self) -> Self {
        Self {
            center: self.center,
            rx: self.rx,
            ry: self.ry,
            phi: self.phi,
            eta: self.eta + self.eta_delta,
            eta_delta: -self.eta_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    fn half_circle(sweep: bool) -> SvgArc {
        SvgArc {
            start: Point::new(0.0, 0.0),
            radii: Point::new(5.0, 5.0),
            x_axis_rot: 0.0,
            large: false,
            sweep,
            end: Point::new(10.0, 0.0),
        }
    }

    #[test]
    fn test_arc_param() {
        let arc = half_circle(true).to_ellip_arc().unwrap();
        assert!(arc.center().is_close_to(Point::new(5.0, 0.0)));
        assert!(arc.start().dist(Point::new(0.0, 0.0)) < 1e-9);
        assert!(arc.end().dist(Point::new(10.0, 0.0)) < 1e-9);
        assert_approx_eq!(arc.sweep_angle().abs(), PI, 1e-9);
        // sweep flag set means positive angle direction, so the arc passes through y = -5
        let mid = arc.at(0.5);
        assert_approx_eq!(mid.x(), 5.0, 1e-9);
        assert_approx_eq!(mid.y(), -5.0, 1e-9);

        let arc = half_circle(false).to_ellip_arc().unwrap();
        assert_approx_eq!(arc.at(0.5).y(), 5.0, 1e-9);

        let rev = arc.reverse();
        assert!(rev.start().dist(arc.end()) < 1e-9);
        assert!(rev.end().dist(arc.start()) < 1e-9);
    }

    #[test]
    fn test_arc_radii_scaled() {
        // radii too small to connect the ends are scaled up uniformly
        let arc = SvgArc {
            radii: Point::new(1.0, 1.0),
            ..half_circle(true)
        };
        let arc = arc.to_ellip_arc().unwrap();
        assert_approx_eq!(arc.radii().x(), 5.0, 1e-9);
        assert!(arc.end().dist(Point::new(10.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_arc_degenerate() {
        let arc = SvgArc {
            radii: Point::new(0.0, 5.0),
            ..half_circle(true)
        };
        assert!(arc.to_ellip_arc().is_none());
        let mut points = Vec::new();
        arc.flatten(10, &mut points);
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        let arc = SvgArc {
            end: Point::new(0.0, 0.0),
            ..half_circle(true)
        };
        assert!(arc.to_ellip_arc().is_none());
    }

    #[test]
    fn test_arc_flatten() {
        let arc = half_circle(false);
        let mut points = Vec::new();
        arc.flatten(9, &mut points);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], arc.start);
        assert_eq!(points[8], arc.end);
        for point in points.iter() {
            assert_approx_eq!(point.dist(Point::new(5.0, 0.0)), 5.0, 1e-9);
        }
        // evenly spaced in angle: consecutive chords are equal
        let chords: Vec<_> = points.windows(2).map(|p| p[0].dist(p[1])).collect();
        for chord in chords.iter() {
            assert_approx_eq!(chord, chords[0], 1e-9);
        }
    }

    #[test]
    fn test_arc_bbox() {
        let arc = half_circle(false).to_ellip_arc().unwrap();
        let bbox = arc.bbox(None);
        assert_approx_eq!(bbox.x(), 0.0, 1e-9);
        assert_approx_eq!(bbox.y(), 0.0, 1e-9);
        assert_approx_eq!(bbox.width(), 10.0, 1e-9);
        assert_approx_eq!(bbox.height(), 5.0, 1e-9);

        // rotated ellipse quarter: extremes are found inside of the arc
        let arc = EllipArc::new_param(
            Point::new(10.0, 0.0),
            Point::new(0.0, 5.0),
            10.0,
            5.0,
            0.0,
            false,
            true,
        )
        .unwrap();
        let bbox = arc.bbox(None);
        assert_approx_eq!(bbox.max().x(), 10.0, 1e-9);
        assert_approx_eq!(bbox.max().y(), 5.0, 1e-9);
        let params = arc.extremities();
        assert!(params.iter().all(|t| (0.0..=1.0).contains(t)));
    }
}
