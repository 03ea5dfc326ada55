//! Small 2D library that turns SVG path data or point lists into flattened mutable
//! polylines and provides geometry needed to animate them.
//!
//! Main features:
//!  - SVG path data parsing (all commands including elliptic arcs)
//!  - Anchor relative translation, rotation and scale
//!  - Arc-length sampling, tangents and point insertion
//!  - Easing curves for animation timing
//!  - Preset shapes and a recording render sink
//!

mod color;
mod curve;
mod ease;
mod ellipse;
mod geometry;
mod path;
mod render;
mod shapes;
mod svg;
mod utils;

pub use color::{ColorError, RGBA};
pub use curve::{Cubic, DEFAULT_SAMPLES, Line, Quad, Segment};
pub use ease::{BACK_OVERSHOOT, EaseCurve, Easing};
pub use ellipse::{EllipArc, SvgArc};
pub use geometry::{BBox, EPSILON, PI, Point, Scalar, Transform, scalar_fmt};
pub use path::{Error, Path, flatten_segments};
pub use render::{
    Animation, DEFAULT_THICKNESS, DrawCmd, DrawStyle, Frame, RenderSink, Session,
};
pub use svg::{SegmentResolver, SvgPathCmd, SvgPathTokenizer, parse_segments};
pub use utils::{is_close, lerp, linspace, map_range};
