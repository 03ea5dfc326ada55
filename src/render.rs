//! Drawing interface between paths and an external renderer
//!
//! [`RenderSink`] receives copies of the path points, so mutating a path after it was
//! drawn never affects already issued draw calls. [`Session`] is an in-memory sink that
//! records frames of an animation.
use crate::{BBox, Path, Point, RGBA, Scalar};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default stroke thickness
pub const DEFAULT_THICKNESS: Scalar = 1.5;

/// Fill and stroke parameters of a draw call, `None` color disables fill or stroke
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrawStyle {
    pub fill: Option<RGBA>,
    pub stroke: Option<RGBA>,
    pub thickness: Scalar,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: Some(RGBA::gray(0x18)),
            stroke: Some(RGBA::gray(128)),
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl DrawStyle {
    /// Style with neither fill nor stroke
    pub fn none() -> Self {
        Self {
            fill: None,
            stroke: None,
            thickness: DEFAULT_THICKNESS,
        }
    }

    pub fn with_fill(self, fill: impl Into<Option<RGBA>>) -> Self {
        Self {
            fill: fill.into(),
            ..self
        }
    }

    pub fn with_stroke(self, stroke: impl Into<Option<RGBA>>) -> Self {
        Self {
            stroke: stroke.into(),
            ..self
        }
    }

    pub fn with_thickness(self, thickness: Scalar) -> Self {
        Self { thickness, ..self }
    }
}

/// Receiver of draw calls
pub trait RenderSink {
    /// Draw polyline, `closed` polylines are drawn as polygons
    fn draw_path(&mut self, points: &[Point], style: &DrawStyle, closed: bool);

    /// Draw axis aligned ellipse
    fn draw_ellipse(&mut self, center: Point, rx: Scalar, ry: Scalar, style: &DrawStyle);

    fn draw_circle(&mut self, center: Point, radius: Scalar, style: &DrawStyle) {
        self.draw_ellipse(center, radius, radius, style)
    }

    fn draw_line(&mut self, start: Point, end: Point, style: &DrawStyle) {
        self.draw_path(&[start, end], style, false)
    }

    /// Draw axis aligned rectangle with the upper-left corner at `origin`
    fn draw_rect(&mut self, origin: Point, width: Scalar, height: Scalar, style: &DrawStyle) {
        let Point([x, y]) = origin;
        let corners = [
            origin,
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        self.draw_path(&corners, style, true)
    }

    fn draw_bbox(&mut self, bbox: BBox, style: &DrawStyle) {
        self.draw_rect(bbox.min(), bbox.width(), bbox.height(), style)
    }
}

/// Recorded draw call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum DrawCmd {
    Path {
        points: Vec<Point>,
        style: DrawStyle,
        closed: bool,
    },
    Ellipse {
        center: Point,
        rx: Scalar,
        ry: Scalar,
        style: DrawStyle,
    },
}

/// Background color and the draw calls of a single frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub background: RGBA,
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(background: RGBA) -> Self {
        Self {
            background,
            cmds: Vec::new(),
        }
    }
}

impl RenderSink for Frame {
    fn draw_path(&mut self, points: &[Point], style: &DrawStyle, closed: bool) {
        self.cmds.push(DrawCmd::Path {
            points: points.to_vec(),
            style: *style,
            closed,
        });
    }

    fn draw_ellipse(&mut self, center: Point, rx: Scalar, ry: Scalar, style: &DrawStyle) {
        self.cmds.push(DrawCmd::Ellipse {
            center,
            rx,
            ry,
            style: *style,
        });
    }
}

/// Drawing session: a canvas of fixed size and a list of captured frames
#[derive(Debug, Clone)]
pub struct Session {
    width: usize,
    height: usize,
    background: RGBA,
    current: Frame,
    frames: Vec<Frame>,
}

impl Session {
    /// Create session with black background
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_background(width, height, RGBA::gray(0))
    }

    pub fn with_background(width: usize, height: usize, background: RGBA) -> Self {
        Self {
            width,
            height,
            background,
            current: Frame::new(background),
            frames: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Frame currently being drawn
    pub fn current(&self) -> &Frame {
        &self.current
    }

    /// Frames captured so far
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Drop all draw calls of the current frame and fill it with `background`
    /// (session background if not provided)
    pub fn clear(&mut self, background: Option<RGBA>) -> &mut Self {
        self.current = Frame::new(background.unwrap_or(self.background));
        self
    }

    /// Capture a copy of the current frame, drawing continues on top of it
    pub fn append_frame(&mut self) -> &mut Self {
        self.frames.push(self.current.clone());
        tracing::trace!(
            frame = self.frames.len(),
            cmds = self.current.cmds.len(),
            "[session] frame appended"
        );
        self
    }

    /// Finish session and return captured frames
    pub fn finish(self) -> Animation {
        tracing::debug!(frames = self.frames.len(), "[session] finished");
        Animation {
            width: self.width,
            height: self.height,
            frames: self.frames,
        }
    }
}

impl RenderSink for Session {
    fn draw_path(&mut self, points: &[Point], style: &DrawStyle, closed: bool) {
        self.current.draw_path(points, style, closed)
    }

    fn draw_ellipse(&mut self, center: Point, rx: Scalar, ry: Scalar, style: &DrawStyle) {
        self.current.draw_ellipse(center, rx, ry, style)
    }
}

/// Captured frames of a finished session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Animation {
    pub width: usize,
    pub height: usize,
    pub frames: Vec<Frame>,
}

impl Animation {
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Path {
    /// Draw path with the provided style, closed paths are drawn as polygons
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S, style: &DrawStyle) -> &Self {
        sink.draw_path(self.points(), style, self.is_closed());
        self
    }

    /// Draw path outline with a marker of `radius` at each point
    ///
    /// The start marker is deepskyblue and the second one is lightgreen, which shows
    /// direction of the path.
    pub fn draw_debug<S: RenderSink + ?Sized>(&self, sink: &mut S, radius: Scalar) -> &Self {
        let outline = DrawStyle::default()
            .with_fill(RGBA::gray(80))
            .with_stroke(RGBA::gray(255));
        sink.draw_path(self.points(), &outline, self.is_closed());
        let marker = |color: RGBA| DrawStyle::none().with_fill(color);
        for point in self.points().iter().skip(2) {
            sink.draw_circle(*point, radius, &marker(RGBA::gray(128)));
        }
        sink.draw_circle(self.points()[0], radius, &marker(RGBA::new(0, 191, 255, 255)));
        sink.draw_circle(self.points()[1], radius, &marker(RGBA::new(144, 238, 144, 255)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_draw_copies_points() -> Result<(), Error> {
        let mut session = Session::new(100, 100);
        let mut path = Path::line((0.0, 0.0), (10.0, 0.0))?;
        path.draw(&mut session, &DrawStyle::default());
        path.translate(5.0, 5.0);
        path.draw(&mut session, &DrawStyle::default());

        let cmds = &session.current().cmds;
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            DrawCmd::Path { points, closed, .. } => {
                assert_eq!(points, &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
                assert!(!closed);
            }
            cmd => panic!("unexpected draw command: {:?}", cmd),
        }
        match &cmds[1] {
            DrawCmd::Path { points, .. } => assert_eq!(points[0], Point::new(5.0, 5.0)),
            cmd => panic!("unexpected draw command: {:?}", cmd),
        }
        Ok(())
    }

    #[test]
    fn test_closed_path() -> Result<(), Error> {
        let mut frame = Frame::new(RGBA::gray(0));
        Path::rectangle((0.0, 0.0), 2.0, 2.0)?.draw(&mut frame, &DrawStyle::none());
        assert!(matches!(frame.cmds[0], DrawCmd::Path { closed: true, .. }));
        Ok(())
    }

    #[test]
    fn test_draw_rect() {
        let mut frame = Frame::new(RGBA::gray(0));
        let style = DrawStyle::none().with_stroke(RGBA::gray(255));
        frame.draw_rect(Point::new(1.0, 2.0), 3.0, 4.0, &style);
        frame.draw_bbox(BBox::new((4.0, 6.0), (1.0, 2.0)), &style);

        let corners = vec![
            Point::new(1.0, 2.0),
            Point::new(4.0, 2.0),
            Point::new(4.0, 6.0),
            Point::new(1.0, 6.0),
        ];
        let expected = DrawCmd::Path {
            points: corners,
            style,
            closed: true,
        };
        assert_eq!(frame.cmds, vec![expected.clone(), expected]);
    }

    #[test]
    fn test_draw_debug() -> Result<(), Error> {
        let mut frame = Frame::new(RGBA::gray(0));
        let path = Path::new([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])?;
        path.draw_debug(&mut frame, 3.0);
        // outline and one marker per point
        assert_eq!(frame.cmds.len(), 5);
        let markers: Vec<_> = frame
            .cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Ellipse { center, style, .. } => Some((*center, style.fill)),
                _ => None,
            })
            .collect();
        assert_eq!(
            markers[2],
            (Point::new(0.0, 0.0), RGBA::from_name("deepskyblue"))
        );
        assert_eq!(
            markers[3],
            (Point::new(1.0, 0.0), RGBA::from_name("lightgreen"))
        );
        Ok(())
    }

    #[test]
    fn test_session_frames() -> Result<(), Error> {
        let mut session = Session::with_background(64, 32, RGBA::gray(255));
        let path = Path::circle((32.0, 16.0), 8.0, 12)?;
        for step in 0..3 {
            session.clear(None);
            path.translated(step as Scalar, 0.0)
                .draw(&mut session, &DrawStyle::default());
            session.draw_circle(Point::new(0.0, 0.0), 1.0, &DrawStyle::default());
            session.append_frame();
        }
        session.clear(Some(RGBA::gray(0)));
        assert!(session.current().cmds.is_empty());
        assert_eq!(session.current().background, RGBA::gray(0));

        let animation = session.finish();
        assert_eq!(animation.frames.len(), 3);
        assert!(animation.frames.iter().all(|frame| frame.cmds.len() == 2));
        assert_eq!(animation.frames[0].background, RGBA::gray(255));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_animation_json() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::new(10, 10);
        Path::line((0.0, 0.0), (1.0, 1.0))?.draw(&mut session, &DrawStyle::none());
        session.append_frame();
        let animation = session.finish();
        let json = animation.to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["width"], 10);
        assert_eq!(value["frames"][0]["background"], "#000000");
        assert_eq!(value["frames"][0]["cmds"][0]["type"], "path");
        assert_eq!(
            value["frames"][0]["cmds"][0]["points"],
            serde_json::json!([[0.0, 0.0], [1.0, 1.0]])
        );
        let parsed: Animation = serde_json::from_str(&json)?;
        assert_eq!(parsed, animation);
        Ok(())
    }
}
