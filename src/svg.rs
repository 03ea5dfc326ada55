//! SVG path parser
//!
//! See [SVG Path Specification](https://www.w3.org/TR/SVG11/paths.html#PathData)
//!
//! Parsing happens in two stages: [`SvgPathTokenizer`] splits text into commands with
//! raw arguments, [`SegmentResolver`] folds those commands into absolute [`Segment`]s.
use crate::{Cubic, Error, Line, Point, Quad, Scalar, Segment, SvgArc};

/// SVG path command with its raw arguments, as it is written in the path data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvgPathCmd {
    MoveTo {
        relative: bool,
        dst: Point,
    },
    Close {
        relative: bool,
    },
    LineTo {
        relative: bool,
        dst: Point,
    },
    HLineTo {
        relative: bool,
        x: Scalar,
    },
    VLineTo {
        relative: bool,
        y: Scalar,
    },
    CubicTo {
        relative: bool,
        c1: Point,
        c2: Point,
        dst: Point,
    },
    SmoothCubicTo {
        relative: bool,
        c2: Point,
        dst: Point,
    },
    QuadTo {
        relative: bool,
        c1: Point,
        dst: Point,
    },
    SmoothQuadTo {
        relative: bool,
        dst: Point,
    },
    ArcTo {
        relative: bool,
        radii: Point,
        x_axis_rot: Scalar,
        large: bool,
        sweep: bool,
        dst: Point,
    },
}

impl SvgPathCmd {
    /// Whether arguments are relative to the current position
    pub fn relative(&self) -> bool {
        use SvgPathCmd::*;
        match *self {
            MoveTo { relative, .. }
            | Close { relative }
            | LineTo { relative, .. }
            | HLineTo { relative, .. }
            | VLineTo { relative, .. }
            | CubicTo { relative, .. }
            | SmoothCubicTo { relative, .. }
            | QuadTo { relative, .. }
            | SmoothQuadTo { relative, .. }
            | ArcTo { relative, .. } => relative,
        }
    }

    /// Command letter, lower case for relative commands
    pub fn letter(&self) -> char {
        use SvgPathCmd::*;
        let letter = match self {
            MoveTo { .. } => 'M',
            Close { .. } => 'Z',
            LineTo { .. } => 'L',
            HLineTo { .. } => 'H',
            VLineTo { .. } => 'V',
            CubicTo { .. } => 'C',
            SmoothCubicTo { .. } => 'S',
            QuadTo { .. } => 'Q',
            SmoothQuadTo { .. } => 'T',
            ArcTo { .. } => 'A',
        };
        if self.relative() {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }
}

/// Lazy tokenizer of SVG path data
///
/// Yields one command per argument group, implicitly repeated commands are yielded
/// as separate commands (repeated move-to becomes line-to). Iteration stops after the
/// first error.
#[derive(Debug)]
pub struct SvgPathTokenizer<'a> {
    // text containing unparsed path
    text: &'a [u8],
    // current offset in the text
    offset: usize,
    // command repeated when numeric data follows a complete argument group
    repeat: Option<u8>,
    // at least one command has been parsed
    started: bool,
    // end of input, error or truncated trailing data
    done: bool,
}

impl<'a> SvgPathTokenizer<'a> {
    pub fn new(text: &'a (impl AsRef<[u8]> + ?Sized)) -> Self {
        Self {
            text: text.as_ref(),
            offset: 0,
            repeat: None,
            started: false,
            done: false,
        }
    }

    /// Offset of the first unconsumed byte
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Error construction helper
    fn error<S: Into<String>>(&self, reason: S) -> Error {
        Error::Grammar {
            offset: self.offset,
            reason: reason.into(),
        }
    }

    /// Byte at the current position
    fn current(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    /// Advance current position by `count` bytes
    fn advance(&mut self, count: usize) {
        self.offset += count;
    }

    /// Consume insignificant separators
    fn parse_separators(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n' | b',') = self.current() {
            self.advance(1);
        }
    }

    /// Consume digits, returns true if at least one digit was found
    fn parse_digits(&mut self) -> bool {
        let start = self.offset;
        while let Some(b'0'..=b'9') = self.current() {
            self.advance(1);
        }
        self.offset > start
    }

    /// Consume `+|-` sign
    fn parse_sign(&mut self) {
        if let Some(b'-' | b'+') = self.current() {
            self.advance(1);
        }
    }

    /// Parse single scalar
    ///
    /// Greedy `[sign]digits[.digits][(e|E)[sign]digits]`, so `1.5.5` is `1.5` followed
    /// by `.5` and `1-2` is `1` followed by `-2`.
    fn parse_scalar(&mut self) -> Result<Scalar, Error> {
        self.parse_separators();
        let start = self.offset;
        self.parse_sign();
        let whole = self.parse_digits();
        let fraction = match self.current() {
            Some(b'.') => {
                self.advance(1);
                self.parse_digits()
            }
            _ => false,
        };
        if !whole && !fraction {
            let error = self.error("failed to parse scalar");
            self.offset = start;
            return Err(error);
        }
        if let Some(b'e' | b'E') = self.current() {
            let mark = self.offset;
            self.advance(1);
            self.parse_sign();
            if !self.parse_digits() {
                // not an exponent, leave it for the next token
                self.offset = mark;
            }
        }
        let digits = match self.text[start] {
            b'+' => &self.text[start + 1..self.offset],
            _ => &self.text[start..self.offset],
        };
        let value = lexical_core::parse::<Scalar>(digits).map_err(|_| Error::Grammar {
            offset: start,
            reason: "failed to parse scalar".to_owned(),
        })?;
        if !value.is_finite() {
            return Err(Error::Grammar {
                offset: start,
                reason: "scalar is out of range".to_owned(),
            });
        }
        Ok(value)
    }

    /// Parse non-negative scalar
    fn parse_unsigned(&mut self) -> Result<Scalar, Error> {
        let start = self.offset;
        let value = self.parse_scalar()?;
        if value < 0.0 {
            return Err(Error::Grammar {
                offset: start,
                reason: format!("expected a non-negative number, got {}", value),
            });
        }
        Ok(value)
    }

    /// Parse pair of scalars
    fn parse_point(&mut self) -> Result<Point, Error> {
        let x = self.parse_scalar()?;
        let y = self.parse_scalar()?;
        Ok(Point([x, y]))
    }

    /// Parse SVG flag `0|1` used by elliptic arc command
    fn parse_flag(&mut self) -> Result<bool, Error> {
        self.parse_separators();
        match self.current() {
            Some(b'0') => {
                self.advance(1);
                Ok(false)
            }
            Some(b'1') => {
                self.advance(1);
                Ok(true)
            }
            _ => Err(self.error("failed to parse flag")),
        }
    }

    /// Parse full argument group of the command
    fn parse_args(&mut self, cmd: u8) -> Result<SvgPathCmd, Error> {
        let relative = cmd.is_ascii_lowercase();
        let cmd = match cmd.to_ascii_uppercase() {
            b'M' => SvgPathCmd::MoveTo {
                relative,
                dst: self.parse_point()?,
            },
            b'Z' => SvgPathCmd::Close { relative },
            b'L' => SvgPathCmd::LineTo {
                relative,
                dst: self.parse_point()?,
            },
            b'H' => SvgPathCmd::HLineTo {
                relative,
                x: self.parse_scalar()?,
            },
            b'V' => SvgPathCmd::VLineTo {
                relative,
                y: self.parse_scalar()?,
            },
            b'C' => SvgPathCmd::CubicTo {
                relative,
                c1: self.parse_point()?,
                c2: self.parse_point()?,
                dst: self.parse_point()?,
            },
            b'S' => SvgPathCmd::SmoothCubicTo {
                relative,
                c2: self.parse_point()?,
                dst: self.parse_point()?,
            },
            b'Q' => SvgPathCmd::QuadTo {
                relative,
                c1: self.parse_point()?,
                dst: self.parse_point()?,
            },
            b'T' => SvgPathCmd::SmoothQuadTo {
                relative,
                dst: self.parse_point()?,
            },
            b'A' => {
                let rx = self.parse_unsigned()?;
                let ry = self.parse_unsigned()?;
                let x_axis_rot = self.parse_scalar()?;
                let large = self.parse_flag()?;
                let sweep = self.parse_flag()?;
                let dst = self.parse_point()?;
                SvgPathCmd::ArcTo {
                    relative,
                    radii: Point([rx, ry]),
                    x_axis_rot,
                    large,
                    sweep,
                    dst,
                }
            }
            _ => return Err(self.error("failed to parse path cmd")),
        };
        Ok(cmd)
    }

    /// Parse single SVG path command from the input, none indicates end of input
    pub fn parse_cmd(&mut self) -> Result<Option<SvgPathCmd>, Error> {
        if self.done {
            return Ok(None);
        }
        self.parse_separators();
        let byte = match self.current() {
            None => {
                self.done = true;
                return Ok(None);
            }
            Some(byte) => byte,
        };
        let explicit = matches!(
            byte,
            b'M' | b'm' | b'Z' | b'z' | b'L' | b'l' | b'H' | b'h' | b'V' | b'v' | b'C' | b'c'
                | b'S' | b's' | b'Q' | b'q' | b'T' | b't' | b'A' | b'a'
        );
        let cmd = if explicit {
            if !self.started && !matches!(byte, b'M' | b'm') {
                self.done = true;
                return Err(self.error("path must start with a move-to command"));
            }
            self.advance(1);
            byte
        } else {
            match self.repeat {
                Some(cmd) => cmd,
                None => {
                    self.done = true;
                    return Err(if self.started {
                        self.error(format!("unexpected byte {:?}", byte as char))
                    } else {
                        self.error("path must start with a move-to command")
                    });
                }
            }
        };
        self.started = true;
        match self.parse_args(cmd) {
            Ok(parsed) => {
                self.repeat = match cmd {
                    b'M' => Some(b'L'),
                    b'm' => Some(b'l'),
                    b'Z' | b'z' => None,
                    cmd => Some(cmd),
                };
                Ok(Some(parsed))
            }
            Err(error) => {
                self.done = true;
                if explicit {
                    Err(error)
                } else {
                    // malformed implicit continuation: the rest is ignored
                    tracing::debug!(
                        offset = self.offset,
                        "[svg] discarding trailing path data: {}",
                        String::from_utf8_lossy(&self.text[self.offset..])
                    );
                    self.offset = self.text.len();
                    Ok(None)
                }
            }
        }
    }
}

impl Iterator for SvgPathTokenizer<'_> {
    type Item = Result<SvgPathCmd, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_cmd().transpose()
    }
}

/// Previous curve reflected by the next smooth command
#[derive(Debug, Clone, Copy, PartialEq)]
enum Smooth {
    None,
    /// previous cubic (`C` or `S`)
    Cubic(Cubic),
    /// previous quadratic before elevation (`Q` or `T`)
    Quad(Quad),
}

/// Folds SVG commands into absolute segments
///
/// Move-to and close commands only update the position, so they produce no segments.
#[derive(Debug)]
pub struct SegmentResolver<I> {
    cmds: I,
    // current position from which next segment will start
    position: Point,
    // current sub-path starting position
    subpath_start: Point,
    // control point of the previous command used to determine smooth points
    smooth: Smooth,
}

impl<I> SegmentResolver<I> {
    pub fn new(cmds: I) -> Self {
        Self {
            cmds,
            position: Point::new(0.0, 0.0),
            subpath_start: Point::new(0.0, 0.0),
            smooth: Smooth::None,
        }
    }

    /// Current position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Resolve a single command, updating position and smooth state
    pub fn resolve(&mut self, cmd: SvgPathCmd) -> Option<Segment> {
        use SvgPathCmd::*;
        let p0 = self.position;
        let abs = |relative: bool, point: Point| if relative { point + p0 } else { point };
        let (segment, smooth): (Option<Segment>, Smooth) = match cmd {
            MoveTo { relative, dst } => {
                self.position = abs(relative, dst);
                self.subpath_start = self.position;
                (None, Smooth::None)
            }
            Close { .. } => {
                self.position = self.subpath_start;
                (None, Smooth::None)
            }
            LineTo { relative, dst } => {
                let line = Line::new(p0, abs(relative, dst));
                (Some(line.into()), Smooth::None)
            }
            HLineTo { relative, x } => {
                let x = if relative { p0.x() + x } else { x };
                (Some(Line::new(p0, (x, p0.y())).into()), Smooth::None)
            }
            VLineTo { relative, y } => {
                let y = if relative { p0.y() + y } else { y };
                (Some(Line::new(p0, (p0.x(), y)).into()), Smooth::None)
            }
            CubicTo {
                relative,
                c1,
                c2,
                dst,
            } => {
                let cubic = Cubic::new(
                    p0,
                    abs(relative, c1),
                    abs(relative, c2),
                    abs(relative, dst),
                );
                (Some(cubic.into()), Smooth::Cubic(cubic))
            }
            SmoothCubicTo { relative, c2, dst } => {
                let c1 = match self.smooth {
                    Smooth::Cubic(prev) => prev.smooth(),
                    _ => p0,
                };
                let cubic = Cubic::new(p0, c1, abs(relative, c2), abs(relative, dst));
                (Some(cubic.into()), Smooth::Cubic(cubic))
            }
            QuadTo { relative, c1, dst } => {
                let quad = Quad::new(p0, abs(relative, c1), abs(relative, dst));
                (Some(quad.into()), Smooth::Quad(quad))
            }
            SmoothQuadTo { relative, dst } => {
                let c1 = match self.smooth {
                    Smooth::Quad(prev) => prev.smooth(),
                    _ => p0,
                };
                let quad = Quad::new(p0, c1, abs(relative, dst));
                (Some(quad.into()), Smooth::Quad(quad))
            }
            ArcTo {
                relative,
                radii,
                x_axis_rot,
                large,
                sweep,
                dst,
            } => {
                let arc = SvgArc {
                    start: p0,
                    radii,
                    x_axis_rot,
                    large,
                    sweep,
                    end: abs(relative, dst),
                };
                (Some(arc.into()), Smooth::None)
            }
        };
        if let Some(segment) = segment {
            self.position = segment.end();
        }
        self.smooth = smooth;
        segment
    }
}

impl<I> Iterator for SegmentResolver<I>
where
    I: Iterator<Item = Result<SvgPathCmd, Error>>,
{
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cmds.next()? {
                Err(error) => return Some(Err(error)),
                Ok(cmd) => {
                    if let Some(segment) = self.resolve(cmd) {
                        return Some(Ok(segment));
                    }
                }
            }
        }
    }
}

/// Parse SVG path data into a list of absolute segments
pub fn parse_segments(text: impl AsRef<[u8]>) -> Result<Vec<Segment>, Error> {
    SegmentResolver::new(SvgPathTokenizer::new(text.as_ref())).collect()
}
