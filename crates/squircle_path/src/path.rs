//! Path building and serialization

use std::fmt::Write;

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Path command
///
/// Outlines are closed shapes made of straight edges and cubic corner
/// curves, so only the M/L/C/Z verbs exist here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Calculate the bounding box of this path as (min, max) corners
    ///
    /// Control points are included, so the box is conservative for curves.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        if self.commands.is_empty() {
            return None;
        }

        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);

        let mut include = |p: &Point| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::Close => {}
            }
        }

        if min.x.is_finite() && min.y.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Serialize as SVG path data (`M`/`L`/`C`/`Z` commands)
    ///
    /// The output is a pure function of the command list, so identical paths
    /// always serialize to identical strings.
    pub fn to_path_data(&self) -> String {
        let mut data = String::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                data.push(' ');
            }
            match cmd {
                PathCommand::MoveTo(p) => {
                    let _ = write!(data, "M {} {}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(data, "L {} {}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    let _ = write!(
                        data,
                        "C {} {} {} {} {} {}",
                        fmt_coord(control1.x),
                        fmt_coord(control1.y),
                        fmt_coord(control2.x),
                        fmt_coord(control2.y),
                        fmt_coord(end.x),
                        fmt_coord(end.y)
                    );
                }
                PathCommand::Close => data.push('Z'),
            }
        }
        data
    }
}

/// Format a coordinate with at most three decimal places, trimming trailing
/// zeros so round values serialize as plain integers.
fn fmt_coord(value: f32) -> String {
    let mut s = format!("{value:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    // Normalize negative zero
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        let end = Point::new(x, y);
        self.path.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end,
        });
        self.current = end;
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
