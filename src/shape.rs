//! Typed shape descriptors produced by the parser.
//!
//! One variant per supported element; attribute values stay in source units
//! (SVG user space, y-down). The normalizer is the only consumer.

/// A parsed shape primitive, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline {
        points: Vec<(f64, f64)>,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    Path {
        commands: Vec<PathCommand>,
    },
}

impl Shape {
    /// Element name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Line { .. } => "line",
            Shape::Polyline { .. } => "polyline",
            Shape::Polygon { .. } => "polygon",
            Shape::Path { .. } => "path",
        }
    }
}

/// One command of the `d` attribute mini-language.
///
/// Repeated argument groups are expanded at parse time, so every value here
/// is a single drawing step. `abs` is taken from the command letter's case;
/// extra coordinate pairs after a move parse as line commands (SVG rule).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        abs: bool,
        to: (f64, f64),
    },
    LineTo {
        abs: bool,
        to: (f64, f64),
    },
    HorizontalTo {
        abs: bool,
        x: f64,
    },
    VerticalTo {
        abs: bool,
        y: f64,
    },
    CurveTo {
        abs: bool,
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
    QuadTo {
        abs: bool,
        ctrl: (f64, f64),
        to: (f64, f64),
    },
    ArcTo {
        abs: bool,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: (f64, f64),
    },
    Close,
}

/// A parsed document: declared dimensions plus shapes in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    /// Declared width in user units (unit suffix stripped)
    pub width: f64,
    /// Declared height in user units
    pub height: f64,
    pub shapes: Vec<Shape>,
}
