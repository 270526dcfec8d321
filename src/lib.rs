//! plotpath converts restricted SVG line art into machine motion commands.
//!
//! The pipeline is a straight line: parse the markup into typed shapes,
//! normalize every shape into cubic Bezier subpaths, flatten the curves
//! into polylines within a flatness tolerance, map source coordinates
//! onto the device bed (uniform scale, y flip), and emit a travel /
//! engage / draw / disengage command sequence rendered through
//! configurable G-code templates.
//!
//! ```
//! use plotpath::{render, Config};
//!
//! let markup = r#"<svg width="100" height="100">
//!   <rect x="10" y="10" width="80" height="80"/>
//! </svg>"#;
//! let gcode = render(markup, &Config::default()).unwrap();
//! assert!(gcode.contains("G1 X90.000 Y90.000"));
//! ```

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "svg.pest"]
pub struct SvgParser;

pub mod device;
pub mod emit;
pub mod errors;
pub mod eval;
pub mod flatten;
pub mod log;
pub mod normalize;
pub mod parse;
pub mod shape;
pub mod types;

pub use device::{BoundsPolicy, BoundsWarning, Config, Mapper};
pub use emit::{DeviceStroke, MotionCommand, MotionKind, ToolpathDocument};
pub use errors::{ConvertError, ErrorClass};
pub use eval::{toolpath_deviation, Deviation, DeviationError};
pub use shape::{PathCommand, Shape, SvgDocument};
pub use types::{Mm, Point, PtDev, PtSrc, SourceUnit, Tolerance};

/// Convert markup text into a toolpath.
///
/// The document's declared height drives the y flip; its width is only
/// used when a caller computes a fit scale.
pub fn convert(markup: &str, config: &Config) -> Result<ToolpathDocument, ConvertError> {
    let document = parse::parse(markup)?;
    convert_shapes(&document.shapes, document.height, config)
}

/// Convert an already-parsed shape list into a toolpath.
///
/// `source_height` is the source canvas height in user units, the
/// reference line for the y flip.
pub fn convert_shapes(
    shapes: &[Shape],
    source_height: f64,
    config: &Config,
) -> Result<ToolpathDocument, ConvertError> {
    let subpaths = normalize::normalize(shapes)?;
    let polylines = flatten::flatten(&subpaths, config.tolerance)?;

    let mapper = Mapper::new(config, source_height);
    let mut warnings = Vec::new();
    let mut strokes = Vec::with_capacity(polylines.len());
    for polyline in polylines {
        let mut vertices = Vec::with_capacity(polyline.vertices.len());
        for &v in &polyline.vertices {
            let (mapped, warning) = mapper.map(polyline.shape_index, v)?;
            if let Some(warning) = warning {
                warnings.push(warning);
            }
            vertices.push(mapped);
        }
        strokes.push(DeviceStroke {
            shape_index: polyline.shape_index,
            vertices,
        });
    }

    Ok(emit::emit(&strokes, warnings))
}

/// Convert markup and render it straight to command text.
pub fn render(markup: &str, config: &Config) -> Result<String, ConvertError> {
    Ok(convert(markup, config)?.render(config))
}
