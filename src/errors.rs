//! Error types with rich diagnostics using miette
//!
//! Parse-class errors carry source spans pointing into the markup.
//! Geometry-class errors carry the offending shape's index and kind so a
//! caller can produce a precise diagnostic without re-parsing anything.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Coarse classification of a [`ConvertError`], for callers that map error
/// classes onto client-facing outcomes (e.g. 4xx vs 5xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Input is not well-formed markup
    Parse,
    /// Recognized-but-unimplemented element, attribute, or path command
    UnsupportedElement,
    /// Non-finite or out-of-bed geometry
    Geometry,
    /// Invalid configuration value
    Config,
}

/// Errors that abort a conversion. No partial output is ever produced.
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("malformed markup: {message}")]
    #[diagnostic(code(plotpath::parse::malformed))]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("mismatched closing tag: <{opened}> closed by </{closed}>")]
    #[diagnostic(code(plotpath::parse::mismatched_tag))]
    MismatchedTag {
        opened: String,
        closed: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this closing tag")]
        span: SourceSpan,
    },

    #[error("invalid {attribute} on <{element}>: {message}")]
    #[diagnostic(code(plotpath::parse::invalid_attribute))]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this element")]
        span: SourceSpan,
    },

    #[error("unable to determine document dimensions")]
    #[diagnostic(
        code(plotpath::parse::missing_dimensions),
        help("the root <svg> element needs width/height attributes or a viewBox")
    )]
    MissingDimensions {
        #[source_code]
        src: NamedSource<String>,
        #[label("root element")]
        span: SourceSpan,
    },

    #[error("unsupported element <{element}>")]
    #[diagnostic(
        code(plotpath::unsupported::element),
        help("supported shapes: rect, circle, ellipse, line, polyline, polygon, path")
    )]
    UnsupportedElement {
        element: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a supported shape")]
        span: SourceSpan,
    },

    #[error("unsupported attribute {attribute} on <{element}>")]
    #[diagnostic(code(plotpath::unsupported::attribute))]
    UnsupportedAttribute {
        element: &'static str,
        attribute: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("this element")]
        span: SourceSpan,
    },

    #[error("unsupported path command '{command}'")]
    #[diagnostic(
        code(plotpath::unsupported::path_command),
        help("smooth shorthands (S/s/T/t) are not implemented; use explicit C/Q commands")
    )]
    UnsupportedPathCommand {
        command: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this path")]
        span: SourceSpan,
    },

    #[error("non-finite geometry in shape {shape_index} ({shape_kind}): {detail}")]
    #[diagnostic(code(plotpath::geometry::non_finite))]
    Geometry {
        shape_index: usize,
        shape_kind: &'static str,
        detail: String,
    },

    #[error(
        "vertex ({x:.3}, {y:.3}) of shape {shape_index} lies outside the bed \
         ({bed_x:.1} x {bed_y:.1} mm)"
    )]
    #[diagnostic(
        code(plotpath::geometry::out_of_bed),
        help("use BoundsPolicy::Clamp to clamp out-of-bed vertices instead of failing")
    )]
    OutOfBed {
        shape_index: usize,
        x: f64,
        y: f64,
        bed_x: f64,
        bed_y: f64,
    },

    #[error("invalid configuration: {field} {source}")]
    #[diagnostic(code(plotpath::config::invalid))]
    Config {
        field: &'static str,
        #[source]
        source: NumericError,
    },
}

impl ConvertError {
    /// Which class of failure this is (spec taxonomy: parse / unsupported /
    /// geometry, plus config validation).
    pub fn class(&self) -> ErrorClass {
        match self {
            ConvertError::Parse { .. }
            | ConvertError::MismatchedTag { .. }
            | ConvertError::InvalidAttribute { .. }
            | ConvertError::MissingDimensions { .. } => ErrorClass::Parse,
            ConvertError::UnsupportedElement { .. }
            | ConvertError::UnsupportedAttribute { .. }
            | ConvertError::UnsupportedPathCommand { .. } => ErrorClass::UnsupportedElement,
            ConvertError::Geometry { .. } | ConvertError::OutOfBed { .. } => ErrorClass::Geometry,
            ConvertError::Config { .. } => ErrorClass::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classes() {
        let err = ConvertError::Geometry {
            shape_index: 2,
            shape_kind: "circle",
            detail: "control point is NaN".into(),
        };
        assert_eq!(err.class(), ErrorClass::Geometry);

        let err = ConvertError::Config {
            field: "flatness tolerance",
            source: NumericError::Zero,
        };
        assert_eq!(err.class(), ErrorClass::Config);
    }

    #[test]
    fn geometry_error_names_the_shape() {
        let err = ConvertError::Geometry {
            shape_index: 7,
            shape_kind: "path",
            detail: "mapped vertex is infinite".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("shape 7"));
        assert!(msg.contains("path"));
    }
}
