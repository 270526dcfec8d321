//! Parse pest pairs into shape descriptors
//!
//! The grammar (`svg.pest`) handles tokenization; this module walks the pair
//! tree, enforces well-formedness (matching close tags), extracts document
//! dimensions, and expands path data into [`PathCommand`]s.

use miette::{NamedSource, SourceSpan};
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::Parser;
use std::collections::HashMap;

use crate::errors::ConvertError;
use crate::shape::{PathCommand, Shape, SvgDocument};
use crate::{Rule, SvgParser};

/// Elements that may wrap shapes; their children are walked in order.
const CONTAINERS: &[&str] = &["svg", "g"];

/// Metadata elements; skipped entirely, including their children.
const SKIPPED: &[&str] = &["defs", "title", "desc", "metadata", "style"];

/// Parse SVG markup into an ordered shape list plus document dimensions.
pub fn parse(source: &str) -> Result<SvgDocument, ConvertError> {
    let mut pairs =
        SvgParser::parse(Rule::document, source).map_err(|e| pest_error(source, e))?;

    let document = pairs.next().expect("grammar: document is the root pair");
    let root = document
        .into_inner()
        .find(|p| p.as_rule() == Rule::element)
        .expect("grammar: document contains exactly one element");

    let root_span = span_of(&root);
    let (root_name, root_attrs, children) = split_element(source, root)?;
    if root_name != "svg" {
        return Err(ConvertError::Parse {
            message: format!("root element must be <svg>, found <{root_name}>"),
            src: named_src(source),
            span: root_span,
        });
    }

    let (width, height) = dimensions(source, &root_attrs, root_span)?;

    let mut shapes = Vec::new();
    for child in children {
        collect_shapes(source, child, &mut shapes)?;
    }

    Ok(SvgDocument { width, height, shapes })
}

/// One attribute: value text plus the span of the whole attribute.
struct Attr {
    value: String,
    span: SourceSpan,
}

type AttrMap = HashMap<String, Attr>;

/// Recursively walk an element pair, appending shapes in document order.
fn collect_shapes(
    source: &str,
    element: Pair<'_, Rule>,
    shapes: &mut Vec<Shape>,
) -> Result<(), ConvertError> {
    let span = span_of(&element);
    let (name, attrs, children) = split_element(source, element)?;

    if SKIPPED.contains(&name.as_str()) {
        return Ok(());
    }
    if CONTAINERS.contains(&name.as_str()) {
        for child in children {
            collect_shapes(source, child, shapes)?;
        }
        return Ok(());
    }

    shapes.push(parse_shape(source, &name, &attrs, span)?);
    Ok(())
}

/// Break an element pair into (name, attributes, child elements), verifying
/// that paired tags close with the same name they opened with.
fn split_element<'a>(
    source: &'a str,
    element: Pair<'a, Rule>,
) -> Result<(String, AttrMap, Vec<Pair<'a, Rule>>), ConvertError> {
    let inner = element
        .into_inner()
        .next()
        .expect("grammar: element is self_closing or paired");

    let mut name = String::new();
    let mut attrs = AttrMap::new();
    let mut children = Vec::new();

    match inner.as_rule() {
        Rule::self_closing => {
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::name => name = part.as_str().to_string(),
                    Rule::attribute => insert_attr(&mut attrs, part),
                    _ => {}
                }
            }
        }
        Rule::paired => {
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::open_tag => {
                        for tag_part in part.into_inner() {
                            match tag_part.as_rule() {
                                Rule::name => name = tag_part.as_str().to_string(),
                                Rule::attribute => insert_attr(&mut attrs, tag_part),
                                _ => {}
                            }
                        }
                    }
                    Rule::element => children.push(part),
                    Rule::close_tag => {
                        let close_span = span_of(&part);
                        let close_name = part
                            .into_inner()
                            .find(|p| p.as_rule() == Rule::name)
                            .map(|p| p.as_str().to_string())
                            .unwrap_or_default();
                        if close_name != name {
                            return Err(ConvertError::MismatchedTag {
                                opened: name,
                                closed: close_name,
                                src: named_src(source),
                                span: close_span,
                            });
                        }
                    }
                    _ => {} // text, comments
                }
            }
        }
        other => unreachable!("grammar: unexpected rule inside element: {other:?}"),
    }

    Ok((name, attrs, children))
}

fn insert_attr(attrs: &mut AttrMap, attribute: Pair<'_, Rule>) {
    let span = span_of(&attribute);
    let mut name = String::new();
    let mut value = String::new();
    for part in attribute.into_inner() {
        match part.as_rule() {
            Rule::name => name = part.as_str().to_string(),
            Rule::attr_value => {
                value = part
                    .into_inner()
                    .next()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
            }
            _ => {}
        }
    }
    attrs.insert(name, Attr { value, span });
}

/// Extract width/height from the root attributes, falling back to viewBox.
/// Unit suffixes px/pt/mm are stripped the way the classic converters do.
fn dimensions(
    source: &str,
    attrs: &AttrMap,
    root_span: SourceSpan,
) -> Result<(f64, f64), ConvertError> {
    let strip = |v: &str| -> String {
        v.trim()
            .trim_end_matches("px")
            .trim_end_matches("pt")
            .trim_end_matches("mm")
            .to_string()
    };

    let explicit = match (attrs.get("width"), attrs.get("height")) {
        (Some(w), Some(h)) => Some((strip(&w.value), strip(&h.value), w.span)),
        _ => None,
    };

    let (w_str, h_str, span) = match explicit {
        Some(parts) => parts,
        None => match attrs.get("viewBox") {
            Some(vb) => {
                let fields: Vec<&str> = vb
                    .value
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|s| !s.is_empty())
                    .collect();
                if fields.len() != 4 {
                    return Err(ConvertError::InvalidAttribute {
                        element: "svg".into(),
                        attribute: "viewBox",
                        message: format!("expected 4 numbers, found {}", fields.len()),
                        src: named_src(source),
                        span: vb.span,
                    });
                }
                (fields[2].to_string(), fields[3].to_string(), vb.span)
            }
            None => {
                return Err(ConvertError::MissingDimensions {
                    src: named_src(source),
                    span: root_span,
                })
            }
        },
    };

    let parse_dim = |s: &str, which: &'static str| -> Result<f64, ConvertError> {
        let v: f64 = s.parse().map_err(|_| ConvertError::InvalidAttribute {
            element: "svg".into(),
            attribute: which,
            message: format!("not a number: {s:?}"),
            src: named_src(source),
            span,
        })?;
        if !v.is_finite() || v <= 0.0 {
            return Err(ConvertError::InvalidAttribute {
                element: "svg".into(),
                attribute: which,
                message: "must be a positive finite number".into(),
                src: named_src(source),
                span,
            });
        }
        Ok(v)
    };

    Ok((parse_dim(&w_str, "width")?, parse_dim(&h_str, "height")?))
}

/// Turn one shape element into a [`Shape`], or fail for unsupported elements.
fn parse_shape(
    source: &str,
    name: &str,
    attrs: &AttrMap,
    span: SourceSpan,
) -> Result<Shape, ConvertError> {
    let num = |attr: &'static str, default: Option<f64>| -> Result<f64, ConvertError> {
        match attrs.get(attr) {
            Some(a) => a.value.trim().parse::<f64>().map_err(|_| {
                ConvertError::InvalidAttribute {
                    element: name.to_string(),
                    attribute: attr,
                    message: format!("not a number: {:?}", a.value),
                    src: named_src(source),
                    span: a.span,
                }
            }),
            None => default.ok_or_else(|| ConvertError::InvalidAttribute {
                element: name.to_string(),
                attribute: attr,
                message: "missing required attribute".into(),
                src: named_src(source),
                span,
            }),
        }
    };

    let non_negative = |attr: &'static str, v: f64| -> Result<f64, ConvertError> {
        if v < 0.0 {
            Err(ConvertError::InvalidAttribute {
                element: name.to_string(),
                attribute: attr,
                message: "must be non-negative".into(),
                src: named_src(source),
                span,
            })
        } else {
            Ok(v)
        }
    };

    match name {
        "rect" => {
            // Corner radii change the outline to arcs; not implemented.
            if attrs.contains_key("rx") || attrs.contains_key("ry") {
                return Err(ConvertError::UnsupportedAttribute {
                    element: "rect",
                    attribute: "rx/ry",
                    src: named_src(source),
                    span,
                });
            }
            Ok(Shape::Rect {
                x: num("x", Some(0.0))?,
                y: num("y", Some(0.0))?,
                width: non_negative("width", num("width", None)?)?,
                height: non_negative("height", num("height", None)?)?,
            })
        }
        "circle" => Ok(Shape::Circle {
            cx: num("cx", Some(0.0))?,
            cy: num("cy", Some(0.0))?,
            r: non_negative("r", num("r", None)?)?,
        }),
        "ellipse" => Ok(Shape::Ellipse {
            cx: num("cx", Some(0.0))?,
            cy: num("cy", Some(0.0))?,
            rx: non_negative("rx", num("rx", None)?)?,
            ry: non_negative("ry", num("ry", None)?)?,
        }),
        "line" => Ok(Shape::Line {
            x1: num("x1", Some(0.0))?,
            y1: num("y1", Some(0.0))?,
            x2: num("x2", Some(0.0))?,
            y2: num("y2", Some(0.0))?,
        }),
        "polyline" | "polygon" => {
            let attr = attrs.get("points").ok_or_else(|| {
                ConvertError::InvalidAttribute {
                    element: name.to_string(),
                    attribute: "points",
                    message: "missing required attribute".into(),
                    src: named_src(source),
                    span,
                }
            })?;
            let points = parse_points(source, name, &attr.value, attr.span)?;
            if name == "polyline" {
                Ok(Shape::Polyline { points })
            } else {
                Ok(Shape::Polygon { points })
            }
        }
        "path" => {
            let attr = attrs.get("d").ok_or_else(|| ConvertError::InvalidAttribute {
                element: "path".into(),
                attribute: "d",
                message: "missing required attribute".into(),
                src: named_src(source),
                span,
            })?;
            let commands = parse_path_data(source, &attr.value, attr.span)?;
            Ok(Shape::Path { commands })
        }
        other => Err(ConvertError::UnsupportedElement {
            element: other.to_string(),
            src: named_src(source),
            span,
        }),
    }
}

/// Parse a `points` attribute into coordinate pairs.
fn parse_points(
    source: &str,
    element: &str,
    value: &str,
    span: SourceSpan,
) -> Result<Vec<(f64, f64)>, ConvertError> {
    let mut pairs = SvgParser::parse(Rule::point_list, value).map_err(|e| {
        ConvertError::InvalidAttribute {
            element: element.to_string(),
            attribute: "points",
            message: pest_message(&e),
            src: named_src(source),
            span,
        }
    })?;

    let list = pairs.next().expect("grammar: point_list is the root pair");
    let mut points = Vec::new();
    for pair in list.into_inner() {
        if pair.as_rule() == Rule::coord_pair {
            points.push(parse_coord_pair(pair));
        }
    }
    Ok(points)
}

/// Parse a `d` attribute into an expanded command list.
fn parse_path_data(
    source: &str,
    value: &str,
    span: SourceSpan,
) -> Result<Vec<PathCommand>, ConvertError> {
    let mut pairs = SvgParser::parse(Rule::path_data, value).map_err(|e| {
        ConvertError::InvalidAttribute {
            element: "path".into(),
            attribute: "d",
            message: pest_message(&e),
            src: named_src(source),
            span,
        }
    })?;

    let data = pairs.next().expect("grammar: path_data is the root pair");
    let mut commands = Vec::new();

    for command in data.into_inner() {
        if command.as_rule() != Rule::path_command {
            continue; // EOI
        }
        let cmd = command
            .into_inner()
            .next()
            .expect("grammar: path_command has one alternative");
        expand_command(source, cmd, span, &mut commands)?;
    }

    // Every drawing command needs a current point, so a path has to open
    // with a move.
    if !matches!(commands.first(), None | Some(PathCommand::MoveTo { .. })) {
        return Err(ConvertError::InvalidAttribute {
            element: "path".into(),
            attribute: "d",
            message: "path data must begin with a move command".into(),
            src: named_src(source),
            span,
        });
    }

    Ok(commands)
}

/// Expand one command group (letter + repeated argument groups) into
/// individual [`PathCommand`]s.
fn expand_command(
    source: &str,
    cmd: Pair<'_, Rule>,
    span: SourceSpan,
    out: &mut Vec<PathCommand>,
) -> Result<(), ConvertError> {
    let rule = cmd.as_rule();

    if rule == Rule::close_cmd {
        out.push(PathCommand::Close);
        return Ok(());
    }

    let mut inner = cmd.into_inner();
    let op = inner.next().expect("grammar: command starts with its letter");
    let letter = op
        .as_str()
        .chars()
        .next()
        .expect("grammar: op is a single letter");
    let abs = letter.is_ascii_uppercase();

    match rule {
        Rule::smooth_cubic_cmd | Rule::smooth_quad_cmd => {
            return Err(ConvertError::UnsupportedPathCommand {
                command: letter,
                src: named_src(source),
                span,
            });
        }
        Rule::move_cmd => {
            // First pair is the move; SVG treats the rest as line commands.
            for (i, arg) in inner.enumerate() {
                let to = parse_coord_pair(arg);
                if i == 0 {
                    out.push(PathCommand::MoveTo { abs, to });
                } else {
                    out.push(PathCommand::LineTo { abs, to });
                }
            }
        }
        Rule::line_cmd => {
            for arg in inner {
                out.push(PathCommand::LineTo { abs, to: parse_coord_pair(arg) });
            }
        }
        Rule::hline_cmd => {
            for arg in inner {
                out.push(PathCommand::HorizontalTo { abs, x: parse_number(arg) });
            }
        }
        Rule::vline_cmd => {
            for arg in inner {
                out.push(PathCommand::VerticalTo { abs, y: parse_number(arg) });
            }
        }
        Rule::cubic_cmd => {
            for arg in inner {
                let mut coords = arg.into_inner();
                let c1 = parse_coord_pair(coords.next().expect("grammar: cubic c1"));
                let c2 = parse_coord_pair(coords.next().expect("grammar: cubic c2"));
                let to = parse_coord_pair(coords.next().expect("grammar: cubic endpoint"));
                out.push(PathCommand::CurveTo { abs, c1, c2, to });
            }
        }
        Rule::quad_cmd => {
            for arg in inner {
                let mut coords = arg.into_inner();
                let ctrl = parse_coord_pair(coords.next().expect("grammar: quad control"));
                let to = parse_coord_pair(coords.next().expect("grammar: quad endpoint"));
                out.push(PathCommand::QuadTo { abs, ctrl, to });
            }
        }
        Rule::arc_cmd => {
            for arg in inner {
                let mut parts = arg.into_inner();
                let rx = parse_number(parts.next().expect("grammar: arc rx"));
                let ry = parse_number(parts.next().expect("grammar: arc ry"));
                let rot = parse_number(parts.next().expect("grammar: arc rotation"));
                let large_arc = parts.next().expect("grammar: arc flag").as_str() == "1";
                let sweep = parts.next().expect("grammar: sweep flag").as_str() == "1";
                let to = parse_coord_pair(parts.next().expect("grammar: arc endpoint"));
                out.push(PathCommand::ArcTo {
                    abs,
                    rx,
                    ry,
                    x_axis_rotation: rot,
                    large_arc,
                    sweep,
                    to,
                });
            }
        }
        other => unreachable!("grammar: unexpected path command rule: {other:?}"),
    }

    Ok(())
}

fn parse_coord_pair(pair: Pair<'_, Rule>) -> (f64, f64) {
    let mut nums = pair.into_inner();
    let x = parse_number(nums.next().expect("grammar: coord_pair has x"));
    let y = parse_number(nums.next().expect("grammar: coord_pair has y"));
    (x, y)
}

fn parse_number(pair: Pair<'_, Rule>) -> f64 {
    // The number rule only admits valid f64 syntax; overflow saturates to
    // infinity and is caught by the normalizer's finiteness checks.
    pair.as_str().parse().unwrap_or(f64::INFINITY)
}

fn named_src(source: &str) -> NamedSource<String> {
    NamedSource::new("<input>", source.to_string())
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn pest_message(e: &pest::error::Error<Rule>) -> String {
    e.variant.message().to_string()
}

fn pest_error(source: &str, e: pest::error::Error<Rule>) -> ConvertError {
    let (start, len) = match e.location {
        InputLocation::Pos(p) => (p.min(source.len()), 0),
        InputLocation::Span((s, end)) => (s.min(source.len()), end.saturating_sub(s)),
    };
    ConvertError::Parse {
        message: pest_message(&e),
        src: named_src(source),
        span: (start, len).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorClass;

    #[test]
    fn parse_rect_document() {
        let doc = parse(
            r#"<svg width="100" height="100">
                 <rect x="10" y="10" width="80" height="80"/>
               </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.width, 100.0);
        assert_eq!(doc.height, 100.0);
        assert_eq!(
            doc.shapes,
            vec![Shape::Rect { x: 10.0, y: 10.0, width: 80.0, height: 80.0 }]
        );
    }

    #[test]
    fn parse_dimensions_from_viewbox() {
        let doc = parse(r#"<svg viewBox="0 0 210 297"><line x1="0" y1="0" x2="1" y2="1"/></svg>"#)
            .unwrap();
        assert_eq!(doc.width, 210.0);
        assert_eq!(doc.height, 297.0);
    }

    #[test]
    fn parse_strips_unit_suffix() {
        let doc = parse(r#"<svg width="100px" height="50pt"></svg>"#).unwrap();
        assert_eq!(doc.width, 100.0);
        assert_eq!(doc.height, 50.0);
    }

    #[test]
    fn parse_missing_dimensions_fails() {
        let err = parse(r#"<svg><circle cx="1" cy="1" r="1"/></svg>"#).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[test]
    fn parse_xml_prolog_and_comments() {
        let doc = parse(
            "<?xml version=\"1.0\"?>\n<!-- a drawing -->\n<svg width=\"10\" height=\"10\">\n  <!-- inner -->\n  <circle cx=\"5\" cy=\"5\" r=\"2\"/>\n</svg>",
        )
        .unwrap();
        assert_eq!(doc.shapes.len(), 1);
    }

    #[test]
    fn parse_nested_group() {
        let doc = parse(
            r#"<svg width="10" height="10">
                 <g><g><line x1="0" y1="0" x2="5" y2="5"/></g>
                    <circle cx="1" cy="1" r="1"/></g>
               </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.shapes.len(), 2);
        assert_eq!(doc.shapes[0].kind(), "line");
        assert_eq!(doc.shapes[1].kind(), "circle");
    }

    #[test]
    fn parse_skips_metadata_elements() {
        let doc = parse(
            r#"<svg width="10" height="10">
                 <title>test</title>
                 <defs><circle cx="0" cy="0" r="1"/></defs>
                 <line x1="0" y1="0" x2="1" y2="1"/>
               </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.shapes.len(), 1);
    }

    #[test]
    fn parse_rejects_unsupported_element() {
        let err = parse(r#"<svg width="10" height="10"><text x="0" y="0">hi</text></svg>"#)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnsupportedElement);
    }

    #[test]
    fn parse_rejects_rounded_rect() {
        let err = parse(
            r#"<svg width="10" height="10"><rect x="0" y="0" width="5" height="5" rx="2"/></svg>"#,
        )
        .unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnsupportedElement);
    }

    #[test]
    fn parse_rejects_mismatched_tags() {
        let err = parse(r#"<svg width="10" height="10"><g></svg></g>"#).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[test]
    fn parse_rejects_malformed_number() {
        let err = parse(r#"<svg width="10" height="10"><circle cx="abc" cy="0" r="1"/></svg>"#)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[test]
    fn parse_polygon_points() {
        let doc = parse(
            r#"<svg width="10" height="10"><polygon points="0,0 4,0 4,4"/></svg>"#,
        )
        .unwrap();
        assert_eq!(
            doc.shapes,
            vec![Shape::Polygon { points: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)] }]
        );
    }

    #[test]
    fn parse_path_commands() {
        let doc = parse(
            r#"<svg width="10" height="10"><path d="M 1 2 L 3 4 h 5 V 6 C 1 1 2 2 3 3 q 1 1 2 2 A 5 5 0 0 1 9 9 Z"/></svg>"#,
        )
        .unwrap();
        let Shape::Path { commands } = &doc.shapes[0] else {
            panic!("expected a path");
        };
        assert_eq!(
            commands.as_slice(),
            &[
                PathCommand::MoveTo { abs: true, to: (1.0, 2.0) },
                PathCommand::LineTo { abs: true, to: (3.0, 4.0) },
                PathCommand::HorizontalTo { abs: false, x: 5.0 },
                PathCommand::VerticalTo { abs: true, y: 6.0 },
                PathCommand::CurveTo {
                    abs: true,
                    c1: (1.0, 1.0),
                    c2: (2.0, 2.0),
                    to: (3.0, 3.0)
                },
                PathCommand::QuadTo { abs: false, ctrl: (1.0, 1.0), to: (2.0, 2.0) },
                PathCommand::ArcTo {
                    abs: true,
                    rx: 5.0,
                    ry: 5.0,
                    x_axis_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    to: (9.0, 9.0)
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn parse_move_with_implicit_lines() {
        let doc =
            parse(r#"<svg width="10" height="10"><path d="m 1 1 2 2 3 3"/></svg>"#).unwrap();
        let Shape::Path { commands } = &doc.shapes[0] else {
            panic!("expected a path");
        };
        assert_eq!(
            commands.as_slice(),
            &[
                PathCommand::MoveTo { abs: false, to: (1.0, 1.0) },
                PathCommand::LineTo { abs: false, to: (2.0, 2.0) },
                PathCommand::LineTo { abs: false, to: (3.0, 3.0) },
            ]
        );
    }

    #[test]
    fn parse_rejects_smooth_shorthand() {
        let err = parse(r#"<svg width="10" height="10"><path d="M 0 0 S 1 1 2 2"/></svg>"#)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnsupportedElement);
        assert!(err.to_string().contains('S'));
    }

    #[test]
    fn parse_rejects_garbage_path_data() {
        let err = parse(r#"<svg width="10" height="10"><path d="M 0 0 X 9 9"/></svg>"#)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[test]
    fn parse_rejects_plain_garbage() {
        assert!(parse("not xml at all").is_err());
    }
}
