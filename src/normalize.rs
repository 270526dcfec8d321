//! Path normalizer: every shape becomes cubic Bezier subpaths.
//!
//! One exhaustive `match` per shape kind, so adding a shape is a localized,
//! compiler-checked change. Straight edges become degenerate cubics with the
//! inner control points on the chord; circles and ellipses use the standard
//! four-quadrant approximation; elliptical arc commands go through center
//! parameterization and are sliced into at most 90-degree cubics so the
//! quadrant error bound holds.

use glam::{dvec2, DVec2};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::errors::ConvertError;
use crate::log::debug;
use crate::shape::{PathCommand, Shape};
use crate::types::{PtSrc, SourceUnit};

/// Control-point offset ratio for the circle quadrant approximation:
/// 4/3 * (sqrt(2) - 1).
pub const KAPPA: f64 = 0.552_284_749_830_793_6;

/// One cubic Bezier segment in source space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBez {
    pub p0: PtSrc,
    pub p1: PtSrc,
    pub p2: PtSrc,
    pub p3: PtSrc,
}

impl CubicBez {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        CubicBez {
            p0: pt(p0),
            p1: pt(p1),
            p2: pt(p2),
            p3: pt(p3),
        }
    }

    /// Degenerate cubic for a straight edge: inner control points at the
    /// one-third chord interpolation points. Flattens to exactly the two
    /// endpoints.
    pub fn line(p0: DVec2, p3: DVec2) -> Self {
        CubicBez::new(p0, p0.lerp(p3, 1.0 / 3.0), p0.lerp(p3, 2.0 / 3.0), p3)
    }

    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

/// One continuous drawing stroke: ordered segments plus the closed flag.
/// `shape_index` ties it back to the shape it expands, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub shape_index: usize,
    pub segments: Vec<CubicBez>,
    pub closed: bool,
}

fn pt(v: DVec2) -> PtSrc {
    PtSrc::new(SourceUnit(v.x), SourceUnit(v.y))
}

/// Expand every shape into subpaths, preserving draw order.
pub fn normalize(shapes: &[Shape]) -> Result<Vec<Subpath>, ConvertError> {
    let mut subpaths = Vec::new();

    for (index, shape) in shapes.iter().enumerate() {
        let produced = match shape {
            Shape::Line { x1, y1, x2, y2 } => {
                line_subpath(index, dvec2(*x1, *y1), dvec2(*x2, *y2))
            }
            Shape::Rect { x, y, width, height } => {
                rect_subpath(index, *x, *y, *width, *height)
            }
            Shape::Circle { cx, cy, r } => ellipse_subpath(index, dvec2(*cx, *cy), *r, *r),
            Shape::Ellipse { cx, cy, rx, ry } => {
                ellipse_subpath(index, dvec2(*cx, *cy), *rx, *ry)
            }
            Shape::Polyline { points } => poly_subpath(index, points, false),
            Shape::Polygon { points } => poly_subpath(index, points, true),
            Shape::Path { commands } => path_subpaths(index, commands)?,
        };

        for subpath in &produced {
            for seg in &subpath.segments {
                if !seg.is_finite() {
                    return Err(ConvertError::Geometry {
                        shape_index: index,
                        shape_kind: shape.kind(),
                        detail: "control point is NaN or infinite".into(),
                    });
                }
            }
        }

        debug!(
            "shape {} ({}) -> {} subpath(s)",
            index,
            shape.kind(),
            produced.len()
        );
        subpaths.extend(produced);
    }

    Ok(subpaths)
}

fn line_subpath(index: usize, from: DVec2, to: DVec2) -> Vec<Subpath> {
    vec![Subpath {
        shape_index: index,
        segments: vec![CubicBez::line(from, to)],
        closed: false,
    }]
}

/// Four straight edges, clockwise from the top-left corner. Source space is
/// y-down, so clockwise runs TL -> TR -> BR -> BL.
fn rect_subpath(index: usize, x: f64, y: f64, width: f64, height: f64) -> Vec<Subpath> {
    let tl = dvec2(x, y);
    let tr = dvec2(x + width, y);
    let br = dvec2(x + width, y + height);
    let bl = dvec2(x, y + height);
    vec![Subpath {
        shape_index: index,
        segments: vec![
            CubicBez::line(tl, tr),
            CubicBez::line(tr, br),
            CubicBez::line(br, bl),
            CubicBez::line(bl, tl),
        ],
        closed: true,
    }]
}

/// Four cubic quadrants with KAPPA control offsets, starting at the +x axis
/// point and sweeping through +y (downward in source space).
fn ellipse_subpath(index: usize, c: DVec2, rx: f64, ry: f64) -> Vec<Subpath> {
    let kx = KAPPA * rx;
    let ky = KAPPA * ry;
    let east = c + dvec2(rx, 0.0);
    let south = c + dvec2(0.0, ry);
    let west = c - dvec2(rx, 0.0);
    let north = c - dvec2(0.0, ry);

    vec![Subpath {
        shape_index: index,
        segments: vec![
            CubicBez::new(east, east + dvec2(0.0, ky), south + dvec2(kx, 0.0), south),
            CubicBez::new(south, south - dvec2(kx, 0.0), west + dvec2(0.0, ky), west),
            CubicBez::new(west, west - dvec2(0.0, ky), north - dvec2(kx, 0.0), north),
            CubicBez::new(north, north + dvec2(kx, 0.0), east - dvec2(0.0, ky), east),
        ],
        closed: true,
    }]
}

fn poly_subpath(index: usize, points: &[(f64, f64)], closed: bool) -> Vec<Subpath> {
    if points.len() < 2 {
        return Vec::new();
    }

    let pts: Vec<DVec2> = points.iter().map(|&(x, y)| dvec2(x, y)).collect();
    let mut segments: Vec<CubicBez> = pts
        .windows(2)
        .map(|w| CubicBez::line(w[0], w[1]))
        .collect();

    if closed {
        let first = pts[0];
        let last = pts[pts.len() - 1];
        if last != first {
            segments.push(CubicBez::line(last, first));
        }
    }

    vec![Subpath { shape_index: index, segments, closed }]
}

/// Cursor walk over path commands. A move flushes the open subpath; close
/// marks it closed and appends the closing edge when needed.
fn path_subpaths(index: usize, commands: &[PathCommand]) -> Result<Vec<Subpath>, ConvertError> {
    let mut subpaths = Vec::new();
    let mut segments: Vec<CubicBez> = Vec::new();
    let mut cur = DVec2::ZERO;
    let mut start = DVec2::ZERO;
    let mut has_current = false;

    let flush = |segments: &mut Vec<CubicBez>, subpaths: &mut Vec<Subpath>, closed: bool| {
        if !segments.is_empty() {
            subpaths.push(Subpath {
                shape_index: index,
                segments: std::mem::take(segments),
                closed,
            });
        }
    };

    for command in commands {
        // Relative coordinates resolve against the current point; the cursor
        // starts at the origin, which makes an initial relative move absolute
        // (SVG rule).
        let resolve = |abs: bool, (x, y): (f64, f64)| {
            if abs {
                dvec2(x, y)
            } else {
                cur + dvec2(x, y)
            }
        };

        match *command {
            PathCommand::MoveTo { abs, to } => {
                flush(&mut segments, &mut subpaths, false);
                cur = resolve(abs, to);
                start = cur;
                has_current = true;
            }
            PathCommand::LineTo { abs, to } => {
                require_current(index, has_current)?;
                let target = resolve(abs, to);
                segments.push(CubicBez::line(cur, target));
                cur = target;
            }
            PathCommand::HorizontalTo { abs, x } => {
                require_current(index, has_current)?;
                let target = if abs { dvec2(x, cur.y) } else { dvec2(cur.x + x, cur.y) };
                segments.push(CubicBez::line(cur, target));
                cur = target;
            }
            PathCommand::VerticalTo { abs, y } => {
                require_current(index, has_current)?;
                let target = if abs { dvec2(cur.x, y) } else { dvec2(cur.x, cur.y + y) };
                segments.push(CubicBez::line(cur, target));
                cur = target;
            }
            PathCommand::CurveTo { abs, c1, c2, to } => {
                require_current(index, has_current)?;
                let target = resolve(abs, to);
                segments.push(CubicBez::new(
                    cur,
                    resolve(abs, c1),
                    resolve(abs, c2),
                    target,
                ));
                cur = target;
            }
            PathCommand::QuadTo { abs, ctrl, to } => {
                require_current(index, has_current)?;
                let q = resolve(abs, ctrl);
                let target = resolve(abs, to);
                // Degree elevation: the cubic's inner controls sit two thirds
                // of the way from each endpoint to the quadratic control.
                segments.push(CubicBez::new(
                    cur,
                    cur + (q - cur) * (2.0 / 3.0),
                    target + (q - target) * (2.0 / 3.0),
                    target,
                ));
                cur = target;
            }
            PathCommand::ArcTo {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => {
                require_current(index, has_current)?;
                let target = resolve(abs, to);
                match arc_parameterization(cur, rx, ry, x_axis_rotation, large_arc, sweep, target)
                {
                    ArcParameterization::CenterParameters {
                        center,
                        radii,
                        theta1,
                        delta_theta,
                    } => {
                        // Slice so each cubic spans at most a quarter turn.
                        let n = (delta_theta.abs() / FRAC_PI_2).ceil().max(1.0) as u32;
                        let step = delta_theta / f64::from(n);
                        let mut slice_from = cur;
                        for i in 0..n {
                            let th0 = theta1 + f64::from(i) * step;
                            let seg = arc_segment(
                                slice_from,
                                center,
                                radii,
                                x_axis_rotation,
                                th0,
                                th0 + step,
                            );
                            slice_from = dvec2(seg.p3.x.raw(), seg.p3.y.raw());
                            segments.push(seg);
                        }
                        // Land exactly on the endpoint regardless of
                        // accumulated rounding.
                        if let Some(last) = segments.last_mut() {
                            last.p3 = pt(target);
                        }
                        cur = target;
                    }
                    ArcParameterization::LineTo => {
                        segments.push(CubicBez::line(cur, target));
                        cur = target;
                    }
                    ArcParameterization::Omit => {
                        cur = target;
                    }
                }
            }
            PathCommand::Close => {
                require_current(index, has_current)?;
                if cur != start && !segments.is_empty() {
                    segments.push(CubicBez::line(cur, start));
                }
                flush(&mut segments, &mut subpaths, true);
                cur = start;
            }
        }
    }

    flush(&mut segments, &mut subpaths, false);
    Ok(subpaths)
}

fn require_current(index: usize, has_current: bool) -> Result<(), ConvertError> {
    if has_current {
        Ok(())
    } else {
        // The parser guarantees paths open with a move; guard anyway for
        // programmatic callers that build command lists by hand.
        Err(ConvertError::Geometry {
            shape_index: index,
            shape_kind: "path",
            detail: "drawing command before any move".into(),
        })
    }
}

/// Center parameterization of an elliptical arc, or a degenerate fallback.
///
/// See SVG 2 implementation notes B.2.4 (conversion from endpoint to center
/// parameterization). Radii are scaled up when no ellipse passes through
/// both endpoints.
enum ArcParameterization {
    CenterParameters {
        center: DVec2,
        radii: DVec2,
        theta1: f64,
        delta_theta: f64,
    },
    /// Zero radius: the arc degrades to a line joining the endpoints.
    LineTo,
    /// Coincident endpoints: nothing to draw.
    Omit,
}

fn arc_parameterization(
    from: DVec2,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: DVec2,
) -> ArcParameterization {
    let mut rx = rx.abs();
    let mut ry = ry.abs();

    // A bit further down we divide by the square of the radii.
    if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
        return ArcParameterization::LineTo;
    }

    let phi = x_axis_rotation * PI / 180.0;
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Translate the origin to the chord midpoint and rotate onto the
    // ellipse axes; primed coordinates throughout.
    let mid = (from - to) / 2.0;
    let x1_ = cos_phi * mid.x + sin_phi * mid.y;
    let y1_ = -sin_phi * mid.x + cos_phi * mid.y;

    // Scale up the radii uniformly if the ellipse cannot reach.
    let lambda = (x1_ / rx).powi(2) + (y1_ / ry).powi(2);
    if lambda > 1.0 {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    let d = (rx * y1_).powi(2) + (ry * x1_).powi(2);
    if d == 0.0 {
        return ArcParameterization::Omit;
    }
    let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
    if sweep == large_arc {
        k = -k;
    }
    let cx_ = k * rx * y1_ / ry;
    let cy_ = -k * ry * x1_ / rx;

    let center = dvec2(
        cos_phi * cx_ - sin_phi * cy_ + (from.x + to.x) / 2.0,
        sin_phi * cx_ + cos_phi * cy_ + (from.y + to.y) / 2.0,
    );

    // Start angle.
    let ux = (x1_ - cx_) / rx;
    let uy = (y1_ - cy_) / ry;
    let u_len = (ux * ux + uy * uy).sqrt();
    if u_len == 0.0 {
        return ArcParameterization::Omit;
    }
    let mut theta1 = (ux / u_len).clamp(-1.0, 1.0).acos();
    if uy < 0.0 {
        theta1 = -theta1;
    }

    // Sweep angle.
    let vx = (-x1_ - cx_) / rx;
    let vy = (-y1_ - cy_) / ry;
    let v_len = (vx * vx + vy * vy).sqrt();
    if v_len == 0.0 {
        return ArcParameterization::Omit;
    }
    let dot = (ux * vx + uy * vy) / (u_len * v_len);
    let mut delta_theta = dot.clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 {
        delta_theta = -delta_theta;
    }
    if sweep && delta_theta < 0.0 {
        delta_theta += 2.0 * PI;
    } else if !sweep && delta_theta > 0.0 {
        delta_theta -= 2.0 * PI;
    }

    ArcParameterization::CenterParameters {
        center,
        radii: dvec2(rx, ry),
        theta1,
        delta_theta,
    }
}

/// One cubic for an arc slice between angles `th0` and `th1` (at most a
/// quarter turn apart).
fn arc_segment(from: DVec2, center: DVec2, radii: DVec2, x_axis_rotation: f64, th0: f64, th1: f64) -> CubicBez {
    let (cx, cy) = (center.x, center.y);
    let (rx, ry) = (radii.x, radii.y);
    let phi = x_axis_rotation * PI / 180.0;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    let th_half = 0.5 * (th1 - th0);
    let t = (8.0 / 3.0) * (th_half * 0.5).sin().powi(2) / th_half.sin();
    let x1 = rx * (cos_th0 - t * sin_th0);
    let y1 = ry * (sin_th0 + t * cos_th0);
    let x3 = rx * cos_th1;
    let y3 = ry * sin_th1;
    let x2 = x3 + rx * (t * sin_th1);
    let y2 = y3 + ry * (-t * cos_th1);

    let rotate = |x: f64, y: f64| dvec2(cx + cos_phi * x - sin_phi * y, cy + sin_phi * x + cos_phi * y);

    CubicBez::new(from, rotate(x1, y1), rotate(x2, y2), rotate(x3, y3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(p: PtSrc) -> DVec2 {
        dvec2(p.x.raw(), p.y.raw())
    }

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn line_becomes_one_open_segment_on_the_chord() {
        let subs = normalize(&[Shape::Line { x1: 0.0, y1: 0.0, x2: 3.0, y2: 3.0 }]).unwrap();
        assert_eq!(subs.len(), 1);
        assert!(!subs[0].closed);
        assert_eq!(subs[0].segments.len(), 1);

        let seg = subs[0].segments[0];
        assert_close(v(seg.p1), dvec2(1.0, 1.0));
        assert_close(v(seg.p2), dvec2(2.0, 2.0));
    }

    #[test]
    fn rect_is_closed_clockwise_from_top_left() {
        let subs = normalize(&[Shape::Rect { x: 10.0, y: 10.0, width: 80.0, height: 80.0 }])
            .unwrap();
        assert_eq!(subs.len(), 1);
        let sub = &subs[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 4);

        let corners: Vec<DVec2> = sub.segments.iter().map(|s| v(s.p0)).collect();
        assert_close(corners[0], dvec2(10.0, 10.0));
        assert_close(corners[1], dvec2(90.0, 10.0));
        assert_close(corners[2], dvec2(90.0, 90.0));
        assert_close(corners[3], dvec2(10.0, 90.0));
        assert_close(v(sub.segments[3].p3), dvec2(10.0, 10.0));
    }

    #[test]
    fn circle_is_four_quadrants() {
        let subs = normalize(&[Shape::Circle { cx: 0.0, cy: 0.0, r: 10.0 }]).unwrap();
        let sub = &subs[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 4);

        assert_close(v(sub.segments[0].p0), dvec2(10.0, 0.0));
        assert_close(v(sub.segments[0].p3), dvec2(0.0, 10.0));
        assert_close(v(sub.segments[1].p3), dvec2(-10.0, 0.0));
        assert_close(v(sub.segments[2].p3), dvec2(0.0, -10.0));
        assert_close(v(sub.segments[3].p3), dvec2(10.0, 0.0));

        // Control offset uses the standard ratio.
        assert_close(v(sub.segments[0].p1), dvec2(10.0, KAPPA * 10.0));
    }

    #[test]
    fn quadrant_continuity() {
        let subs = normalize(&[Shape::Ellipse { cx: 5.0, cy: 5.0, rx: 4.0, ry: 2.0 }]).unwrap();
        let segs = &subs[0].segments;
        for w in segs.windows(2) {
            assert_close(v(w[0].p3), v(w[1].p0));
        }
        assert_close(v(segs[3].p3), v(segs[0].p0));
    }

    #[test]
    fn polygon_appends_closing_segment() {
        let subs = normalize(&[Shape::Polygon {
            points: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)],
        }])
        .unwrap();
        let sub = &subs[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 3);
        assert_close(v(sub.segments[2].p3), dvec2(0.0, 0.0));
    }

    #[test]
    fn polyline_stays_open() {
        let subs = normalize(&[Shape::Polyline {
            points: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)],
        }])
        .unwrap();
        assert!(!subs[0].closed);
        assert_eq!(subs[0].segments.len(), 2);
    }

    #[test]
    fn single_point_polyline_produces_nothing() {
        let subs = normalize(&[Shape::Polyline { points: vec![(1.0, 1.0)] }]).unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn path_moves_split_subpaths() {
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (0.0, 0.0) },
                PathCommand::LineTo { abs: true, to: (1.0, 0.0) },
                PathCommand::MoveTo { abs: true, to: (5.0, 5.0) },
                PathCommand::LineTo { abs: false, to: (1.0, 1.0) },
            ],
        }])
        .unwrap();
        assert_eq!(subs.len(), 2);
        assert_close(v(subs[1].segments[0].p0), dvec2(5.0, 5.0));
        assert_close(v(subs[1].segments[0].p3), dvec2(6.0, 6.0));
    }

    #[test]
    fn path_close_appends_closing_edge() {
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (0.0, 0.0) },
                PathCommand::LineTo { abs: true, to: (4.0, 0.0) },
                PathCommand::LineTo { abs: true, to: (4.0, 4.0) },
                PathCommand::Close,
            ],
        }])
        .unwrap();
        let sub = &subs[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 3);
        assert_close(v(sub.segments[2].p3), dvec2(0.0, 0.0));
    }

    #[test]
    fn quadratic_elevates_to_cubic() {
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (0.0, 0.0) },
                PathCommand::QuadTo { abs: true, ctrl: (3.0, 6.0), to: (6.0, 0.0) },
            ],
        }])
        .unwrap();
        let seg = subs[0].segments[0];
        assert_close(v(seg.p1), dvec2(2.0, 4.0));
        assert_close(v(seg.p2), dvec2(4.0, 4.0));
    }

    #[test]
    fn semicircle_arc_splits_into_two_quadrant_cubics() {
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (0.0, 0.0) },
                PathCommand::ArcTo {
                    abs: true,
                    rx: 5.0,
                    ry: 5.0,
                    x_axis_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    to: (10.0, 0.0),
                },
            ],
        }])
        .unwrap();
        let sub = &subs[0];
        assert_eq!(sub.segments.len(), 2);
        assert_close(v(sub.segments[0].p0), dvec2(0.0, 0.0));
        assert_close(v(sub.segments[1].p3), dvec2(10.0, 0.0));
        // Midpoint of the sweep lands on the circle around (5, 0).
        let mid = v(sub.segments[0].p3);
        assert!(((mid - dvec2(5.0, 0.0)).length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_arc_degrades_to_line() {
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (0.0, 0.0) },
                PathCommand::ArcTo {
                    abs: true,
                    rx: 0.0,
                    ry: 5.0,
                    x_axis_rotation: 0.0,
                    large_arc: false,
                    sweep: false,
                    to: (10.0, 0.0),
                },
            ],
        }])
        .unwrap();
        let seg = subs[0].segments[0];
        assert_close(v(seg.p1), dvec2(10.0 / 3.0, 0.0));
    }

    #[test]
    fn coincident_endpoint_arc_is_omitted() {
        // An arc back to the current point has no center solution and
        // contributes nothing; drawing continues from the same point.
        let subs = normalize(&[Shape::Path {
            commands: vec![
                PathCommand::MoveTo { abs: true, to: (5.0, 5.0) },
                PathCommand::ArcTo {
                    abs: true,
                    rx: 3.0,
                    ry: 3.0,
                    x_axis_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    to: (5.0, 5.0),
                },
                PathCommand::LineTo { abs: true, to: (6.0, 6.0) },
            ],
        }])
        .unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].segments.len(), 1);
        assert_close(v(subs[0].segments[0].p0), dvec2(5.0, 5.0));
        assert_close(v(subs[0].segments[0].p3), dvec2(6.0, 6.0));
    }

    #[test]
    fn non_finite_input_is_a_geometry_error() {
        let err = normalize(&[
            Shape::Line { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
            Shape::Line { x1: f64::NAN, y1: 0.0, x2: 1.0, y2: 1.0 },
        ])
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("shape 1"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
    }

    #[test]
    fn subpaths_keep_document_order() {
        let subs = normalize(&[
            Shape::Line { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
            Shape::Circle { cx: 0.0, cy: 0.0, r: 1.0 },
        ])
        .unwrap();
        assert_eq!(subs[0].shape_index, 0);
        assert_eq!(subs[1].shape_index, 1);
    }
}
