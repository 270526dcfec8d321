//! Adaptive flattening of cubic segments into polylines.
//!
//! Each [`CubicBez`] is subdivided recursively (de Casteljau at t = 0.5)
//! until both control points sit within the flatness tolerance of the
//! chord, then replaced by that chord. Tighter tolerances never produce
//! fewer vertices, and a polyline run through the flattener comes out
//! unchanged, so the pass is safe to apply uniformly.

use glam::{dvec2, DVec2};

use crate::errors::ConvertError;
use crate::log::debug;
use crate::normalize::{CubicBez, Subpath};
use crate::types::{PtSrc, SourceUnit, Tolerance};

/// Hard ceiling on subdivision recursion. At the ceiling the chord is
/// accepted as-is; a pathological segment degrades gracefully instead of
/// recursing forever.
pub const MAX_DEPTH: u32 = 16;

/// A flattened subpath: straight-line vertices in source space, in draw
/// order. Consecutive segments share vertices, so a closed rectangle is
/// five vertices, not eight.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub shape_index: usize,
    pub vertices: Vec<PtSrc>,
    pub closed: bool,
}

/// Flatten every subpath, preserving draw order.
pub fn flatten(subpaths: &[Subpath], tolerance: Tolerance) -> Result<Vec<Polyline>, ConvertError> {
    let mut polylines = Vec::with_capacity(subpaths.len());
    for sub in subpaths {
        let vertices = flatten_subpath(sub, tolerance)?;
        debug!(
            "subpath of shape {}: {} segments -> {} vertices",
            sub.shape_index,
            sub.segments.len(),
            vertices.len()
        );
        polylines.push(Polyline {
            shape_index: sub.shape_index,
            vertices,
            closed: sub.closed,
        });
    }
    Ok(polylines)
}

/// Flatten one subpath into a vertex list.
///
/// The first segment contributes its full polyline; every following
/// segment skips its first vertex, which it shares with the previous
/// segment's last.
pub fn flatten_subpath(sub: &Subpath, tolerance: Tolerance) -> Result<Vec<PtSrc>, ConvertError> {
    let mut vertices: Vec<PtSrc> = Vec::new();
    for seg in &sub.segments {
        if !seg.is_finite() {
            return Err(ConvertError::Geometry {
                shape_index: sub.shape_index,
                shape_kind: "curve",
                detail: "non-finite control point in flattener input".into(),
            });
        }
        if vertices.is_empty() {
            vertices.push(seg.p0);
        }
        flatten_segment(seg, tolerance, &mut vertices);
    }
    Ok(vertices)
}

/// Append the flattened form of one segment, excluding its start point.
fn flatten_segment(seg: &CubicBez, tolerance: Tolerance, out: &mut Vec<PtSrc>) {
    let p0 = vec_of(seg.p0);
    let p1 = vec_of(seg.p1);
    let p2 = vec_of(seg.p2);
    let p3 = vec_of(seg.p3);
    subdivide(p0, p1, p2, p3, tolerance.raw(), 0, out);
}

fn subdivide(
    p0: DVec2,
    p1: DVec2,
    p2: DVec2,
    p3: DVec2,
    eps: f64,
    depth: u32,
    out: &mut Vec<PtSrc>,
) {
    if depth >= MAX_DEPTH || is_flat(p0, p1, p2, p3, eps) {
        out.push(pt(p3));
        return;
    }

    // de Casteljau split at t = 0.5
    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let p23 = p2.midpoint(p3);
    let p012 = p01.midpoint(p12);
    let p123 = p12.midpoint(p23);
    let mid = p012.midpoint(p123);

    subdivide(p0, p01, p012, mid, eps, depth + 1, out);
    subdivide(mid, p123, p23, p3, eps, depth + 1, out);
}

/// Flat-enough test: both control points within `eps` of the chord.
///
/// A degenerate chord (endpoints coincident) falls back to the distance
/// of each control point from the shared endpoint, so a fully collapsed
/// segment short-circuits to its two endpoints.
fn is_flat(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, eps: f64) -> bool {
    let chord = p3 - p0;
    let len_sq = chord.length_squared();
    if len_sq <= f64::EPSILON {
        return (p1 - p0).length() <= eps && (p2 - p0).length() <= eps;
    }
    let d1 = (p1 - p0).perp_dot(chord).abs();
    let d2 = (p2 - p0).perp_dot(chord).abs();
    let len = len_sq.sqrt();
    d1 <= eps * len && d2 <= eps * len
}

fn vec_of(p: PtSrc) -> DVec2 {
    dvec2(p.x.raw(), p.y.raw())
}

fn pt(v: DVec2) -> PtSrc {
    PtSrc::new(SourceUnit(v.x), SourceUnit(v.y))
}
