//! Motion command emission and text rendering.
//!
//! The emitter walks device-space strokes in draw order and produces a
//! flat command sequence. Every stroke with at least two vertices gets
//! one pen cycle: Travel to its first vertex, Engage, one Draw per
//! remaining vertex, Disengage at its last. Shorter strokes have no
//! drawable extent and are skipped.

use std::fmt::Write as _;

use crate::device::{BoundsWarning, Config};
use crate::log::debug;
use crate::types::{BoxDev, PtDev};

/// Pen-state meaning of one motion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// Pen up, reposition.
    Travel,
    /// Pen down at the current position.
    Engage,
    /// Pen down, move.
    Draw,
    /// Pen up at the current position.
    Disengage,
}

/// One instruction of the output sequence. For engage/disengage the
/// target is the position the tool holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub kind: MotionKind,
    pub target: PtDev,
}

/// A flattened stroke after coordinate mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStroke {
    pub shape_index: usize,
    pub vertices: Vec<PtDev>,
}

/// The final toolpath: ordered commands plus derived metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolpathDocument {
    pub commands: Vec<MotionCommand>,
    /// Total vertices across emitted strokes.
    pub vertex_count: usize,
    /// Bounding box of all emitted vertices; `None` when nothing was drawn.
    pub bounding_box: Option<BoxDev>,
    /// Vertices the mapper clamped onto the bed.
    pub warnings: Vec<BoundsWarning>,
}

impl ToolpathDocument {
    /// Number of motion commands. Preamble and postamble lines are
    /// rendering concerns and never counted here.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Render the toolpath as newline-joined command text using the
    /// config's templates, bracketed by preamble and postamble.
    pub fn render(&self, config: &Config) -> String {
        let mut out = String::new();
        for line in config.preamble.lines() {
            out.push_str(line);
            out.push('\n');
        }
        for cmd in &self.commands {
            let template = match cmd.kind {
                MotionKind::Travel => &config.travel_template,
                MotionKind::Draw => &config.draw_template,
                MotionKind::Engage => &config.engage_template,
                MotionKind::Disengage => &config.disengage_template,
            };
            render_command(&mut out, template, cmd.target);
            out.push('\n');
        }
        for line in config.postamble.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Substitute `{x}`/`{y}` placeholders with fixed 3-decimal coordinates.
fn render_command(out: &mut String, template: &str, target: PtDev) {
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        if let Some(close) = after.find('}') {
            match &after[1..close] {
                "x" => {
                    let _ = write!(out, "{:.3}", target.x.raw());
                }
                "y" => {
                    let _ = write!(out, "{:.3}", target.y.raw());
                }
                // Unknown placeholders pass through verbatim.
                other => {
                    let _ = write!(out, "{{{other}}}");
                }
            }
            rest = &after[close + 1..];
        } else {
            out.push_str(after);
            return;
        }
    }
    out.push_str(rest);
}

/// Build the command sequence for a set of mapped strokes.
pub fn emit(strokes: &[DeviceStroke], warnings: Vec<BoundsWarning>) -> ToolpathDocument {
    let mut commands = Vec::new();
    let mut vertex_count = 0;
    let mut bbox = BoxDev::new();

    for stroke in strokes {
        if stroke.vertices.len() < 2 {
            debug!(
                "skipping stroke of shape {}: {} vertices",
                stroke.shape_index,
                stroke.vertices.len()
            );
            continue;
        }
        vertex_count += stroke.vertices.len();
        for &v in &stroke.vertices {
            bbox.expand_point(v);
        }

        let first = stroke.vertices[0];
        let last = stroke.vertices[stroke.vertices.len() - 1];
        commands.push(MotionCommand {
            kind: MotionKind::Travel,
            target: first,
        });
        commands.push(MotionCommand {
            kind: MotionKind::Engage,
            target: first,
        });
        for &v in &stroke.vertices[1..] {
            commands.push(MotionCommand {
                kind: MotionKind::Draw,
                target: v,
            });
        }
        commands.push(MotionCommand {
            kind: MotionKind::Disengage,
            target: last,
        });
    }

    let bounding_box = if bbox.is_empty() { None } else { Some(bbox) };
    ToolpathDocument {
        commands,
        vertex_count,
        bounding_box,
        warnings,
    }
}
