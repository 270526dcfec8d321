//! Device configuration and the source-to-device coordinate mapper.
//!
//! The mapper is the only place source units become millimetres. It
//! applies a uniform scale and flips the y axis: source space has its
//! origin top-left with y growing downward, the device bed has its
//! origin bottom-left with y growing upward.

use crate::errors::ConvertError;
use crate::log::warn;
use crate::types::{Mm, NumericError, Point, PtDev, PtSrc, Tolerance};

/// What to do with a vertex that maps outside the bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Clamp the vertex onto the bed boundary and record a warning.
    #[default]
    Clamp,
    /// Abort the conversion.
    Reject,
}

/// A vertex that was clamped onto the bed boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsWarning {
    pub shape_index: usize,
    /// The mapped position before clamping.
    pub vertex: PtDev,
}

/// Conversion parameters and output templates.
///
/// The default profile matches a 200 x 200 mm pen-plotter bed with
/// G-code output: `G0` travel, `G1` draw, `M03`/`M05` pen control and
/// `G28` homing around the job.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bed_max_x: Mm,
    pub bed_max_y: Mm,
    pub tolerance: Tolerance,
    pub scale: f64,
    pub bounds_policy: BoundsPolicy,
    pub preamble: String,
    pub postamble: String,
    pub travel_template: String,
    pub draw_template: String,
    pub engage_template: String,
    pub disengage_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bed_max_x: Mm(200.0),
            bed_max_y: Mm(200.0),
            tolerance: Tolerance::DEFAULT,
            scale: 1.0,
            bounds_policy: BoundsPolicy::Clamp,
            preamble: "G21\nG90\nG28\nM05".into(),
            postamble: "G0 X0.000 Y0.000\nM05\nG28".into(),
            travel_template: "G0 X{x} Y{y}".into(),
            draw_template: "G1 X{x} Y{y}".into(),
            engage_template: "M03".into(),
            disengage_template: "M05".into(),
        }
    }
}

impl Config {
    /// Build a config with validated numeric fields, keeping the default
    /// output templates.
    pub fn new(
        bed_max_x: f64,
        bed_max_y: f64,
        tolerance: f64,
        scale: f64,
    ) -> Result<Config, ConvertError> {
        let bed_max_x = Mm::try_positive(bed_max_x).map_err(|source| ConvertError::Config {
            field: "bed_max_x",
            source,
        })?;
        let bed_max_y = Mm::try_positive(bed_max_y).map_err(|source| ConvertError::Config {
            field: "bed_max_y",
            source,
        })?;
        let tolerance = Tolerance::try_new(tolerance).map_err(|source| ConvertError::Config {
            field: "tolerance",
            source,
        })?;
        validate_scale(scale)?;
        Ok(Config {
            bed_max_x,
            bed_max_y,
            tolerance,
            scale,
            ..Config::default()
        })
    }
}

fn validate_scale(scale: f64) -> Result<(), ConvertError> {
    let source = if scale.is_nan() {
        NumericError::NaN
    } else if scale.is_infinite() {
        NumericError::Infinite
    } else if scale == 0.0 {
        NumericError::Zero
    } else if scale < 0.0 {
        NumericError::Negative
    } else {
        return Ok(());
    };
    Err(ConvertError::Config {
        field: "scale",
        source,
    })
}

/// The scale that fits a document onto the bed without upscaling:
/// `min(bed_x / width, bed_y / height, 1.0)`.
pub fn fit_scale(doc_width: f64, doc_height: f64, bed_max_x: Mm, bed_max_y: Mm) -> f64 {
    (bed_max_x.raw() / doc_width)
        .min(bed_max_y.raw() / doc_height)
        .min(1.0)
}

/// Maps source-space vertices into device millimetres.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    scale: f64,
    source_height: f64,
    bed_max_x: Mm,
    bed_max_y: Mm,
    policy: BoundsPolicy,
}

impl Mapper {
    pub fn new(config: &Config, source_height: f64) -> Mapper {
        Mapper {
            scale: config.scale,
            source_height,
            bed_max_x: config.bed_max_x,
            bed_max_y: config.bed_max_y,
            policy: config.bounds_policy,
        }
    }

    /// Map one vertex. Returns the device-space point plus a warning when
    /// the bounds policy clamped it onto the bed.
    pub fn map(
        &self,
        shape_index: usize,
        p: PtSrc,
    ) -> Result<(PtDev, Option<BoundsWarning>), ConvertError> {
        let x = p.x.raw() * self.scale;
        let y = (self.source_height - p.y.raw()) * self.scale;
        if !x.is_finite() || !y.is_finite() {
            return Err(ConvertError::Geometry {
                shape_index,
                shape_kind: "vertex",
                detail: format!("mapped coordinate ({x}, {y}) is not finite"),
            });
        }
        let mapped = Point::new(Mm(x), Mm(y));

        let inside = (0.0..=self.bed_max_x.raw()).contains(&x)
            && (0.0..=self.bed_max_y.raw()).contains(&y);
        if inside {
            return Ok((mapped, None));
        }

        match self.policy {
            BoundsPolicy::Reject => Err(ConvertError::OutOfBed {
                shape_index,
                x,
                y,
                bed_x: self.bed_max_x.raw(),
                bed_y: self.bed_max_y.raw(),
            }),
            BoundsPolicy::Clamp => {
                warn!(
                    "clamping vertex ({x:.3}, {y:.3}) of shape {shape_index} onto the bed"
                );
                let clamped = Point::new(
                    mapped.x.clamp(Mm::ZERO, self.bed_max_x),
                    mapped.y.clamp(Mm::ZERO, self.bed_max_y),
                );
                Ok((
                    clamped,
                    Some(BoundsWarning {
                        shape_index,
                        vertex: mapped,
                    }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceUnit;

    fn src(x: f64, y: f64) -> PtSrc {
        Point::new(SourceUnit(x), SourceUnit(y))
    }

    #[test]
    fn default_profile() {
        let config = Config::default();
        assert_eq!(config.bed_max_x, Mm(200.0));
        assert_eq!(config.bed_max_y, Mm(200.0));
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.bounds_policy, BoundsPolicy::Clamp);
        assert_eq!(config.tolerance.raw(), 0.2);
    }

    #[test]
    fn config_new_validates_fields() {
        assert!(Config::new(200.0, 200.0, 0.2, 1.0).is_ok());
        assert!(matches!(
            Config::new(0.0, 200.0, 0.2, 1.0),
            Err(ConvertError::Config { field: "bed_max_x", .. })
        ));
        assert!(matches!(
            Config::new(200.0, 200.0, -0.5, 1.0),
            Err(ConvertError::Config { field: "tolerance", .. })
        ));
        assert!(matches!(
            Config::new(200.0, 200.0, 0.2, f64::NAN),
            Err(ConvertError::Config { field: "scale", .. })
        ));
    }

    #[test]
    fn mapping_flips_y() {
        let config = Config::default();
        let mapper = Mapper::new(&config, 100.0);
        let (p, warning) = mapper.map(0, src(10.0, 10.0)).unwrap();
        assert_eq!(p, Point::new(Mm(10.0), Mm(90.0)));
        assert!(warning.is_none());
    }

    #[test]
    fn mapping_applies_scale() {
        let mut config = Config::default();
        config.scale = 0.5;
        let mapper = Mapper::new(&config, 100.0);
        let (p, _) = mapper.map(0, src(40.0, 20.0)).unwrap();
        assert_eq!(p, Point::new(Mm(20.0), Mm(40.0)));
    }

    #[test]
    fn clamp_policy_clamps_and_warns() {
        let config = Config::default();
        let mapper = Mapper::new(&config, 100.0);
        // y = (100 - (-50)) = 150, x = 250: x exceeds the bed.
        let (p, warning) = mapper.map(3, src(250.0, -50.0)).unwrap();
        assert_eq!(p, Point::new(Mm(200.0), Mm(150.0)));
        let warning = warning.unwrap();
        assert_eq!(warning.shape_index, 3);
        assert_eq!(warning.vertex, Point::new(Mm(250.0), Mm(150.0)));
    }

    #[test]
    fn clamp_policy_clamps_negative_device_y() {
        let config = Config::default();
        let mapper = Mapper::new(&config, 100.0);
        // Source y below the document bottom maps to negative device y.
        let (p, warning) = mapper.map(0, src(10.0, 120.0)).unwrap();
        assert_eq!(p, Point::new(Mm(10.0), Mm(0.0)));
        assert!(warning.is_some());
    }

    #[test]
    fn reject_policy_errors_out_of_bed() {
        let mut config = Config::default();
        config.bounds_policy = BoundsPolicy::Reject;
        let mapper = Mapper::new(&config, 100.0);
        let err = mapper.map(2, src(250.0, 10.0)).unwrap_err();
        assert!(matches!(err, ConvertError::OutOfBed { shape_index: 2, .. }));
    }

    #[test]
    fn fit_scale_shrinks_but_never_enlarges() {
        let bed = Mm(200.0);
        // Oversized document shrinks to fit.
        assert_eq!(fit_scale(400.0, 200.0, bed, bed), 0.5);
        // Undersized document is left at natural size.
        assert_eq!(fit_scale(100.0, 50.0, bed, bed), 1.0);
        // The tighter axis wins.
        assert_eq!(fit_scale(200.0, 800.0, bed, bed), 0.25);
    }
}
