use crate::coords::{Point, Vector};
use crate::curves::circle_segment::CircleSegment;
use crate::curves::concat_curve::ConcatCurve;
use crate::curves::line::Line;
use crate::error::PathError;
use crate::sampler::PathSampler;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A path made of connected lines and arcs, as read from JSON:
///
/// ```json
/// {"start": [10, 20],
///  "segments": [{"type": "line", "to": [100, 0]},
///               {"type": "arc", "to": [0, 50], "start_direction": [1, 0]}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathDescription
{
    #[serde(default)]
    pub start: Point,
    pub segments: Vec<SegmentDescription>
}

/// One segment of a path. `to` is relative to the end of the previous
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentDescription
{
    Line { to: Vector },
    /// Arc ending at `to` that starts tangent to `start_direction`
    Arc { to: Vector, start_direction: Vector },
    /// Arc given by radius and angles (radians) on the circle
    Circle { radius: f64, start_angle: f64, end_angle: f64 }
}

fn invalid(index: usize, reason: &str) -> PathError
{
    PathError::InvalidSegment{index, reason: reason.to_string()}
}

impl PathDescription
{
    pub fn build(&self) -> Result<ConcatCurve, PathError>
    {
        if !self.start.is_finite() {
            return Err(PathError::InvalidStart(self.start));
        }
        let mut curve = ConcatCurve::with_start(self.start);
        for (index, seg) in self.segments.iter().enumerate() {
            match *seg {
                SegmentDescription::Line{to} => {
                    if !to.is_finite() {
                        return Err(invalid(index, "end point is not finite"));
                    }
                    curve.add(Box::new(Line::new(to)));
                },
                SegmentDescription::Arc{to, start_direction} => {
                    if !(to.is_finite() && start_direction.is_finite()) {
                        return Err(invalid(index, "coordinates are not finite"));
                    }
                    if to.length() == 0.0 || start_direction.length() == 0.0 {
                        return Err(invalid(index, "zero length arc or direction"));
                    }
                    // The center would be at infinity
                    if start_direction.cross_mul(to) == 0.0 {
                        return Err(invalid(index, "start direction is parallel to the arc chord"));
                    }
                    curve.add(Box::new(CircleSegment::new_start_direction(to, start_direction)));
                },
                SegmentDescription::Circle{radius, start_angle, end_angle} => {
                    if !(radius.is_finite() && radius > 0.0) {
                        return Err(invalid(index, "radius must be finite and positive"));
                    }
                    if !(start_angle.is_finite() && end_angle.is_finite()) {
                        return Err(invalid(index, "angles are not finite"));
                    }
                    curve.add(Box::new(CircleSegment::new(radius, start_angle, end_angle)));
                }
            }
            // Sampling a path of infinite length never ends
            if !(curve.length().is_finite() && curve.end().is_finite()) {
                return Err(invalid(index, "path length is not finite"));
            }
        }
        log::debug!("Built path with {} segments", curve.segment_count());
        Ok(curve)
    }
}

pub fn parse_path(json: &str) -> Result<ConcatCurve, PathError>
{
    let descr: PathDescription = serde_json::from_str(json)?;
    descr.build()
}

pub fn read_path<P: AsRef<Path>>(file_name: P) -> Result<ConcatCurve, PathError>
{
    let file = File::open(file_name)?;
    let descr: PathDescription = serde_json::from_reader(BufReader::new(file))?;
    descr.build()
}
