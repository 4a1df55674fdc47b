//! Closest point search along an arc length parameterised path.
//!
//! The search samples the path at fixed arc length intervals to find a
//! rough position and then hill-climbs from there with a shrinking step.
//! It only finds a local optimum around the best coarse sample, which is
//! good enough for tracking a pointer along a path.

use crate::coords::Point;
use crate::error::FinderError;
use crate::sampler::PathSampler;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COARSE_STEP: f64 = 4.0;
pub const DEFAULT_MIN_STEP: f64 = 0.5;

/// Step sizes of the search, in the units of the path coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFinderConfig")]
pub struct FinderConfig
{
    coarse_step: f64, // Sampling interval of the linear scan
    min_step: f64     // Refinement stops when the step is not above this
}

#[derive(Deserialize)]
#[serde(default)]
struct RawFinderConfig
{
    coarse_step: f64,
    min_step: f64
}

impl Default for RawFinderConfig
{
    fn default() -> RawFinderConfig
    {
        RawFinderConfig{coarse_step: DEFAULT_COARSE_STEP,
                        min_step: DEFAULT_MIN_STEP}
    }
}

impl TryFrom<RawFinderConfig> for FinderConfig
{
    type Error = FinderError;
    fn try_from(raw: RawFinderConfig) -> Result<FinderConfig, FinderError>
    {
        FinderConfig::new(raw.coarse_step, raw.min_step)
    }
}

fn check_step(name: &'static str, value: f64) -> Result<f64, FinderError>
{
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FinderError::InvalidStep{name, value})
    }
}

impl FinderConfig
{
    /// Both steps must be finite and positive. A `min_step` not smaller
    /// than half of `coarse_step` disables the refinement.
    pub fn new(coarse_step: f64, min_step: f64) -> Result<FinderConfig, FinderError>
    {
        Ok(FinderConfig{coarse_step: check_step("coarse step", coarse_step)?,
                        min_step: check_step("minimum step", min_step)?})
    }

    pub fn coarse_step(&self) -> f64
    {
        self.coarse_step
    }

    pub fn min_step(&self) -> f64
    {
        self.min_step
    }

    pub fn with_coarse_step(self, coarse_step: f64) -> Result<FinderConfig, FinderError>
    {
        FinderConfig::new(coarse_step, self.min_step)
    }

    pub fn with_min_step(self, min_step: f64) -> Result<FinderConfig, FinderError>
    {
        FinderConfig::new(self.coarse_step, min_step)
    }
}

impl Default for FinderConfig
{
    fn default() -> FinderConfig
    {
        FinderConfig{coarse_step: DEFAULT_COARSE_STEP,
                     min_step: DEFAULT_MIN_STEP}
    }
}

/// The best sample found by a search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestPointResult
{
    pub x: f64,
    pub y: f64,
    /// Euclidean distance to the query point
    pub distance: f64,
    /// Arc length from the start of the path
    pub length: f64
}

impl ClosestPointResult
{
    pub fn point(&self) -> Point
    {
        Point{x: self.x, y: self.y}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase
{
    Coarse,
    Refine
}

/// A sample that replaced the previous best one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improvement
{
    pub phase: SearchPhase,
    pub length: f64,
    pub distance2: f64
}

#[derive(Debug, Clone, Copy)]
struct Best
{
    point: Point,
    length: f64,
    distance2: f64
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClosestPointFinder
{
    config: FinderConfig
}

impl ClosestPointFinder
{
    pub fn new(config: FinderConfig) -> ClosestPointFinder
    {
        ClosestPointFinder{config}
    }

    pub fn config(&self) -> &FinderConfig
    {
        &self.config
    }

    /// Returns the point on `sampler` closest to `query` among the
    /// sampled ones.
    ///
    /// Never fails. Negative or non-finite path lengths and non-finite
    /// queries are not checked, the result then is the start of the path
    /// or carries NaN values. Use `find_checked` to reject such input.
    pub fn find<S>(&self, sampler: &S, query: Point) -> ClosestPointResult
        where S: PathSampler + ?Sized
    {
        self.search(sampler, query, |_| {})
    }

    /// Like `find` but rejects a negative or non-finite path length and
    /// a non-finite query point.
    pub fn find_checked<S>(&self, sampler: &S, query: Point)
                           -> Result<ClosestPointResult, FinderError>
        where S: PathSampler + ?Sized
    {
        let path_length = sampler.length();
        if !(path_length.is_finite() && path_length >= 0.0) {
            return Err(FinderError::InvalidPathLength(path_length));
        }
        if !query.is_finite() {
            return Err(FinderError::NonFiniteQuery{x: query.x, y: query.y});
        }
        Ok(self.find(sampler, query))
    }

    /// Runs the search and calls `observer` each time a sample replaces
    /// the current best one.
    ///
    /// Phase one samples the path every `coarse_step` from 0 up to and
    /// including the path length. Phase two starts with half the coarse
    /// step and moves the best position one step backwards or forwards
    /// as long as that gets closer, otherwise halves the step, until the
    /// step is not above `min_step`. Only strict improvements are
    /// adopted so the first of equally distant samples wins.
    pub fn search<S, F>(&self, sampler: &S, query: Point, mut observer: F)
                        -> ClosestPointResult
        where S: PathSampler + ?Sized,
              F: FnMut(Improvement)
    {
        let path_length = sampler.length();
        let mut samples = 0usize;
        let mut sample = |pos: f64| {
            samples += 1;
            let p = sampler.point_at(pos);
            (p, p.distance2(query))
        };

        let mut best: Option<Best> = None;
        let mut scan_length = 0.0;
        while scan_length <= path_length {
            let (point, distance2) = sample(scan_length);
            if distance2 < best.map_or(f64::INFINITY, |b| b.distance2) {
                best = Some(Best{point, length: scan_length, distance2});
                observer(Improvement{phase: SearchPhase::Coarse,
                                     length: scan_length,
                                     distance2});
            }
            scan_length += self.config.coarse_step;
        }

        // Only reached without a candidate if the path length is negative
        // or NaN, or if every sample is infinitely far away
        let mut best = match best {
            Some(best) => best,
            None => {
                let (point, distance2) = sample(0.0);
                Best{point, length: 0.0, distance2}
            }
        };

        let mut step = self.config.coarse_step / 2.0;
        while step > self.config.min_step {
            let before_length = best.length - step;
            if before_length >= 0.0 {
                let (point, distance2) = sample(before_length);
                if distance2 < best.distance2 {
                    best = Best{point, length: before_length, distance2};
                    log::trace!("Step {} back to {}, distance2 {}",
                                step, before_length, distance2);
                    observer(Improvement{phase: SearchPhase::Refine,
                                         length: before_length,
                                         distance2});
                    continue;
                }
            }
            let after_length = best.length + step;
            if after_length <= path_length {
                let (point, distance2) = sample(after_length);
                if distance2 < best.distance2 {
                    best = Best{point, length: after_length, distance2};
                    log::trace!("Step {} forward to {}, distance2 {}",
                                step, after_length, distance2);
                    observer(Improvement{phase: SearchPhase::Refine,
                                         length: after_length,
                                         distance2});
                    continue;
                }
            }
            step /= 2.0;
        }

        log::debug!("Closest point to {} at length {} of {} after {} samples",
                    query, best.length, path_length, samples);
        ClosestPointResult{x: best.point.x,
                           y: best.point.y,
                           distance: best.distance2.sqrt(),
                           length: best.length}
    }
}

#[test]
fn test_config_defaults()
{
    let config = FinderConfig::default();
    assert_eq!(config.coarse_step(), 4.0);
    assert_eq!(config.min_step(), 0.5);
    assert_eq!(ClosestPointFinder::default().config(), &config);
}

#[test]
fn test_config_rejects_bad_steps()
{
    assert!(FinderConfig::new(0.0, 0.5).is_err());
    assert!(FinderConfig::new(4.0, -1.0).is_err());
    assert!(FinderConfig::new(f64::NAN, 0.5).is_err());
    assert!(FinderConfig::new(4.0, f64::INFINITY).is_err());
    assert_eq!(FinderConfig::new(1.0, 2.0).map(|c| c.min_step()), Ok(2.0));
    assert_eq!(FinderConfig::default().with_coarse_step(-2.0),
               Err(FinderError::InvalidStep{name: "coarse step", value: -2.0}));
}

#[test]
fn test_config_json()
{
    let config: FinderConfig = serde_json::from_str(r#"{"coarse_step": 2.0}"#).unwrap();
    assert_eq!(config, FinderConfig::new(2.0, 0.5).unwrap());
    let config: FinderConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, FinderConfig::default());
    assert!(serde_json::from_str::<FinderConfig>(r#"{"min_step": 0}"#).is_err());
}
