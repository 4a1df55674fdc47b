use crate::{
    coords::Point,
    curves::circle_segment::CircleSegment,
    curves::concat_curve::ConcatCurve,
    curves::line::Line,
    error::FinderError,
    finder::{ClosestPointFinder, FinderConfig, Improvement, SearchPhase},
    sampler::PathSampler,
};
use std::cell::Cell;
use std::f64::consts::PI;

fn line_100() -> Line {
    Line::new(Point { x: 100.0, y: 0.0 })
}

/// Counts the number of samples taken from the wrapped path
struct CountingSampler<S> {
    inner: S,
    count: Cell<usize>,
}

impl<S: PathSampler> PathSampler for CountingSampler<S> {
    fn length(&self) -> f64 {
        self.inner.length()
    }

    fn point_at(&self, pos: f64) -> Point {
        self.count.set(self.count.get() + 1);
        self.inner.point_at(pos)
    }
}

/// Reports a fixed length and a point on the x axis
struct BrokenSampler(f64);

impl PathSampler for BrokenSampler {
    fn length(&self) -> f64 {
        self.0
    }

    fn point_at(&self, pos: f64) -> Point {
        Point { x: pos, y: 0.0 }
    }
}

#[test]
fn test_exact_hit() {
    let res = ClosestPointFinder::default().find(&line_100(), Point { x: 48.0, y: 0.0 });
    assert_eq!(res.length, 48.0);
    assert_eq!(res.distance, 0.0);
    assert_eq!(res.point(), Point { x: 48.0, y: 0.0 });
}

#[test]
fn test_start_of_path() {
    let res = ClosestPointFinder::default().find(&line_100(), Point { x: 0.0, y: 0.0 });
    assert_eq!(res.length, 0.0);
    assert_eq!(res.distance, 0.0);
}

#[test]
fn test_off_curve() {
    let res = ClosestPointFinder::default().find(&line_100(), Point { x: 50.0, y: 10.0 });
    assert_abs_diff_eq!(res.length, 50.0, epsilon = 0.5);
    assert_abs_diff_eq!(res.distance, 10.0, epsilon = 0.02);
    assert_abs_diff_eq!(res.x, 50.0, epsilon = 0.5);
    assert_eq!(res.y, 0.0);
}

#[test]
fn test_degenerate_path() {
    let finder = ClosestPointFinder::default();
    let path = ConcatCurve::with_start(Point { x: 3.0, y: 4.0 });
    let res = finder.find(&path, Point { x: 10.0, y: 10.0 });
    assert_eq!(res.length, 0.0);
    assert_eq!(res.point(), Point { x: 3.0, y: 4.0 });
    assert_relative_eq!(res.distance, (49.0f64 + 36.0).sqrt(), max_relative = 1e-12);

    let res = finder.find(&Line::new(Point { x: 0.0, y: 0.0 }), Point { x: -1.0, y: 0.0 });
    assert_eq!(res.length, 0.0);
    assert_eq!(res.distance, 1.0);
}

#[test]
fn test_shorter_than_coarse_step() {
    let line = Line::new(Point { x: 3.0, y: 0.0 });
    let res = ClosestPointFinder::default().find(&line, Point { x: 2.9, y: 1.0 });
    assert_relative_eq!(res.length, 3.0, max_relative = 1e-12);
    assert_relative_eq!(res.distance, (0.01f64 + 1.0).sqrt(), max_relative = 1e-9);
}

#[test]
fn test_nearest_end_point() {
    let finder = ClosestPointFinder::default();
    let res = finder.find(&line_100(), Point { x: -50.0, y: 3.0 });
    assert_eq!(res.length, 0.0);
    assert_eq!(res.point(), Point { x: 0.0, y: 0.0 });

    let res = finder.find(&line_100(), Point { x: 250.0, y: -7.0 });
    assert_eq!(res.length, 100.0);
    assert_relative_eq!(res.distance, (150.0f64 * 150.0 + 49.0).sqrt(), max_relative = 1e-12);

    let res = finder.find(&line_100(), Point { x: 1e6, y: 1e6 });
    assert_eq!(res.length, 100.0);
}

#[test]
fn test_result_is_within_path() {
    let finder = ClosestPointFinder::default();
    let mut paths: Vec<Box<dyn PathSampler>> = Vec::new();
    paths.push(Box::new(line_100()));
    paths.push(Box::new(CircleSegment::new(30.0, 0.0, 2.0 * PI)));
    paths.push(Box::new(ConcatCurve::polyline(&[
        Point { x: 0.0, y: 0.0 },
        Point { x: 17.0, y: 33.0 },
        Point { x: -20.0, y: 41.5 },
        Point { x: 5.0, y: -12.0 },
    ])));
    paths.push(Box::new(Line::new(Point { x: 1.7, y: 0.2 })));
    for path in &paths {
        for ix in -5..=5 {
            for iy in -5..=5 {
                let query = Point { x: ix as f64 * 23.0, y: iy as f64 * 17.0 };
                let res = finder.find(path, query);
                assert!(res.distance >= 0.0);
                assert!(res.length >= 0.0 && res.length <= path.length(),
                        "length {} outside path for {}", res.length, query);
                let p = path.point_at(res.length);
                assert_eq!(p, res.point());
                assert_relative_eq!(res.distance, p.distance2(query).sqrt(),
                                    max_relative = 1e-12);
            }
        }
    }
}

#[test]
fn test_monotonic_improvement() {
    let finder = ClosestPointFinder::default();
    let circle = CircleSegment::new(40.0, -1.0, 4.0);
    let mut steps: Vec<Improvement> = Vec::new();
    let res = finder.search(&circle, Point { x: -30.0, y: 25.0 }, |imp| steps.push(imp));
    assert!(!steps.is_empty());
    assert_eq!(steps[0].phase, SearchPhase::Coarse);
    assert_eq!(steps[0].length, 0.0);
    for pair in steps.windows(2) {
        assert!(pair[1].distance2 < pair[0].distance2);
        // Coarse samples are never adopted after refinement started
        assert!(!(pair[0].phase == SearchPhase::Refine && pair[1].phase == SearchPhase::Coarse));
    }
    let last = steps.last().unwrap();
    assert_eq!(last.length, res.length);
    assert_relative_eq!(last.distance2.sqrt(), res.distance, max_relative = 1e-12);
}

#[test]
fn test_first_of_equal_wins() {
    // Samples at 48 and 52 are equally far away
    let mut steps: Vec<Improvement> = Vec::new();
    let res = ClosestPointFinder::default().search(&line_100(), Point { x: 50.0, y: 10.0 },
                                                   |imp| steps.push(imp));
    let last_coarse = steps.iter().filter(|s| s.phase == SearchPhase::Coarse).last().unwrap();
    assert_eq!(last_coarse.length, 48.0);
    assert_eq!(last_coarse.distance2, 104.0);
    let refined: Vec<f64> = steps.iter()
        .filter(|s| s.phase == SearchPhase::Refine)
        .map(|s| s.length)
        .collect();
    assert_eq!(refined, vec![50.0]);
    assert_eq!(res.length, 50.0);
    assert_eq!(res.distance, 10.0);
}

#[test]
fn test_sample_count() {
    let sampler = CountingSampler { inner: line_100(), count: Cell::new(0) };
    ClosestPointFinder::default().find(&sampler, Point { x: 50.0, y: 10.0 });
    // 26 coarse samples, 0..=100, then 46, 50, 48, 52, 49, 51
    assert_eq!(sampler.count.get(), 32);
}

#[test]
fn test_repeatable() {
    let finder = ClosestPointFinder::default();
    let circle = CircleSegment::new(25.0, 0.3, 5.0);
    let query = Point { x: -12.5, y: 7.25 };
    assert_eq!(finder.find(&circle, query), finder.find(&circle, query));
}

#[test]
fn test_custom_steps() {
    let finder = ClosestPointFinder::new(FinderConfig::new(1.0, 0.1).unwrap());
    let res = finder.find(&line_100(), Point { x: 50.3, y: 2.0 });
    assert_abs_diff_eq!(res.length, 50.3, epsilon = 0.15);

    // No refinement when the floor is above the first refinement step
    let finder = ClosestPointFinder::new(FinderConfig::new(4.0, 2.0).unwrap());
    let res = finder.find(&line_100(), Point { x: 50.0, y: 10.0 });
    assert_eq!(res.length, 48.0);
}

#[test]
fn test_full_circle() {
    let circle = CircleSegment::new(50.0, -PI / 2.0, 3.0 * PI / 2.0);
    let center = circle.center();
    // Query outside the circle, 30 units from the rim at angle 0.8
    let query = center + Point { x: 0.8f64.cos(), y: 0.8f64.sin() } * 80.0;
    let res = ClosestPointFinder::default().find(&circle, query);
    assert_abs_diff_eq!(res.distance, 30.0, epsilon = 0.02);
    assert_abs_diff_eq!(res.length, 50.0 * (0.8 + PI / 2.0), epsilon = 1.0);
}

#[test]
fn test_unchecked_input() {
    let finder = ClosestPointFinder::default();
    let res = finder.find(&BrokenSampler(-10.0), Point { x: 1.0, y: 1.0 });
    assert_eq!(res.length, 0.0);
    assert_eq!(res.point(), Point { x: 0.0, y: 0.0 });

    let res = finder.find(&line_100(), Point { x: f64::NAN, y: 1.0 });
    assert_eq!(res.length, 0.0);
    assert!(res.distance.is_nan());
}

#[test]
fn test_checked_input() {
    let finder = ClosestPointFinder::default();
    assert_eq!(finder.find_checked(&BrokenSampler(-10.0), Point { x: 1.0, y: 1.0 }),
               Err(FinderError::InvalidPathLength(-10.0)));
    assert!(matches!(finder.find_checked(&BrokenSampler(f64::INFINITY), Point { x: 1.0, y: 1.0 }),
                     Err(FinderError::InvalidPathLength(_))));
    assert!(matches!(finder.find_checked(&line_100(), Point { x: 1.0, y: f64::INFINITY }),
                     Err(FinderError::NonFiniteQuery { .. })));
    let res = finder.find_checked(&line_100(), Point { x: 48.0, y: 0.0 }).unwrap();
    assert_eq!(res.length, 48.0);
}
