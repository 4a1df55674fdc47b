use crate::coords::Point;
use crate::curves::line::Line;
use crate::sampler::{clamp_pos, PathSampler};

struct CurveSegment
{
    end_coord: Point,
    end_len: f64,
    curve: Box<dyn PathSampler + Send + Sync>
}

impl std::fmt::Debug for CurveSegment
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
    {
     write!(f," ->({}, {}) @{}", self.end_coord.x, self.end_coord.y, self.end_len)
    }
}

/// A path made of curves joined end to start. Each added curve starts at
/// (0,0) in its own coordinates and is translated to the end of the
/// previous one.
#[derive(Debug)]
pub struct ConcatCurve
{
    start: Point,
    segments: Vec<CurveSegment>
}

impl ConcatCurve
{
    pub fn new() -> ConcatCurve
    {
        ConcatCurve::with_start(Point{x: 0.0, y: 0.0})
    }

    pub fn with_start(start: Point) -> ConcatCurve
    {
        ConcatCurve{start, segments: Vec::new()}
    }

    /// Straight segments through `points`. The first point is the start
    /// of the path.
    pub fn polyline(points: &[Point]) -> ConcatCurve
    {
        let mut curve = match points.first() {
            Some(&p) => ConcatCurve::with_start(p),
            None => ConcatCurve::new()
        };
        for pair in points.windows(2) {
            curve.add(Box::new(Line::new(pair[1] - pair[0])));
        }
        curve
    }

    pub fn add(&mut self, curve: Box<dyn PathSampler + Send + Sync>)
    {
        let clen = curve.length();
        let end_coord = self.end();

        let seg = CurveSegment {
            end_coord: curve.point_at(clen) + end_coord,
            end_len: clen + self.length(),
            curve
        };
        self.segments.push(seg);
    }

    /// Coordinates of the end of the path
    pub fn end(&self) -> Point
    {
        match self.segments.last() {
            None => self.start,
            Some(seg) => seg.end_coord
        }
    }

    pub fn is_empty(&self) -> bool
    {
        self.segments.is_empty()
    }

    pub fn segment_count(&self) -> usize
    {
        self.segments.len()
    }
}

impl Default for ConcatCurve
{
    fn default() -> ConcatCurve
    {
        ConcatCurve::new()
    }
}

impl PathSampler for ConcatCurve {
    fn length(&self) -> f64
    {
        if let Some(s) = self.segments.last()
        {
            s.end_len
        } else {0.0}
    }

    fn point_at(&self, pos: f64) -> Point
    {
        if self.segments.is_empty() {
            return self.start;
        }
        let pos = clamp_pos(pos, self.length());
        match self.segments.binary_search_by(|s| s.end_len.total_cmp(&pos)) {
            Ok(i) | Err(i) => {
                let i = i.min(self.segments.len() - 1);
                let seg = &self.segments[i];
                let (start_coord, start_len) =
                    if i  > 0 {
                        let prev = &self.segments[i - 1];
                        (prev.end_coord, prev.end_len)
                    } else {
                        (self.start, 0.0)
                    };
                seg.curve.point_at(pos - start_len) + start_coord
            }
        }
    }
}
