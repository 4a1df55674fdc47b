use crate::coords::{Point, Vector};
use crate::sampler::{clamp_pos, PathSampler};

/// Straight line from (0,0) to `end`
pub struct Line
{
    dir: Vector,
    length: f64
}

impl Line {
    pub fn new(end: Point) -> Line
    {
        let length = end.length();
        let dir = if length == 0.0 {
            Vector {x: 1.0, y: 0.0} // Arbitrary unit vector
        } else {
            end.unit()
        };
        Line{dir,
             length
        }
    }
}

impl PathSampler for Line {
    fn length(&self) -> f64
    {
        self.length
    }

    fn point_at(&self, pos: f64) -> Point
    {
        self.dir * clamp_pos(pos, self.length)
    }
}
