use crate::coords::{Point, Vector};
use crate::sampler::{clamp_pos, PathSampler};
use std::f64::consts::PI;

/// Circular arc starting at (0,0)
pub struct CircleSegment
{
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    center: Point,
    angle_scale: f64
}

fn angle_scale(radius: f64, start_angle: f64, end_angle: f64) -> f64
{
    if start_angle <= end_angle {
        1.0 / radius
    } else {
        -1.0 / radius
    }
}

impl CircleSegment {
    /// Arc of `radius` running from `start_angle` to `end_angle`
    /// (radians, counter-clockwise if `end_angle` is larger).
    pub fn new(radius: f64,
               start_angle: f64,
               end_angle: f64) -> CircleSegment
    {
        CircleSegment{
            radius,
            start_angle,
            end_angle,
            center: {
                let (ss,sc) = start_angle.sin_cos();
                Point{x: -sc * radius,
                      y: -ss * radius}
            },
            angle_scale: angle_scale(radius, start_angle, end_angle)
        }
    }

    /// Arc ending at `end` that leaves the start point tangent to
    /// `start_direction`.
    pub fn new_start_direction(end: Point,
                               start_direction: Vector) -> CircleSegment
    {
        let p0 = end * 0.5;
        let p1 = end.rotate_90_ccw();
        let p2 = start_direction.rotate_90_ccw();
        let b =  (p1.x * p0.y - p0.x * p1.y) / (p1.x * p2.y - p2.x * p1.y);
        let center = p2 * b;
        let radius = center.length();
        let start_angle = (-center).angle();
        let mut end_angle = (end - center).angle();
        if start_direction.cross_mul(center) < 0.0 {
            // clockwise
            if end_angle > start_angle {
                end_angle -= 2.0*PI;
            }
        } else {
            // counter-clockwise
            if end_angle < start_angle {
                end_angle += 2.0*PI;
            }
        }

        CircleSegment{
            radius,
            start_angle,
            end_angle,
            center,
            angle_scale: angle_scale(radius, start_angle, end_angle)
        }
    }

    pub fn radius(&self) -> f64
    {
        self.radius
    }

    /// Center of the circle relative to the start point
    pub fn center(&self) -> Point
    {
        self.center
    }
}

impl PathSampler for CircleSegment {
    fn length(&self) -> f64
    {
        self.radius * (self.end_angle - self.start_angle).abs()
    }

    fn point_at(&self, pos: f64) -> Point
    {
        let pos = clamp_pos(pos, self.length());
        let a = pos * self.angle_scale + self.start_angle;
        let (s,c) = a.sin_cos();
        Point{x: c*self.radius, y: s*self.radius} + self.center
    }
}
