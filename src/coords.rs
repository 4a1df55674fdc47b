use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the coordinate space of a path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point
{
    pub x: f64,
    pub y: f64
}

/// Same representation as `Point`, used where the value is a direction
/// or an offset rather than a position.
pub type Vector = Point;

impl Point
{
    pub fn new(x: f64, y: f64) -> Point
    {
        Point{x, y}
    }

    pub fn length(&self) -> f64
    {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared distance to `p`
    pub fn distance2(&self, p: Point) -> f64
    {
        let dx = self.x - p.x;
        let dy = self.y - p.y;
        dx * dx + dy * dy
    }

    pub fn unit(&self) -> Vector
    {
        *self * (1.0 / self.length())
    }

    pub fn rotate_90_ccw(&self) -> Vector
    {
        Vector{x: -self.y, y: self.x}
    }

    pub fn angle(&self) -> f64
    {
        self.y.atan2(self.x)
    }

    /// Z component of the cross product. Positive if `v` turns
    /// counter-clockwise relative to `self`.
    pub fn cross_mul(&self, v: Vector) -> f64
    {
        self.x * v.y - self.y * v.x
    }

    pub fn is_finite(&self) -> bool
    {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point
{
    fn from((x, y): (f64, f64)) -> Point
    {
        Point{x, y}
    }
}

impl From<Point> for (f64, f64)
{
    fn from(p: Point) -> (f64, f64)
    {
        (p.x, p.y)
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Point;
    fn add(self, v: Point) -> Point {
        Point { x: self.x + v.x,
                y: self.y + v.y}
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Point;
    fn sub(self, v: Point) -> Point {
        Point { x: self.x - v.x,
                y: self.y - v.y}
    }
}

impl std::ops::Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y}
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, s: f64) -> Point {
        Point { x: self.x * s,
                y: self.y * s}
    }
}

/// Axis aligned rectangle, e.g. a view box or the bounding box of a path
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect
{
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64
}

impl Rect
{
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect
    {
        Rect{x, y, width, height}
    }

    pub fn center(&self) -> Point
    {
        Point{x: self.x + self.width / 2.0,
              y: self.y + self.height / 2.0}
    }
}

/// Affine transform stored as the SVG matrix `[a b c d e f]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub matrix : [f64;6]
}

fn matrix_mul(a: &[f64; 6], b: &[f64; 6]) -> [f64; 6]
{
    [a[0] * b[0] + a[2]*b[1],
     a[1] * b[0] + a[3]*b[1],
     a[0] * b[2] + a[2]*b[3],
     a[1] * b[2] + a[3]*b[3],
     a[0] * b[4] + a[2]*b[5] + a[4],
     a[1] * b[4] + a[3]*b[5] + a[5]]
}

impl Transform {
    pub fn new(m :&[f64; 6]) -> Transform {
        Transform{matrix: *m}
    }
    pub fn identity() -> Transform {
        Transform{matrix:[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]}
    }

    pub fn translate(x: f64, y: f64) -> Transform {
        Transform{matrix:[1.0, 0.0, 0.0, 1.0, x, y]}
    }

    pub fn scale(s: f64) -> Transform {
        Transform{matrix:[s, 0.0, 0.0, s, 0.0, 0.0]}
    }

    /// Returns the inverse transform, or `None` if the matrix is singular
    pub fn inverse(&self) -> Option<Transform> {
        let [a, b, c, d, e, f] = self.matrix;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let id = 1.0 / det;
        Some(Transform{matrix: [d * id, -b * id,
                                -c * id, a * id,
                                (c * f - d * e) * id,
                                (b * e - a * f) * id]})
    }
}

impl Default for Transform
{
    fn default() -> Transform
    {
        Transform::identity()
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;
    fn mul(self, t: Self) -> Self {
        Transform  {matrix: matrix_mul(&self.matrix, &t.matrix)}
    }
}

impl std::ops::Mul<Point> for Transform {
    type Output = Point;
    fn mul(self, v: Point) -> Point {
        Point { x: self.matrix[0] * v.x + self.matrix[2] * v.y + self.matrix[4],
                y: self.matrix[1] * v.x + self.matrix[3] * v.y + self.matrix[5]}
    }
}

#[cfg(test)]
fn assert_matrix_eq(a:&[f64;6], b:&[f64;6])
{
    for (a,b) in a.iter().zip(b) {
        if (a-b).abs() > 1e-5 {
            panic!("{} != {}", a,b);
        }
    }
}

#[test]
fn test_transform_inverse()
{
    let t = Transform::new(&[1.3, 7.1, -23.0, 8.0, 1.45, -12.7]);
    let inv = t.inverse().unwrap();
    assert_matrix_eq(&(t * inv).matrix, &Transform::identity().matrix);
    assert_matrix_eq(&(inv * t).matrix, &Transform::identity().matrix);
    let p = Point::new(3.0, -4.5);
    let q = inv * (t * p);
    assert_relative_eq!(q.x, p.x, max_relative = 1e-9);
    assert_relative_eq!(q.y, p.y, max_relative = 1e-9);

    assert_eq!(Transform::scale(0.0).inverse(), None);
}

#[test]
fn test_translate()
{
    let t = Transform::translate(10.0, -2.0) * Transform::scale(2.0);
    assert_eq!(t * Point::new(1.0, 1.0), Point::new(12.0, 0.0));
    assert_eq!(Rect::new(0.0, 0.0, 200.0, 100.0).center(), Point::new(100.0, 50.0));
}

#[test]
fn test_point_json()
{
    let p: Point = serde_json::from_str("[1.5, -2]").unwrap();
    assert_eq!(p, Point::new(1.5, -2.0));
    assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");
}
