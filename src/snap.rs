//! Keeps a marker on a path while the user drags it around.
//!
//! The host calls `SnapHandler::on_pointer_move` for every pointer
//! position it receives and moves its marker to the returned point.

use crate::coords::{Point, Rect, Transform};
use crate::error::FinderError;
use crate::finder::{ClosestPointFinder, ClosestPointResult};
use crate::sampler::PathSampler;
use std::str::FromStr;

/// Where the marker starts before the first drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement
{
    /// Top left corner of the path's bounding box
    Square,
    /// Left edge of the bounding box, vertically centered
    Circle
}

impl FromStr for Placement
{
    type Err = String;
    fn from_str(s: &str) -> Result<Placement, String>
    {
        match s {
            "square" => Ok(Placement::Square),
            "circle" => Ok(Placement::Circle),
            _ => Err(format!("Unknown placement \"{}\"", s))
        }
    }
}

/// Initial marker position for a path of size `bounds` centered on
/// `center`.
pub fn initial_marker_position(center: Point, bounds: &Rect, placement: Placement) -> Point
{
    let x = center.x - bounds.width / 2.0;
    let y = match placement {
        Placement::Square => center.y - bounds.height / 2.0,
        Placement::Circle => center.y
    };
    Point{x, y}
}

/// Bounding box of the points sampled every `step` along the path,
/// including the end point.
pub fn sampled_bounds<S>(sampler: &S, step: f64) -> Rect
    where S: PathSampler + ?Sized
{
    let length = sampler.length();
    let start = sampler.point_at(0.0);
    let (mut min, mut max) = (start, start);
    let mut add = |p: Point| {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    };
    if step > 0.0 {
        let mut pos = step;
        while pos < length {
            add(sampler.point_at(pos));
            pos += step;
        }
    }
    if length > 0.0 {
        add(sampler.point_at(length));
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

fn check_length<S: PathSampler>(sampler: &S) -> Result<(), FinderError>
{
    let length = sampler.length();
    if length.is_finite() && length >= 0.0 {
        Ok(())
    } else {
        Err(FinderError::InvalidPathLength(length))
    }
}

pub struct SnapHandler<S>
{
    sampler: S,
    finder: ClosestPointFinder,
    to_path: Transform,   // Pointer coordinates to path coordinates
    from_path: Transform,
    marker: Point,
    last: Option<ClosestPointResult>
}

impl<S: PathSampler> SnapHandler<S>
{
    /// `path_to_pointer` maps path coordinates to the coordinates of
    /// pointer events. `marker` is the initial marker position in pointer
    /// coordinates. Fails for a singular transform or a path whose length
    /// is negative or not finite.
    pub fn new(sampler: S,
               finder: ClosestPointFinder,
               path_to_pointer: Transform,
               marker: Point) -> Result<SnapHandler<S>, FinderError>
    {
        check_length(&sampler)?;
        let to_path = path_to_pointer.inverse()
            .ok_or(FinderError::SingularTransform)?;
        Ok(SnapHandler{sampler,
                       finder,
                       to_path,
                       from_path: path_to_pointer,
                       marker,
                       last: None})
    }

    /// Moves the path so that its bounding box is centered in `viewbox`
    /// and places the marker according to `placement`. Fails for a path
    /// whose length is negative or not finite.
    pub fn centered(sampler: S,
                    finder: ClosestPointFinder,
                    viewbox: &Rect,
                    placement: Placement) -> Result<SnapHandler<S>, FinderError>
    {
        check_length(&sampler)?;
        let bounds = sampled_bounds(&sampler, finder.config().coarse_step());
        let center = viewbox.center();
        let offset = center - bounds.center();
        let marker = initial_marker_position(center, &bounds, placement);
        log::debug!("Path bounds {:?} moved by {}, marker at {}", bounds, offset, marker);
        let to_path = Transform::translate(-offset.x, -offset.y);
        Ok(SnapHandler{sampler,
                       finder,
                       to_path,
                       from_path: Transform::translate(offset.x, offset.y),
                       marker,
                       last: None})
    }

    /// Snaps `pointer` to the path and returns the new marker position.
    /// The marker stays where it is if the search gives no usable point,
    /// and `last_result` is cleared.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Point
    {
        let query = self.to_path * pointer;
        let result = self.finder.find(&self.sampler, query);
        let snapped = self.from_path * result.point();
        if snapped.is_finite() && result.distance.is_finite() {
            self.marker = snapped;
            self.last = Some(result);
        } else {
            self.last = None;
            log::warn!("No point on path for pointer at {}", pointer);
        }
        self.marker
    }

    pub fn marker(&self) -> Point
    {
        self.marker
    }

    /// Search result of the last pointer move, in path coordinates. `None`
    /// before the first move and after a move that gave no usable point.
    pub fn last_result(&self) -> Option<&ClosestPointResult>
    {
        self.last.as_ref()
    }
}
