use crate::coords::Point;

/// A finite continuous path parameterised by arc length.
pub trait PathSampler
{
    /// Returns total length of the path
    fn length(&self) -> f64;

    /// Returns the coordinates at a given position along the path.
    ///
    /// # Arguments
    ///
    /// * `pos` - Distance from the start along the path, in the range
    /// 0.0..=length(). Implementations in this crate clamp values outside
    /// that range, but callers should not rely on it.
    fn point_at(&self, pos: f64) -> Point;
}

impl<S: PathSampler + ?Sized> PathSampler for &S
{
    fn length(&self) -> f64
    {
        (**self).length()
    }

    fn point_at(&self, pos: f64) -> Point
    {
        (**self).point_at(pos)
    }
}

impl<S: PathSampler + ?Sized> PathSampler for Box<S>
{
    fn length(&self) -> f64
    {
        (**self).length()
    }

    fn point_at(&self, pos: f64) -> Point
    {
        (**self).point_at(pos)
    }
}

/// Clamps `pos` into 0.0..=length. NaN is passed through.
pub(crate) fn clamp_pos(pos: f64, length: f64) -> f64
{
    if pos < 0.0 {
        0.0
    } else if pos > length {
        length
    } else {
        pos
    }
}
