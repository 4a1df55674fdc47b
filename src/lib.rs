//! Finds the point on an arbitrary 2D path closest to a query point,
//! using nothing but a "point at arc length" sampler of the path.

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod coords;
pub mod error;
pub mod finder;
pub mod finder_config_parser;
pub mod path_description;
pub mod point_parser;
pub mod sampler;
pub mod snap;

pub mod curves {
    pub mod circle_segment;
    pub mod concat_curve;
    pub mod line;
}

pub use coords::Point;
pub use finder::{ClosestPointFinder, ClosestPointResult, FinderConfig};
pub use sampler::PathSampler;

#[cfg(test)]
mod tests;
