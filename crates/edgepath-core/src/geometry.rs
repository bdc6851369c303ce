//! Point type, axis selection and bounding boxes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vertex position in model space.
pub type Point = nalgebra::Point3<f64>;

/// Decimal places kept on every loaded coordinate.
pub const COORDINATE_DECIMALS: i32 = 5;

/// Coordinate axis selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// Index of this axis in a point's coordinate array
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Component of `point` along this axis
    pub fn of(self, point: &Point) -> f64 {
        point[self.index()]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Z => write!(f, "Z"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Axis-aligned bounds of a point set projected on the XY plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Bounds of the given points, `None` when there are no points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_component() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.of(&p), 1.0);
        assert_eq!(Axis::Y.of(&p), 2.0);
        assert_eq!(Axis::Z.of(&p), 3.0);
        assert_eq!(Axis::default(), Axis::Z);
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("z".parse::<Axis>().unwrap(), Axis::Z);
        assert_eq!("X".parse::<Axis>().unwrap(), Axis::X);
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.1234567, 5), 0.12346);
        assert_eq!(round_to(-1.000004, 5), -1.0);
    }

    #[test]
    fn test_bounds() {
        let points = vec![
            Point::new(-1.0, 2.0, 0.0),
            Point::new(3.0, -4.0, 9.0),
            Point::new(0.5, 0.5, 0.0),
        ];
        let b = Bounds2::from_points(&points).unwrap();
        assert_eq!(b.min_x, -1.0);
        assert_eq!(b.max_y, 2.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert!(Bounds2::from_points(Vec::<Point>::new().iter()).is_none());
    }
}
