//! Geographic primitives shared by every pipeline stage.
//!
//! Positions are plain (longitude, latitude) degree pairs and velocities are
//! metric vectors along the same axes. Two approximations from the reference
//! model are deliberately kept and isolated here:
//!
//! - Distance between nearby points uses the haversine formula with a
//!   spherical Earth (R = 6,371,000 m).
//! - Velocity-to-displacement conversion in [`project`] treats one degree as
//!   a constant 111,320 m on both axes, with no latitude correction. Swapping
//!   in a latitude-corrected projection only requires changing this module.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree used by the flat-earth projection, on both axes.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude in degrees.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Midpoint of two points, component-wise in degree space.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            lon: (self.lon + other.lon) / 2.0,
            lat: (self.lat + other.lat) / 2.0,
        }
    }

    /// Blend this point toward `target` with the given weight in [0, 1].
    ///
    /// `weight = 0` returns `self`, `weight = 1` returns `target`.
    pub fn blend_toward(&self, target: &Self, weight: f64) -> Self {
        Self {
            lon: self.lon * (1.0 - weight) + target.lon * weight,
            lat: self.lat * (1.0 - weight) + target.lat * weight,
        }
    }
}

/// A velocity vector in meters per second along the longitude and latitude
/// axes. Not great-circle-corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Meters per second along the longitude axis.
    pub east: f64,
    /// Meters per second along the latitude axis.
    pub north: f64,
}

impl Velocity {
    /// Create a velocity from its longitude- and latitude-axis components.
    pub const fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// Scalar speed in meters per second.
    pub fn speed(&self) -> f64 {
        self.east.hypot(self.north)
    }

    /// Squared magnitude, cheaper than [`speed`](Self::speed) when only a
    /// threshold comparison is needed.
    pub fn magnitude_squared(&self) -> f64 {
        self.east * self.east + self.north * self.north
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.east.is_finite() && self.north.is_finite()
    }

    /// Component-wise difference `self - other`.
    pub fn minus(&self, other: &Self) -> Self {
        Self {
            east: self.east - other.east,
            north: self.north - other.north,
        }
    }
}

/// Project a position forward along a velocity for `seconds`, converting the
/// metric displacement to degrees at a constant 111,320 m/degree.
pub fn project(position: &GeoPoint, velocity: &Velocity, seconds: f64) -> GeoPoint {
    GeoPoint {
        lon: position.lon + velocity.east * seconds / METERS_PER_DEGREE,
        lat: position.lat + velocity.north * seconds / METERS_PER_DEGREE,
    }
}

/// Great-circle distance in meters between two points (haversine).
pub fn haversine_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
