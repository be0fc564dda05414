//! Fixed points of interest that bias predicted meeting points.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::geo::GeoPoint;

/// A fixed point of interest supplied by the venue directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    /// Unique venue identifier.
    pub id: Uuid,

    /// Venue position in degrees.
    pub position: GeoPoint,

    /// Category tag, e.g. "coffee", "bar", "restaurant". Free-form; tags
    /// absent from the affinity table get a neutral multiplier.
    pub category: String,

    /// Popularity score in [0, 100].
    pub popularity: f64,

    /// Display name.
    pub name: String,
}

impl Venue {
    /// Create a venue record.
    pub fn new(
        id: Uuid,
        position: GeoPoint,
        category: impl Into<String>,
        popularity: f64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            position,
            category: category.into(),
            popularity,
            name: name.into(),
        }
    }

    /// Whether the position and popularity are finite numbers. Venues failing
    /// this check are ignored by the magnetism stage.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.popularity.is_finite()
    }
}
