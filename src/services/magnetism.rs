//! Venue magnetism: biases a predicted meeting toward a nearby point of
//! interest, weighted by popularity, time-of-day affinity, and proximity.

use tracing::trace;

use crate::domain::geo::{self, GeoPoint};
use crate::domain::models::{Convergence, DayPeriod, MagnetismConfig, Venue};

/// Stateless venue-bias stage.
#[derive(Debug, Clone)]
pub struct VenueMagnetism {
    config: MagnetismConfig,
}

impl VenueMagnetism {
    /// Create the stage with the given tuning.
    pub const fn new(config: MagnetismConfig) -> Self {
        Self { config }
    }

    /// Apply venue bias to a pairwise candidate in place.
    ///
    /// Finds the nearest finite venue to the raw convergence point. When it
    /// sits inside the search radius, the candidate's probability is scaled
    /// by the magnetism factor and its point may be blended toward the venue.
    /// The venue is attached to the result only when it ends up within the
    /// attach radius of the final point.
    pub fn apply(&self, candidate: &mut Convergence, venues: &[Venue], period: DayPeriod) {
        let Some((venue, distance_m)) = self.nearest_venue(&candidate.point, venues) else {
            return;
        };

        if distance_m < self.config.search_radius_m {
            let popularity_weight = self.config.popularity_weight(venue.popularity);
            let affinity = self.config.affinity_multiplier(period, &venue.category);
            let distance_decay = (-distance_m / self.config.distance_decay_m).exp();
            let magnetism = self.config.base_factor * popularity_weight * affinity * distance_decay;

            candidate.scale_probability(magnetism);

            let venue_weight =
                ((magnetism - 1.0) * self.config.blend_gain).clamp(0.0, self.config.blend_cap);
            if venue_weight > self.config.blend_floor {
                candidate.point = candidate.point.blend_toward(&venue.position, venue_weight);
            }

            trace!(
                venue = %venue.name,
                distance_m,
                magnetism,
                venue_weight,
                "venue magnetism applied"
            );
        }

        let final_distance_m = geo::haversine_m(&venue.position, &candidate.point);
        if final_distance_m < self.config.attach_radius_m {
            candidate.nearest_venue = Some(venue.clone());
        }
    }

    /// Nearest finite venue to a point, with its distance in meters.
    fn nearest_venue<'a>(&self, point: &GeoPoint, venues: &'a [Venue]) -> Option<(&'a Venue, f64)> {
        venues
            .iter()
            .filter(|venue| venue.is_finite())
            .map(|venue| (venue, geo::haversine_m(&venue.position, point)))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::METERS_PER_DEGREE;
    use uuid::Uuid;

    fn candidate_at(lon: f64, lat: f64, probability: f64) -> Convergence {
        Convergence::pair(
            Uuid::new_v4(),
            Uuid::new_v4(),
            GeoPoint::new(lon, lat),
            30.0,
            probability,
        )
    }

    fn venue_at_meters(east_m: f64, category: &str, popularity: f64) -> Venue {
        Venue::new(
            Uuid::new_v4(),
            GeoPoint::new(east_m / METERS_PER_DEGREE, 0.0),
            category,
            popularity,
            "Test Venue",
        )
    }

    fn stage() -> VenueMagnetism {
        VenueMagnetism::new(MagnetismConfig::default())
    }

    #[test]
    fn test_no_venues_is_noop() {
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        stage().apply(&mut candidate, &[], DayPeriod::Morning);
        assert!((candidate.probability - 0.7).abs() < f64::EPSILON);
        assert!(candidate.nearest_venue.is_none());
    }

    #[test]
    fn test_far_venue_is_noop() {
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        let venues = vec![venue_at_meters(200.0, "coffee", 90.0)];
        stage().apply(&mut candidate, &venues, DayPeriod::Morning);
        assert!((candidate.probability - 0.7).abs() < f64::EPSILON);
        assert!(candidate.nearest_venue.is_none());
    }

    #[test]
    fn test_popular_matching_venue_boosts_and_pulls() {
        // Popular coffee shop 20 m away in the morning:
        // magnetism = 1.4 * 1.5 * 1.8 * exp(-20/30) ~ 1.94
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        let venues = vec![venue_at_meters(20.0, "coffee", 85.0)];
        stage().apply(&mut candidate, &venues, DayPeriod::Morning);

        // 0.7 * 1.94 ~ 1.36: the boost is applied raw, with no cap here.
        assert!(candidate.probability > 1.0, "p = {}", candidate.probability);
        assert!((candidate.probability - 1.357).abs() < 0.01);
        // Point shifted measurably toward the venue (east).
        assert!(candidate.point.lon > 1e-6);
        assert!(candidate.nearest_venue.is_some());
    }

    #[test]
    fn test_popularity_monotonicity() {
        // Identical distance and category, different popularity tiers.
        let mut high = candidate_at(0.0, 0.0, 0.5);
        let mut low = candidate_at(0.0, 0.0, 0.5);
        stage().apply(
            &mut high,
            &[venue_at_meters(20.0, "coffee", 90.0)],
            DayPeriod::Morning,
        );
        stage().apply(
            &mut low,
            &[venue_at_meters(20.0, "coffee", 40.0)],
            DayPeriod::Morning,
        );
        assert!(high.probability > low.probability);
    }

    #[test]
    fn test_weak_magnetism_leaves_point() {
        // Unpopular, unmatched category, 70 m out: magnetism well below 1,
        // so the probability drops and the blend never engages.
        let mut candidate = candidate_at(0.0, 0.0, 0.9);
        let venues = vec![venue_at_meters(70.0, "laundromat", 10.0)];
        stage().apply(&mut candidate, &venues, DayPeriod::Morning);

        assert!(candidate.probability < 0.9);
        assert!(candidate.point.lon.abs() < f64::EPSILON);
        // 70 m is outside the 50 m attach radius.
        assert!(candidate.nearest_venue.is_none());
    }

    #[test]
    fn test_attach_radius_uses_blended_point() {
        // Venue close enough to both bias and attach.
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        let venues = vec![venue_at_meters(40.0, "bar", 95.0)];
        stage().apply(&mut candidate, &venues, DayPeriod::Night);

        // Night + bar + popular: strong pull drags the point inside 50 m.
        let venue = candidate.nearest_venue.as_ref().expect("attached");
        let d = geo::haversine_m(&venue.position, &candidate.point);
        assert!(d < 50.0, "final distance {d}");
    }

    #[test]
    fn test_nearest_of_several_wins() {
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        let near = venue_at_meters(15.0, "coffee", 85.0);
        let near_id = near.id;
        let venues = vec![venue_at_meters(60.0, "bar", 95.0), near];
        stage().apply(&mut candidate, &venues, DayPeriod::Morning);
        assert_eq!(candidate.nearest_venue.expect("attached").id, near_id);
    }

    #[test]
    fn test_non_finite_venue_ignored() {
        let mut candidate = candidate_at(0.0, 0.0, 0.7);
        let mut broken = venue_at_meters(10.0, "coffee", 85.0);
        broken.position = GeoPoint::new(f64::NAN, 0.0);
        stage().apply(&mut candidate, &[broken], DayPeriod::Morning);
        assert!((candidate.probability - 0.7).abs() < f64::EPSILON);
        assert!(candidate.nearest_venue.is_none());
    }
}
