//! Proximity matching between the user's location and task places.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Default alert radius in meters
pub const DEFAULT_THRESHOLD_M: f64 = 100.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates, in meters
pub fn distance_m(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Tasks whose stored place lies strictly within `threshold_m` of `user`.
///
/// A task with no place is skipped, as is one whose stored coordinates are
/// the unset sentinel (latitude and longitude not both positive) left
/// behind by older records.
pub fn find_nearby(tasks: &[Task], user: Coordinates, threshold_m: f64) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| {
            let Some(place) = task.place.as_ref() else {
                return false;
            };
            if !(place.latitude > 0.0 && place.longitude > 0.0) {
                return false;
            }
            distance_m(user, place.coordinates()) < threshold_m
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Place;
    use crate::task::Priority;
    use chrono::Utc;

    fn task_at(id: &str, latitude: f64, longitude: f64) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            due_date: None,
            due_time: None,
            place: Some(Place {
                name: format!("{id} place"),
                latitude,
                longitude,
            }),
            priority: Priority::None,
            category: None,
            is_complete: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Roughly 0.000899 degrees of latitude per 100 m.
    const LAT_DEG_PER_100M: f64 = 100.0 / 111_195.0;

    #[test]
    fn distance_between_identical_points_is_zero() {
        let point = Coordinates::new(48.8584, 2.2945);
        assert!(distance_m(point, point) < f64::EPSILON);
    }

    #[test]
    fn distance_is_roughly_right_for_known_pair() {
        // Eiffel Tower to Arc de Triomphe, about 2.2 km.
        let eiffel = Coordinates::new(48.8584, 2.2945);
        let arc = Coordinates::new(48.8738, 2.2950);
        let distance = distance_m(eiffel, arc);
        assert!((1_600.0..2_400.0).contains(&distance), "got {distance}");
    }

    #[test]
    fn nearby_uses_strict_threshold() {
        let user = Coordinates::new(40.0, 20.0);
        let near = task_at("near", 40.0 + 0.99 * LAT_DEG_PER_100M, 20.0);
        let far = task_at("far", 40.0 + 1.01 * LAT_DEG_PER_100M, 20.0);

        let tasks = vec![near, far];
        let hits = find_nearby(&tasks, user, DEFAULT_THRESHOLD_M);
        let ids: Vec<&str> = hits.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn sentinel_coordinates_are_never_eligible() {
        let user = Coordinates::new(0.0, 0.0);
        let sentinel = task_at("sentinel", 0.0, 0.0);
        let half_set = task_at("half", 40.0, 0.0);

        let tasks = vec![sentinel, half_set];
        assert!(find_nearby(&tasks, user, DEFAULT_THRESHOLD_M).is_empty());
    }

    #[test]
    fn task_without_place_is_skipped() {
        let user = Coordinates::new(40.0, 20.0);
        let mut task = task_at("no-place", 40.0, 20.0);
        task.place = None;

        let tasks = vec![task];
        assert!(find_nearby(&tasks, user, DEFAULT_THRESHOLD_M).is_empty());
    }
}
