use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::validation::{
    non_negative_patch, optional_description, optional_park_area, positive_height,
    positive_height_patch, required_label,
};
use crate::Patch;

/// A park attraction that fast passes can be bought for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    /// Minimum rider height in meters, `None` when unrestricted.
    pub min_height: Option<f64>,
    /// Current standby wait in minutes.
    pub queue_time: i32,
    pub park_area: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ride {
    /// Applies the fields present in `update` and stamps `updated_at`.
    pub fn apply_update(&mut self, update: RideUpdate, now: DateTime<Utc>) {
        update.name.apply_to(&mut self.name);
        update.location.apply_to(&mut self.location);
        update.description.apply_to_option(&mut self.description);
        update.min_height.apply_to_option(&mut self.min_height);
        update.queue_time.apply_to(&mut self.queue_time);
        update.park_area.apply_to_option(&mut self.park_area);
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewRide {
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[garde(length(chars, min = 1, max = 100))]
    pub location: String,
    #[serde(default)]
    #[garde(length(chars, max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    #[garde(custom(positive_height))]
    pub min_height: Option<f64>,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub queue_time: i32,
    #[serde(default)]
    #[garde(length(chars, max = 50))]
    pub park_area: Option<String>,
}

impl NewRide {
    pub fn into_ride(self, id: i64, now: DateTime<Utc>) -> Ride {
        Ride {
            id,
            name: self.name,
            location: self.location,
            description: self.description,
            min_height: self.min_height,
            queue_time: self.queue_time,
            park_area: self.park_area,
            created_at: now,
            updated_at: None,
        }
    }
}

/// Partial ride update. Only keys present in the request body are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct RideUpdate {
    #[serde(default)]
    #[garde(custom(required_label))]
    pub name: Patch<String>,
    #[serde(default)]
    #[garde(custom(required_label))]
    pub location: Patch<String>,
    #[serde(default)]
    #[garde(custom(optional_description))]
    pub description: Patch<String>,
    #[serde(default)]
    #[garde(custom(positive_height_patch))]
    pub min_height: Patch<f64>,
    #[serde(default)]
    #[garde(custom(non_negative_patch))]
    pub queue_time: Patch<i32>,
    #[serde(default)]
    #[garde(custom(optional_park_area))]
    pub park_area: Patch<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate, CoreError};

    fn test_track() -> NewRide {
        serde_json::from_str(
            r#"{"name": "Test Track", "location": "EPCOT - Future World", "min_height": 3.8, "queue_time": 50}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_new_ride_defaults_and_passthrough() {
        let ride = test_track().into_ride(7, Utc::now());
        assert_eq!(ride.id, 7);
        assert_eq!(ride.min_height, Some(3.8));
        assert_eq!(ride.description, None);
        assert_eq!(ride.park_area, None);
        assert_eq!(ride.updated_at, None);

        let minimal: NewRide =
            serde_json::from_str(r#"{"name": "Haunted Mansion", "location": "Liberty Square"}"#).unwrap();
        assert_eq!(minimal.queue_time, 0);
        assert!(validate(&minimal).is_ok());
    }

    #[test]
    fn test_new_ride_validation_reports_fields() {
        let mut ride = test_track();
        ride.name = String::new();
        ride.queue_time = -5;
        ride.park_area = Some("x".repeat(51));

        match validate(&ride) {
            Err(CoreError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"queue_time"));
                assert!(fields.contains(&"park_area"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let created = Utc::now();
        let mut ride = test_track().into_ride(1, created);
        ride.description = Some("Test innovative vehicles".to_string());

        let update: RideUpdate =
            serde_json::from_str(r#"{"queue_time": 0, "description": null}"#).unwrap();
        assert!(validate(&update).is_ok());

        let now = Utc::now();
        ride.apply_update(update, now);
        assert_eq!(ride.queue_time, 0);
        assert_eq!(ride.description, None);
        assert_eq!(ride.name, "Test Track");
        assert_eq!(ride.min_height, Some(3.8));
        assert_eq!(ride.created_at, created);
        assert_eq!(ride.updated_at, Some(now));
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        let update: RideUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(matches!(validate(&update), Err(CoreError::Validation(_))));
    }
}
