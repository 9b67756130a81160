//! Containers and collection points
//!
//! A collection point ("ilot") is a physical location holding one or more
//! sensor-equipped containers. Fill ratio and readiness are always derived
//! from the last reading.

use super::{DomainError, GeoCoordinate};

pub type ContainerId = i64;
pub type PointId = i64;

/// Default fill ratio from which a container is considered ready for collection
pub const DEFAULT_READY_THRESHOLD: f64 = 0.8;

// =========================================================================
// Reading
// =========================================================================

/// Last values reported by a container sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    weight: i32,
    volume: i32,
    volume_max: i32,
}

impl Reading {
    /// Validate and build a reading.
    pub fn new(weight: i32, volume: i32, volume_max: i32) -> Result<Self, DomainError> {
        if weight < 0 {
            return Err(DomainError::invalid_reading(format!(
                "weight must not be negative, got {}",
                weight
            )));
        }
        if volume < 0 {
            return Err(DomainError::invalid_reading(format!(
                "volume must not be negative, got {}",
                volume
            )));
        }
        if volume_max <= 0 {
            return Err(DomainError::invalid_reading(format!(
                "volumemax must be positive, got {}",
                volume_max
            )));
        }

        Ok(Self {
            weight,
            volume,
            volume_max,
        })
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn volume_max(&self) -> i32 {
        self.volume_max
    }

    /// volume / volume_max. May exceed 1.0 for an overfull container.
    pub fn fill_ratio(&self) -> f64 {
        f64::from(self.volume) / f64::from(self.volume_max)
    }
}

// =========================================================================
// ReadinessPolicy
// =========================================================================

/// Decides when a fill ratio makes a container ready for collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessPolicy {
    threshold: f64,
}

impl ReadinessPolicy {
    pub fn new(threshold: f64) -> Result<Self, DomainError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DomainError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_ready(&self, fill_ratio: f64) -> bool {
        fill_ratio >= self.threshold
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_READY_THRESHOLD,
        }
    }
}

// =========================================================================
// Container
// =========================================================================

/// A sensor-equipped waste receptacle
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: ContainerId,
    pub point_id: PointId,
    reading: Reading,
}

impl Container {
    pub fn new(id: ContainerId, point_id: PointId, reading: Reading) -> Self {
        Self {
            id,
            point_id,
            reading,
        }
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Replace the last reading; derived values follow automatically.
    pub fn set_reading(&mut self, reading: Reading) {
        self.reading = reading;
    }

    pub fn weight(&self) -> i32 {
        self.reading.weight()
    }

    pub fn volume(&self) -> i32 {
        self.reading.volume()
    }

    pub fn volume_max(&self) -> i32 {
        self.reading.volume_max()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.reading.fill_ratio()
    }

    pub fn is_ready_for_collection(&self, policy: &ReadinessPolicy) -> bool {
        policy.is_ready(self.fill_ratio())
    }
}

// =========================================================================
// CollectionPoint
// =========================================================================

/// A physical location holding containers
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPoint {
    pub id: PointId,
    pub location: GeoCoordinate,
    pub containers: Vec<Container>,
}

impl CollectionPoint {
    pub fn new(id: PointId, location: GeoCoordinate) -> Self {
        Self {
            id,
            location,
            containers: Vec::new(),
        }
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    /// A point is worth a stop as soon as one of its containers is ready.
    pub fn is_ready_for_collection(&self, policy: &ReadinessPolicy) -> bool {
        self.containers
            .iter()
            .any(|c| c.is_ready_for_collection(policy))
    }

    pub fn container_ids(&self) -> Vec<ContainerId> {
        self.containers.iter().map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(weight: i32, volume: i32, volume_max: i32) -> Reading {
        Reading::new(weight, volume, volume_max).unwrap()
    }

    #[test]
    fn test_fill_ratio_is_volume_over_max() {
        let r = reading(40, 90, 100);
        assert!((r.fill_ratio() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reading_rejects_non_positive_max() {
        assert!(Reading::new(10, 10, 0).is_err());
        assert!(Reading::new(10, 10, -5).is_err());
    }

    #[test]
    fn test_reading_rejects_negative_values() {
        assert!(Reading::new(-1, 10, 100).is_err());
        assert!(Reading::new(1, -10, 100).is_err());
    }

    #[test]
    fn test_policy_threshold_bounds() {
        assert!(ReadinessPolicy::new(0.0).is_err());
        assert!(ReadinessPolicy::new(1.2).is_err());
        assert!(ReadinessPolicy::new(f64::NAN).is_err());
        assert!(ReadinessPolicy::new(1.0).is_ok());
    }

    #[test]
    fn test_ready_flag_follows_latest_reading() {
        let policy = ReadinessPolicy::new(0.75).unwrap();
        let mut container = Container::new(7, 1, reading(5, 10, 100));
        assert!(!container.is_ready_for_collection(&policy));

        container.set_reading(reading(40, 90, 100));
        assert!(container.is_ready_for_collection(&policy));

        container.set_reading(reading(0, 0, 100));
        assert!(!container.is_ready_for_collection(&policy));
    }

    #[test]
    fn test_point_ready_when_any_container_ready() {
        let policy = ReadinessPolicy::default();
        let point = CollectionPoint::new(1, GeoCoordinate::new(43.6, 1.44))
            .with_container(Container::new(1, 1, reading(0, 10, 100)))
            .with_container(Container::new(2, 1, reading(0, 85, 100)));

        assert!(point.is_ready_for_collection(&policy));
        assert_eq!(point.container_ids(), vec![1, 2]);
    }

    #[test]
    fn test_empty_point_is_not_ready() {
        let point = CollectionPoint::new(1, GeoCoordinate::new(43.6, 1.44));
        assert!(!point.is_ready_for_collection(&ReadinessPolicy::default()));
    }
}
