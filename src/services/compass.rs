//! Directional indicator angle
//!
//! Heading convention: whichever raw signal the platform provides (absolute
//! compass heading or relative device orientation), the feed collaborator
//! normalizes it to degrees clockwise from north before it reaches this
//! module. No sign inversion happens here.

use crate::domain::geo;
use crate::domain::types::GeoPoint;

/// Rotation a north-up arrow needs to point at the target
///
/// None when there is no target, no heading, or the user stands on the
/// target (degenerate bearing).
pub fn display_angle(user: GeoPoint, target: Option<GeoPoint>, heading: Option<f64>) -> Option<f64> {
    let target = target?;
    let heading = heading?;
    if user == target {
        return None;
    }
    Some((geo::bearing(user, target) - heading + 360.0).rem_euclid(360.0))
}

/// Degraded mode when no heading is available: the raw bearing, rendered as
/// a north-relative arrow. Callers opt into this explicitly.
pub fn north_relative_angle(user: GeoPoint, target: Option<GeoPoint>) -> Option<f64> {
    let target = target?;
    if user == target {
        return None;
    }
    Some(geo::bearing(user, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_angle_subtracts_heading() {
        let user = GeoPoint::new(0.0, 0.0);
        let east = GeoPoint::new(0.0, 1.0); // bearing 90

        let angle = display_angle(user, Some(east), Some(30.0)).unwrap();
        assert!((angle - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_display_angle_wraps_into_range() {
        let user = GeoPoint::new(0.0, 0.0);
        let north = GeoPoint::new(1.0, 0.0); // bearing 0

        let angle = display_angle(user, Some(north), Some(90.0)).unwrap();
        assert!((angle - 270.0).abs() < 0.01);
    }

    #[test]
    fn test_display_angle_none_without_heading() {
        let user = GeoPoint::new(0.0, 0.0);
        assert!(display_angle(user, Some(GeoPoint::new(1.0, 0.0)), None).is_none());
    }

    #[test]
    fn test_display_angle_none_without_target() {
        assert!(display_angle(GeoPoint::new(0.0, 0.0), None, Some(45.0)).is_none());
    }

    #[test]
    fn test_display_angle_none_on_degenerate_bearing() {
        let p = GeoPoint::new(41.38, 2.17);
        assert!(display_angle(p, Some(p), Some(45.0)).is_none());
    }

    #[test]
    fn test_north_relative_fallback() {
        let user = GeoPoint::new(0.0, 0.0);
        let east = GeoPoint::new(0.0, 1.0);

        let angle = north_relative_angle(user, Some(east)).unwrap();
        assert!((angle - 90.0).abs() < 0.01);
        assert!(north_relative_angle(user, Some(user)).is_none());
        assert!(north_relative_angle(user, None).is_none());
    }
}
