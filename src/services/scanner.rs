//! Nearest-unanswered-point search
//!
//! Linear scan per position update. Catalogs are tens of points; no spatial
//! index is warranted at this scale, and the contract here would let one be
//! substituted transparently if that changes.

use crate::domain::geo;
use crate::domain::types::{GeoPoint, PointId};
use crate::services::point_store::PointStore;

/// Nearest unanswered point and its distance from the user
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    pub point_id: PointId,
    pub position: GeoPoint,
    pub distance_m: f64,
}

/// Scan the unanswered snapshot for the minimum-distance point
///
/// Strict `<` comparison means exact ties go to the point earliest in
/// catalog order. Returns None when everything is answered or the catalog
/// is empty.
pub fn nearest(store: &PointStore, position: GeoPoint) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;

    for point in store.unanswered_snapshot() {
        let d = geo::distance(position, point.position);
        let closer = match &best {
            None => true,
            Some(b) => d < b.distance_m,
        };
        if closer {
            best = Some(Nearest { point_id: point.id.clone(), position: point.position, distance_m: d });
        }
    }

    best
}
