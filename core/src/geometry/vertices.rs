use crate::geometry::GeoPoint;
use serde::{Deserialize, Serialize};

/// Ordered polygon corners in drawing order.
///
/// No minimum or maximum length is enforced; degenerate polygons simply
/// enclose no area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexList {
    points: Vec<GeoPoint>,
}

impl VertexList {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Adds a corner at the end. Duplicates and out-of-range coordinates are kept.
    pub fn append(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    /// Replaces the first corner equal by value to `target` and returns its index.
    ///
    /// Only the first occurrence moves when several corners share a coordinate.
    pub fn replace(&mut self, target: GeoPoint, replacement: GeoPoint) -> Option<usize> {
        let idx = self.points.iter().position(|point| *point == target)?;
        self.points[idx] = replacement;
        Some(idx)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<GeoPoint>> for VertexList {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<GeoPoint> for VertexList {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VertexList {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> VertexList {
        VertexList::from(vec![
            GeoPoint::new(40.0, -73.0),
            GeoPoint::new(40.1, -73.0),
            GeoPoint::new(40.1, -73.1),
        ])
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut list = VertexList::new();
        for n in 0..7 {
            list.append(GeoPoint::new(n as f64, -(n as f64)));
            assert_eq!(list.len(), n + 1);
        }
        let lats: Vec<f64> = list.iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn append_keeps_duplicates() {
        let mut list = VertexList::new();
        list.append(GeoPoint::new(1.0, 1.0));
        list.append(GeoPoint::new(1.0, 1.0));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn clear_always_empties() {
        let mut list = triangle();
        list.clear();
        assert!(list.is_empty());
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn replace_missing_target_is_noop() {
        let mut list = triangle();
        let before = list.clone();
        assert_eq!(
            list.replace(GeoPoint::new(0.0, 0.0), GeoPoint::new(9.0, 9.0)),
            None
        );
        assert_eq!(list, before);
    }

    #[test]
    fn replace_moves_corner_in_place() {
        let mut list = triangle();
        let idx = list.replace(GeoPoint::new(40.0, -73.0), GeoPoint::new(40.05, -73.0));
        assert_eq!(idx, Some(0));
        assert_eq!(
            list.points(),
            &[
                GeoPoint::new(40.05, -73.0),
                GeoPoint::new(40.1, -73.0),
                GeoPoint::new(40.1, -73.1),
            ]
        );
    }

    #[test]
    fn replace_only_touches_first_duplicate() {
        let shared = GeoPoint::new(5.0, 5.0);
        let mut list = VertexList::from(vec![GeoPoint::new(0.0, 0.0), shared, shared]);
        assert_eq!(list.replace(shared, GeoPoint::new(6.0, 6.0)), Some(1));
        assert_eq!(list.points()[1], GeoPoint::new(6.0, 6.0));
        assert_eq!(list.points()[2], shared);
    }
}
