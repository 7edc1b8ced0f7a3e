use crate::geometry::GeoPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Square tile edge in pixels for the Web Mercator pyramid.
pub const TILE_SIZE: f64 = 256.0;

/// Sine of the latitude cap that keeps the Mercator projection finite (~85.05 deg).
const MAX_SIN_LAT: f64 = 0.9999;

const FALLBACK_CENTER: GeoPoint = GeoPoint::new(0.0, 0.0);

/// Pixel size of the map surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Position on the map surface, origin at the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn distance_sq(&self, other: ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Camera over the map surface: where it looks, how close and how large it is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapView {
    pub center: Option<GeoPoint>,
    pub zoom: u8,
    pub viewport: Viewport,
}

impl MapView {
    pub fn new(center: Option<GeoPoint>, zoom: u8, viewport: Viewport) -> Self {
        Self {
            center,
            zoom,
            viewport,
        }
    }

    pub fn recenter(&mut self, center: GeoPoint) {
        self.center = Some(center);
    }

    /// Center used for projection; an unset center falls back to the null island.
    pub fn effective_center(&self) -> GeoPoint {
        self.center.unwrap_or(FALLBACK_CENTER)
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powi(i32::from(self.zoom))
    }

    fn to_world(&self, point: GeoPoint) -> (f64, f64) {
        let scale = self.world_size();
        let x = (point.longitude + 180.0) / 360.0 * scale;
        let sin_lat = point
            .latitude
            .to_radians()
            .sin()
            .clamp(-MAX_SIN_LAT, MAX_SIN_LAT);
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * scale;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> GeoPoint {
        let scale = self.world_size();
        let longitude = x / scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / scale;
        let latitude = n.sinh().atan().to_degrees();
        GeoPoint::new(latitude, longitude)
    }

    /// Projects a coordinate onto the viewport.
    pub fn to_screen(&self, point: GeoPoint) -> ScreenPoint {
        let (cx, cy) = self.to_world(self.effective_center());
        let (px, py) = self.to_world(point);
        ScreenPoint {
            x: px - cx + self.viewport.width / 2.0,
            y: py - cy + self.viewport.height / 2.0,
        }
    }

    /// Resolves a viewport position (e.g. a click) into a coordinate.
    pub fn from_screen(&self, screen: ScreenPoint) -> GeoPoint {
        let (cx, cy) = self.to_world(self.effective_center());
        self.from_world(
            screen.x - self.viewport.width / 2.0 + cx,
            screen.y - self.viewport.height / 2.0 + cy,
        )
    }

    /// Finds the marker nearest to `screen` within `radius` pixels.
    pub fn marker_at(
        &self,
        markers: &[GeoPoint],
        screen: ScreenPoint,
        radius: f64,
    ) -> Option<(usize, GeoPoint)> {
        let limit = radius * radius;
        markers
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, *point, self.to_screen(*point).distance_sq(screen)))
            .filter(|(_, _, dist)| *dist <= limit)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(idx, point, _)| (idx, point))
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(None, 14, Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MapView {
        MapView::new(Some(GeoPoint::new(40.05, -73.05)), 14, Viewport::default())
    }

    #[test]
    fn center_projects_to_viewport_middle() {
        let view = view();
        let screen = view.to_screen(GeoPoint::new(40.05, -73.05));
        assert!((screen.x - 640.0).abs() < 1e-6);
        assert!((screen.y - 360.0).abs() < 1e-6);
    }

    #[test]
    fn screen_round_trip_recovers_coordinate() {
        let view = view();
        let point = GeoPoint::new(40.051, -73.049);
        let back = view.from_screen(view.to_screen(point));
        assert!((back.latitude - point.latitude).abs() < 1e-9);
        assert!((back.longitude - point.longitude).abs() < 1e-9);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let view = view();
        let north = view.to_screen(GeoPoint::new(40.06, -73.05));
        let east = view.to_screen(GeoPoint::new(40.05, -73.04));
        assert!(north.y < 360.0);
        assert!(east.x > 640.0);
    }

    #[test]
    fn marker_hit_test_picks_nearest_within_radius() {
        let view = view();
        let markers = [GeoPoint::new(40.05, -73.05), GeoPoint::new(40.0505, -73.05)];
        let near_second = view.to_screen(markers[1]);
        let hit = view.marker_at(&markers, near_second, 8.0);
        assert_eq!(hit.map(|(idx, _)| idx), Some(1));
        let far = ScreenPoint { x: 0.0, y: 0.0 };
        assert!(view.marker_at(&markers, far, 8.0).is_none());
    }

    #[test]
    fn unset_center_falls_back() {
        let view = MapView::default();
        assert_eq!(view.effective_center(), GeoPoint::new(0.0, 0.0));
    }
}
