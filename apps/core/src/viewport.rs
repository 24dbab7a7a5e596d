use crate::domain::LatLon;

/// Geographic centre of Canada.
pub const DEFAULT_CENTER: LatLon = LatLon::new(56.1304, -106.3468);
pub const DEFAULT_ZOOM: f64 = 4.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 12.0;

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const MAX_CENTER_LAT: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    /// Degrees of longitude visible across the full width.
    pub fn lon_span(&self) -> f64 {
        (360.0 / 2_f64.powf(self.zoom - 2.0)).min(360.0)
    }

    pub fn bounds(&self, cols: u16, rows: u16) -> Bounds {
        let cols = f64::from(cols.max(1));
        let rows = f64::from(rows.max(1));

        let lon_span = self.lon_span();
        let lat_span = (lon_span * rows * CELL_ASPECT / cols).min(180.0);

        let mut south = self.center.lat - lat_span / 2.0;
        let mut north = self.center.lat + lat_span / 2.0;
        if north > 90.0 {
            south -= north - 90.0;
            north = 90.0;
        }
        if south < -90.0 {
            north += -90.0 - south;
            south = -90.0;
        }

        Bounds {
            west: self.center.lon - lon_span / 2.0,
            east: self.center.lon + lon_span / 2.0,
            south,
            north,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1.0).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1.0).max(MIN_ZOOM);
    }

    /// Moves the centre by a fraction of the visible longitude span.
    /// Positive `dx` pans east, positive `dy` pans north.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let span = self.lon_span();
        let lon = self.center.lon + dx * span;
        self.center.lon = wrap_lon(lon);
        self.center.lat = dy
            .mul_add(span, self.center.lat)
            .clamp(-MAX_CENTER_LAT, MAX_CENTER_LAT);
    }

    pub fn center_on(&mut self, position: LatLon) {
        self.center = LatLon::new(
            position.lat.clamp(-MAX_CENTER_LAT, MAX_CENTER_LAT),
            wrap_lon(position.lon),
        );
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Longitude folded into [-180, 180).
fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Visible area in degrees. `west` and `east` may lie beyond ±180 when the
/// view straddles the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    /// `position` with its longitude shifted by whole turns to the copy
    /// nearest the middle of the window.
    pub fn normalize(&self, position: LatLon) -> LatLon {
        let mid = (self.west + self.east) / 2.0;
        LatLon::new(position.lat, mid + wrap_lon(position.lon - mid))
    }

    pub fn contains(&self, position: LatLon) -> bool {
        let position = self.normalize(position);
        (self.west..=self.east).contains(&position.lon)
            && (self.south..=self.north).contains(&position.lat)
    }

    /// Fractional cell coordinates of `position` in a `cols` x `rows` grid,
    /// with the origin at the top-left.
    pub fn project(&self, position: LatLon, cols: u16, rows: u16) -> (f64, f64) {
        let position = self.normalize(position);
        let x = (position.lon - self.west) / (self.east - self.west) * f64::from(cols);
        let y = (self.north - position.lat) / (self.north - self.south) * f64::from(rows);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_centred_on_canada() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center, DEFAULT_CENTER);
        assert!((viewport.lon_span() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_follow_cell_aspect() {
        let bounds = Viewport::default().bounds(90, 20);
        assert!((bounds.east - bounds.west - 90.0).abs() < 1e-9);
        assert!((bounds.north - bounds.south - 40.0).abs() < 1e-9);
        assert!(bounds.contains(DEFAULT_CENTER));
    }

    #[test]
    fn bounds_stay_inside_the_poles() {
        let viewport = Viewport {
            center: LatLon::new(80.0, 0.0),
            zoom: 2.0,
        };
        let bounds = viewport.bounds(100, 50);
        assert!((bounds.north - 90.0).abs() < 1e-9);
        assert!(bounds.south >= -90.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        for _ in 0..20 {
            viewport.zoom_out();
        }
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((viewport.lon_span() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn pan_wraps_longitude_and_clamps_latitude() {
        let mut viewport = Viewport {
            center: LatLon::new(0.0, 170.0),
            zoom: 4.0,
        };
        viewport.pan(0.25, 0.0);
        assert!((viewport.center.lon + 167.5).abs() < 1e-9);

        viewport.pan(0.0, 5.0);
        assert!((viewport.center.lat - 85.0).abs() < 1e-9);
    }

    #[test]
    fn project_maps_corners() {
        let bounds = Bounds {
            west: -100.0,
            east: -60.0,
            south: 40.0,
            north: 60.0,
        };
        assert_eq!(bounds.project(LatLon::new(60.0, -100.0), 40, 20), (0.0, 0.0));
        assert_eq!(bounds.project(LatLon::new(40.0, -60.0), 40, 20), (40.0, 20.0));
        assert_eq!(bounds.project(LatLon::new(50.0, -80.0), 40, 20), (20.0, 10.0));
        assert!(!bounds.contains(LatLon::new(39.0, -80.0)));
    }

    #[test]
    fn markers_across_the_antimeridian_stay_visible() {
        let mut viewport = Viewport {
            center: LatLon::new(0.0, 170.0),
            zoom: 4.0,
        };
        viewport.pan(0.1, 0.0);
        assert!((viewport.center.lon - 179.0).abs() < 1e-9);
        viewport.pan(0.1, 0.0);
        assert!((viewport.center.lon + 172.0).abs() < 1e-9);

        // Centre at -172: Fiji at 178 is 10 degrees west of centre.
        let bounds = viewport.bounds(90, 20);
        let fiji = LatLon::new(-17.7, 178.0);
        assert!(bounds.contains(fiji));
        let (x, _) = bounds.project(fiji, 90, 20);
        assert!((x - 35.0).abs() < 1e-9);
    }

    #[test]
    fn center_on_wraps_longitude() {
        let mut viewport = Viewport::default();
        viewport.center_on(LatLon::new(10.0, 190.0));
        assert!((viewport.center.lon + 170.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_default() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        viewport.pan(0.1, 0.1);
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }
}
