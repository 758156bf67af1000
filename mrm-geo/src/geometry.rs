//! Basin geometry: surveyed polygons, synthesized rectangles and bounds.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A `[longitude, latitude]` pair in decimal degrees.
pub type LngLat = [f64; 2];

/// Half-width (degrees longitude) of the rectangle synthesized for basins
/// without a surveyed outline.
pub const SYNTHESIZED_HALF_WIDTH: f64 = 1.0;

/// Half-height (degrees latitude) of the synthesized rectangle.
pub const SYNTHESIZED_HALF_HEIGHT: f64 = 0.5;

/// GeoJSON geometry as it appears in the dataset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Outer ring first; inner rings (holes) are carried but not rendered specially.
    Polygon { coordinates: Vec<Vec<LngLat>> },
}

/// Where a basin's renderable outline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOrigin {
    Surveyed,
    Synthesized,
}

/// The one renderable outline every basin resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinShape {
    pub origin: ShapeOrigin,
    /// Closed ring: first and last points are equal.
    pub ring: Vec<LngLat>,
}

impl BasinShape {
    pub fn surveyed(ring: Vec<LngLat>) -> Self {
        Self {
            origin: ShapeOrigin::Surveyed,
            ring,
        }
    }

    /// Rectangle of fixed half-extent around `center`.
    pub fn synthesized(center: LngLat) -> Self {
        let [lon, lat] = center;
        let (w, h) = (SYNTHESIZED_HALF_WIDTH, SYNTHESIZED_HALF_HEIGHT);
        Self {
            origin: ShapeOrigin::Synthesized,
            ring: vec![
                [lon - w, lat - h],
                [lon + w, lat - h],
                [lon + w, lat + h],
                [lon - w, lat + h],
                [lon - w, lat - h],
            ],
        }
    }

    pub fn is_surveyed(&self) -> bool {
        self.origin == ShapeOrigin::Surveyed
    }

    pub fn bounds(&self) -> Bounds {
        // A validated ring always has points; fall back to a zero-size box otherwise.
        Bounds::around(&self.ring).unwrap_or(Bounds {
            west: 0.0,
            south: 0.0,
            east: 0.0,
            north: 0.0,
        })
    }

    /// GeoJSON `Polygon` geometry object.
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [self.ring],
        })
    }
}

/// Axis-aligned longitude/latitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn around(points: &[LngLat]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Bounds {
            west: first[0],
            south: first[1],
            east: first[0],
            north: first[1],
        };
        for [lon, lat] in points.iter().copied() {
            b.west = b.west.min(lon);
            b.east = b.east.max(lon);
            b.south = b.south.min(lat);
            b.north = b.north.max(lat);
        }
        Some(b)
    }

    /// Inclusive containment test with a margin in degrees.
    pub fn contains(&self, point: LngLat, margin: f64) -> bool {
        let [lon, lat] = point;
        lon >= self.west - margin
            && lon <= self.east + margin
            && lat >= self.south - margin
            && lat <= self.north + margin
    }

    pub fn center(&self) -> LngLat {
        [(self.west + self.east) / 2.0, (self.south + self.north) / 2.0]
    }

    /// `[[west, south], [east, north]]`, the pair form map engines expect.
    pub fn to_pairs(&self) -> [LngLat; 2] {
        [[self.west, self.south], [self.east, self.north]]
    }
}

/// Check that a ring can be rendered as a polygon outline.
pub fn validate_ring(ring: &[LngLat]) -> Result<(), String> {
    if ring.len() < 4 {
        return Err(format!("ring has {} points, need at least 4", ring.len()));
    }
    if ring.first() != ring.last() {
        return Err("ring is not closed (first point != last point)".to_string());
    }
    for [lon, lat] in ring {
        if !(-180.0..=180.0).contains(lon) || !(-90.0..=90.0).contains(lat) {
            return Err(format!("coordinate [{}, {}] is out of range", lon, lat));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_shape_is_closed_rectangle() {
        let shape = BasinShape::synthesized([-94.0, 32.5]);
        assert_eq!(shape.origin, ShapeOrigin::Synthesized);
        assert_eq!(shape.ring.len(), 5);
        assert_eq!(shape.ring.first(), shape.ring.last());
        assert!(validate_ring(&shape.ring).is_ok());

        let b = shape.bounds();
        assert_eq!(b.west, -95.0);
        assert_eq!(b.east, -93.0);
        assert_eq!(b.south, 32.0);
        assert_eq!(b.north, 33.0);
        assert_eq!(b.center(), [-94.0, 32.5]);
    }

    #[test]
    fn bounds_contains_with_margin() {
        let b = Bounds {
            west: -105.0,
            south: 46.0,
            east: -101.0,
            north: 49.0,
        };
        assert!(b.contains([-103.0, 47.5], 0.0));
        assert!(!b.contains([-100.8, 47.5], 0.0));
        assert!(b.contains([-100.8, 47.5], 0.25));
        assert_eq!(b.to_pairs(), [[-105.0, 46.0], [-101.0, 49.0]]);
    }

    #[test]
    fn bounds_around_empty_is_none() {
        assert!(Bounds::around(&[]).is_none());
    }

    #[test]
    fn validate_ring_rejects_open_and_short_rings() {
        let open = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!(validate_ring(&open).unwrap_err().contains("not closed"));

        let short = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]];
        assert!(validate_ring(&short).unwrap_err().contains("at least 4"));

        let out_of_range = vec![[0.0, 0.0], [200.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        assert!(validate_ring(&out_of_range).unwrap_err().contains("out of range"));
    }

    #[test]
    fn geometry_deserializes_from_geojson() {
        let geometry: Geometry = serde_json::from_str(
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#,
        )
        .unwrap();
        let Geometry::Polygon { coordinates } = geometry;
        assert_eq!(coordinates[0].len(), 4);
    }

    #[test]
    fn shape_geojson_wraps_ring() {
        let shape = BasinShape::synthesized([0.0, 0.0]);
        let value = shape.to_geojson();
        assert_eq!(value["type"], "Polygon");
        assert_eq!(value["coordinates"][0].as_array().unwrap().len(), 5);
    }
}
