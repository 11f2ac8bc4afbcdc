use serde::{Deserialize, Serialize};

use super::point::GeoPoint;

/// Simple polygon described by its exterior ring. Holes are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(exterior: Vec<GeoPoint>) -> Self {
        Self { exterior }
    }

    /// Builds a polygon from `[lon, lat]` pairs as found in GeoJSON rings.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Self {
        Self::new(pairs.iter().map(|p| GeoPoint::new(p[0], p[1])).collect())
    }

    fn ring(&self) -> &[GeoPoint] {
        // GeoJSON rings repeat the first vertex at the end
        match (self.exterior.first(), self.exterior.last()) {
            (Some(first), Some(last)) if self.exterior.len() > 1 && first == last => {
                &self.exterior[..self.exterior.len() - 1]
            }
            _ => &self.exterior,
        }
    }

    /// Signed shoelace area in square degrees (positive for counter-clockwise rings).
    pub fn signed_area(&self) -> f64 {
        let ring = self.ring();
        if ring.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            sum += ring[j].lon * ring[i].lat - ring[i].lon * ring[j].lat;
            j = i;
        }
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid of the ring. Degenerate rings fall back to the vertex mean.
    pub fn centroid(&self) -> Option<GeoPoint> {
        let ring = self.ring();
        if ring.is_empty() {
            return None;
        }

        let signed_area = self.signed_area();
        if signed_area.abs() < f64::EPSILON {
            let n = ring.len() as f64;
            let lon = ring.iter().map(|p| p.lon).sum::<f64>() / n;
            let lat = ring.iter().map(|p| p.lat).sum::<f64>() / n;
            return Some(GeoPoint::new(lon, lat));
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let cross = ring[j].lon * ring[i].lat - ring[i].lon * ring[j].lat;
            cx += (ring[j].lon + ring[i].lon) * cross;
            cy += (ring[j].lat + ring[i].lat) * cross;
            j = i;
        }
        let factor = 1.0 / (6.0 * signed_area);
        Some(GeoPoint::new(cx * factor, cy * factor))
    }
}

/// Area-weighted centroid of several polygons.
///
/// Equals the centroid of their union when the parts do not overlap, which is
/// the case for adjacent administrative districts.
pub fn combined_centroid(polygons: &[Polygon]) -> Option<GeoPoint> {
    let mut total_area = 0.0;
    let mut lon = 0.0;
    let mut lat = 0.0;

    for polygon in polygons {
        let area = polygon.area();
        if let Some(c) = polygon.centroid() {
            lon += c.lon * area;
            lat += c.lat * area;
            total_area += area;
        }
    }

    if total_area > 0.0 {
        return Some(GeoPoint::new(lon / total_area, lat / total_area));
    }

    // Every part is degenerate: average whatever centroids exist
    let centroids: Vec<GeoPoint> = polygons.iter().filter_map(Polygon::centroid).collect();
    if centroids.is_empty() {
        return None;
    }
    let n = centroids.len() as f64;
    Some(GeoPoint::new(
        centroids.iter().map(|c| c.lon).sum::<f64>() / n,
        centroids.iter().map(|c| c.lat).sum::<f64>() / n,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon {
        Polygon::from_pairs(&[
            [x0, y0],
            [x0 + side, y0],
            [x0 + side, y0 + side],
            [x0, y0 + side],
            [x0, y0],
        ])
    }

    #[test]
    fn test_square_centroid_and_area() {
        let sq = square(0.0, 0.0, 2.0);
        assert!((sq.area() - 4.0).abs() < 1e-12);
        let c = sq.centroid().unwrap();
        assert!((c.lon - 1.0).abs() < 1e-12 && (c.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clockwise_ring_has_same_centroid() {
        let cw = Polygon::from_pairs(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
        let c = cw.centroid().unwrap();
        assert!(cw.signed_area() < 0.0);
        assert!((c.lon - 1.0).abs() < 1e-12 && (c.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_combined_centroid_weights_by_area() {
        // unit square centred at (0.5, 0.5), 2x2 square centred at (3, 1)
        let parts = vec![square(0.0, 0.0, 1.0), square(2.0, 0.0, 2.0)];
        let c = combined_centroid(&parts).unwrap();
        // (0.5*1 + 3*4) / 5 = 2.5 ; (0.5*1 + 1*4) / 5 = 0.9
        assert!((c.lon - 2.5).abs() < 1e-12);
        assert!((c.lat - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(Polygon::new(vec![]).centroid().is_none());
        assert!(combined_centroid(&[]).is_none());
        let line = Polygon::from_pairs(&[[0.0, 0.0], [2.0, 2.0]]);
        let c = line.centroid().unwrap();
        assert!((c.lon - 1.0).abs() < 1e-12);
    }
}
