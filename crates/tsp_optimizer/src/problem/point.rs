use geo::{Distance, Euclidean, Haversine};
use serde::{Deserialize, Serialize};

use crate::define_index_newtype;

use super::distance_method::DistanceMethod;

define_index_newtype!(PointIdx, Point);

/// A point to visit. Geographic points store the longitude in `x` and the latitude in `y`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, name: None }
    }

    pub fn named(x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            name: Some(name.into()),
        }
    }

    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self::new(lon, lat)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn lon(&self) -> f64 {
        self.x
    }

    pub fn lat(&self) -> f64 {
        self.y
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn euclidean_distance(&self, to: &Point) -> f64 {
        Euclidean.distance(geo::Point::from(self), geo::Point::from(to))
    }

    pub fn haversine_distance(&self, to: &Point) -> f64 {
        Haversine.distance(geo::Point::from(self), geo::Point::from(to))
    }

    pub fn distance(&self, to: &Point, method: DistanceMethod) -> f64 {
        match method {
            DistanceMethod::Euclidean => self.euclidean_distance(to),
            DistanceMethod::Haversine => self.haversine_distance(to),
        }
    }
}

impl From<&Point> for geo::Point<f64> {
    fn from(point: &Point) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(3.0, 4.0);

        assert_eq!(from.euclidean_distance(&to), 5.0);
        assert_eq!(from.distance(&to, DistanceMethod::Euclidean), 5.0);
    }

    #[test]
    fn test_haversine_distance() {
        // Las Vegas to Los Angeles, about 370 km
        let las_vegas = Point::from_lat_lon(36.17, -115.14);
        let los_angeles = Point::from_lat_lon(34.05, -118.24);

        let meters = las_vegas.haversine_distance(&los_angeles);
        assert!(meters > 350_000.0 && meters < 400_000.0, "got {meters}");
        assert!(las_vegas.haversine_distance(&las_vegas) < 0.001);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::named(1.0, 2.0, "depot").to_string(), "depot");
        assert_eq!(Point::new(1.5, 2.0).to_string(), "(1.5, 2)");
    }

    #[test]
    fn test_point_index() {
        let points = vec![Point::new(0.0, 0.0), Point::named(1.0, 2.0, "depot")];
        let index = PointIdx::from(1);

        assert_eq!(index.get(), 1);
        assert_eq!(index.to_string(), "1");
        assert_eq!(points[index].name(), Some("depot"));
        assert_eq!(points.as_slice()[PointIdx::new(0)], Point::new(0.0, 0.0));
        assert_eq!(serde_json::to_string(&index).unwrap(), "1");
    }
}
