use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How pairwise distances are computed from point coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMethod {
    /// Planar distance between `(x, y)` coordinates.
    #[default]
    Euclidean,
    /// Great-circle distance in meters, `x` is the longitude and `y` the latitude.
    Haversine,
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMethod::Euclidean => write!(f, "euclidean"),
            DistanceMethod::Haversine => write!(f, "haversine"),
        }
    }
}

impl FromStr for DistanceMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "euclidean" | "planar" => Ok(DistanceMethod::Euclidean),
            "haversine" | "great-circle" => Ok(DistanceMethod::Haversine),
            _ => Err(format!("unknown distance method: {value}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distance_method() {
        assert_eq!("Euclidean".parse(), Ok(DistanceMethod::Euclidean));
        assert_eq!("haversine".parse(), Ok(DistanceMethod::Haversine));
        assert!("manhattan".parse::<DistanceMethod>().is_err());
    }
}
