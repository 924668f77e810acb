use serde::{Deserialize, Serialize};

use crate::problem::{
    distance_method::DistanceMethod,
    point::Point,
    tsp_problem::{ProblemError, TspProblem, TspProblemBuilder},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename = "TspProblem")]
pub struct JsonTspProblem {
    #[serde(default)]
    pub info: JsonProblemInfo,
    pub points: Vec<JsonPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields, rename = "ProblemInfo")]
pub struct JsonProblemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<JsonProblemType>,
}

/// Coordinate system of the points: planar, or longitude/latitude in degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JsonProblemType {
    #[serde(alias = "Euclidean")]
    Euclidean,
    #[serde(alias = "Geographic")]
    Geographic,
}

impl From<JsonProblemType> for DistanceMethod {
    fn from(value: JsonProblemType) -> Self {
        match value {
            JsonProblemType::Euclidean => DistanceMethod::Euclidean,
            JsonProblemType::Geographic => DistanceMethod::Haversine,
        }
    }
}

impl From<DistanceMethod> for JsonProblemType {
    fn from(value: DistanceMethod) -> Self {
        match value {
            DistanceMethod::Euclidean => JsonProblemType::Euclidean,
            DistanceMethod::Haversine => JsonProblemType::Geographic,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename = "Point")]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Point> for JsonPoint {
    fn from(value: &Point) -> Self {
        JsonPoint {
            x: value.x(),
            y: value.y(),
            name: value.name().map(str::to_owned),
        }
    }
}

impl JsonTspProblem {
    pub fn build_problem(self) -> Result<TspProblem, ProblemError> {
        let mut builder = TspProblemBuilder::default();

        if let Some(name) = self.info.name {
            builder.set_name(name);
        }

        if let Some(description) = self.info.description {
            builder.set_description(description);
        }

        builder.set_distance_method(
            self.info
                .problem_type
                .map(DistanceMethod::from)
                .unwrap_or_default(),
        );

        builder.set_points(
            self.points
                .into_iter()
                .map(|point| match point.name {
                    Some(name) => Point::named(point.x, point.y, name),
                    None => Point::new(point.x, point.y),
                })
                .collect(),
        );

        builder.build()
    }
}

impl From<&TspProblem> for JsonTspProblem {
    fn from(value: &TspProblem) -> Self {
        JsonTspProblem {
            info: JsonProblemInfo {
                name: Some(value.name().to_owned()),
                description: value.description().map(str::to_owned),
                problem_type: Some(value.distance_method().into()),
            },
            points: value.points().iter().map(JsonPoint::from).collect(),
        }
    }
}
