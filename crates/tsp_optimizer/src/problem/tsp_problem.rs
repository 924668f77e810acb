use std::{fmt, path::PathBuf};

use thiserror::Error;

use super::{
    distance_matrix::{DistanceMatrix, MatrixError},
    distance_method::DistanceMethod,
    point::{Point, PointIdx},
};

#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("matrix has {matrix} rows but the problem has {points} points")]
    DimensionMismatch { points: usize, matrix: usize },

    #[error("invalid distance matrix: {0}")]
    Matrix(#[from] MatrixError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A set of points to visit, together with the distances between them.
#[derive(Debug, Clone)]
pub struct TspProblem {
    name: String,
    description: Option<String>,
    points: Vec<Point>,
    distance_method: DistanceMethod,
    matrix: DistanceMatrix,
}

impl TspProblem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: PointIdx) -> &Point {
        &self.points[index]
    }

    pub fn distance_method(&self) -> DistanceMethod {
        self.distance_method
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

impl fmt::Display for TspProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} points)", self.name, self.points.len())
    }
}

#[derive(Default)]
pub struct TspProblemBuilder {
    name: Option<String>,
    description: Option<String>,
    points: Option<Vec<Point>>,
    distance_method: Option<DistanceMethod>,
    matrix: Option<DistanceMatrix>,
}

impl TspProblemBuilder {
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut TspProblemBuilder {
        self.name = Some(name.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut TspProblemBuilder {
        self.description = Some(description.into());
        self
    }

    pub fn set_points(&mut self, points: Vec<Point>) -> &mut TspProblemBuilder {
        self.points = Some(points);
        self
    }

    pub fn set_distance_method(&mut self, distance_method: DistanceMethod) -> &mut TspProblemBuilder {
        self.distance_method = Some(distance_method);
        self
    }

    /// Uses `matrix` instead of computing distances from the points.
    pub fn set_matrix(&mut self, matrix: DistanceMatrix) -> &mut TspProblemBuilder {
        self.matrix = Some(matrix);
        self
    }

    pub fn build(self) -> Result<TspProblem, ProblemError> {
        let points = self.points.unwrap_or_default();
        let distance_method = self.distance_method.unwrap_or_default();

        let matrix = match self.matrix {
            Some(matrix) if matrix.num_points() != points.len() => {
                return Err(ProblemError::DimensionMismatch {
                    points: points.len(),
                    matrix: matrix.num_points(),
                });
            }
            Some(matrix) => matrix,
            None => DistanceMatrix::from_points(&points, distance_method),
        };

        Ok(TspProblem {
            name: self.name.unwrap_or_else(|| String::from("unnamed")),
            description: self.description,
            points,
            distance_method,
            matrix,
        })
    }
}
