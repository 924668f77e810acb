use std::sync::Arc;

use thiserror::Error;

use super::{distance_method::DistanceMethod, point::Point};

pub type Distance = f64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("distance from {from} to {to} is not finite")]
    NotFinite { from: usize, to: usize },

    #[error("distance from {from} to {to} is negative ({value})")]
    Negative { from: usize, to: usize, value: f64 },

    #[error("distance from {from} to {to} differs from the distance back")]
    Asymmetric { from: usize, to: usize },

    #[error("distance from {index} to itself is {value}, expected 0")]
    NonZeroDiagonal { index: usize, value: f64 },
}

/// Symmetric table of pairwise distances, read-only once built.
///
/// Distances are stored in a flat vector, the entry for a pair of points
/// lives at `from * num_points + to`. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Arc<Vec<Distance>>,
    num_points: usize,
}

impl DistanceMatrix {
    pub fn from_points(points: &[Point], method: DistanceMethod) -> Self {
        let num_points = points.len();
        let mut distances = vec![0.0; num_points * num_points];

        // Only the upper triangle is computed so the matrix is symmetric bit for bit.
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate().skip(i + 1) {
                let distance = from.distance(to, method);
                distances[i * num_points + j] = distance;
                distances[j * num_points + i] = distance;
            }
        }

        Self {
            distances: Arc::new(distances),
            num_points,
        }
    }

    pub fn from_euclidean(points: &[Point]) -> Self {
        Self::from_points(points, DistanceMethod::Euclidean)
    }

    pub fn from_haversine(points: &[Point]) -> Self {
        Self::from_points(points, DistanceMethod::Haversine)
    }

    /// Builds a matrix from explicit rows, rejecting anything that is not a
    /// square, symmetric table of finite non-negative distances with a zero diagonal.
    pub fn from_rows(rows: Vec<Vec<Distance>>) -> Result<Self, MatrixError> {
        let num_points = rows.len();

        for (row, values) in rows.iter().enumerate() {
            if values.len() != num_points {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: num_points,
                });
            }
        }

        for from in 0..num_points {
            for to in 0..num_points {
                let value = rows[from][to];
                if !value.is_finite() {
                    return Err(MatrixError::NotFinite { from, to });
                }
                if value < 0.0 {
                    return Err(MatrixError::Negative { from, to, value });
                }
                if from == to && value != 0.0 {
                    return Err(MatrixError::NonZeroDiagonal { index: from, value });
                }
                if value != rows[to][from] {
                    return Err(MatrixError::Asymmetric { from, to });
                }
            }
        }

        Ok(Self {
            distances: Arc::new(rows.into_iter().flatten().collect()),
            num_points,
        })
    }

    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> Distance {
        self.distances[from * self.num_points + to]
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Length of the closed tour visiting `cycle` in order and returning to its start.
    pub fn cycle_distance(&self, cycle: &[usize]) -> Distance {
        match (cycle.first(), cycle.last()) {
            (Some(&first), Some(&last)) => {
                cycle
                    .windows(2)
                    .map(|pair| self.distance(pair[0], pair[1]))
                    .sum::<Distance>()
                    + self.distance(last, first)
            }
            _ => 0.0,
        }
    }

    pub fn max_distance(&self) -> Distance {
        self.distances.iter().copied().fold(0.0, Distance::max)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    #[test]
    fn test_from_points() {
        let points = test_utils::create_point_grid(3, 3);
        let matrix = DistanceMatrix::from_euclidean(&points);

        assert_eq!(matrix.num_points(), 9);
        for i in 0..9 {
            assert_eq!(matrix.distance(i, i), 0.0);
            for j in 0..9 {
                assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
            }
        }

        assert_eq!(matrix.distance(0, 2), 2.0);
        assert_eq!(matrix.distance(0, 8), 8.0_f64.sqrt());
        assert_eq!(matrix.max_distance(), 8.0_f64.sqrt());
    }

    #[test]
    fn test_from_haversine_is_symmetric() {
        let points = vec![
            Point::from_lat_lon(36.1, -115.1),
            Point::from_lat_lon(36.2, -115.2),
            Point::from_lat_lon(34.05, -118.24),
        ];
        let matrix = DistanceMatrix::from_haversine(&points);

        assert!(matrix.distance(0, 1) > 0.0);
        assert_eq!(matrix.distance(0, 2), matrix.distance(2, 0));
        assert_eq!(matrix.distance(1, 1), 0.0);
    }

    #[test]
    fn test_cycle_distance() {
        let points = test_utils::create_points(vec![(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        let matrix = DistanceMatrix::from_euclidean(&points);

        assert_eq!(matrix.cycle_distance(&[0, 1, 2]), 12.0);
        assert_eq!(matrix.cycle_distance(&[2, 1, 0]), 12.0);
        assert_eq!(matrix.cycle_distance(&[1]), 0.0);
        assert_eq!(matrix.cycle_distance(&[]), 0.0);
    }

    #[test]
    fn test_from_rows() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();

        assert_eq!(matrix.num_points(), 3);
        assert_eq!(matrix.distance(1, 2), 3.0);
        assert!(DistanceMatrix::from_rows(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err(),
            MatrixError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err(),
            MatrixError::Negative {
                from: 0,
                to: 1,
                value: -1.0
            }
        );
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).unwrap_err(),
            MatrixError::NotFinite { from: 0, to: 1 }
        );
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap_err(),
            MatrixError::Asymmetric { from: 0, to: 1 }
        );
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 0.0]]).unwrap_err(),
            MatrixError::NonZeroDiagonal {
                index: 0,
                value: 1.0
            }
        );
    }
}
