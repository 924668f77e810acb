use serde::{Deserialize, Serialize};

use super::distance_matrix::{Distance, DistanceMatrix};

/// A closed tour: point indices in visiting order, the last one leads back to the first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Cycle(Vec<usize>);

impl Cycle {
    /// The tour `0, 1, .., num_points - 1`.
    pub fn identity(num_points: usize) -> Self {
        Self((0..num_points).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    pub fn distance(&self, matrix: &DistanceMatrix) -> Distance {
        matrix.cycle_distance(&self.0)
    }

    /// Whether every index of `0..num_points` appears exactly once.
    pub fn is_tour_of(&self, num_points: usize) -> bool {
        if self.0.len() != num_points {
            return false;
        }

        let mut seen = vec![false; num_points];
        self.0.iter().all(|&index| {
            index < num_points && !std::mem::replace(&mut seen[index], true)
        })
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for Cycle {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Cycle {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<'a> IntoIterator for &'a Cycle {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
