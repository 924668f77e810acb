use std::fmt;

use serde::Serialize;

use super::{
    cycle::Cycle,
    distance_matrix::Distance,
    point::{Point, PointIdx},
    tsp_problem::TspProblem,
};

/// A cycle resolved against the points of its problem.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Point>,
    cycle: Cycle,
    distance: Distance,
}

impl Route {
    pub fn from_cycle(problem: &TspProblem, cycle: Cycle) -> Self {
        let points = cycle
            .iter()
            .map(|&index| problem.point(PointIdx::new(index)).clone())
            .collect();

        Self {
            points,
            distance: cycle.distance(problem.matrix()),
            cycle,
        }
    }

    /// Points in visiting order, without repeating the first one at the end.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    /// Length of the closed tour.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.points.first() else {
            return write!(f, "(empty route)");
        };

        for point in &self.points {
            write!(f, "{point} -> ")?;
        }
        write!(f, "{first}")
    }
}
