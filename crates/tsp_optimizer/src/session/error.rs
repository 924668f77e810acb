use thiserror::Error;

use crate::solver::algorithm::{Algorithm, UnknownAlgorithmError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithmError),

    #[error("{algorithm} supports at most {max} points, the problem has {points}")]
    ProblemTooLarge {
        algorithm: Algorithm,
        points: usize,
        max: usize,
    },
}
