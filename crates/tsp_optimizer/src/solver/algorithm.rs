use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::held_karp::MAX_HELD_KARP_POINTS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("algorithm not found: {0}")]
pub struct UnknownAlgorithmError(pub String);

/// The available solvers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Tries every permutation, streaming each improvement.
    BruteForce,
    /// Held-Karp dynamic program, emits the optimal tour once done.
    HeldKarp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::BruteForce, Algorithm::HeldKarp];

    /// Identifier accepted by [`Algorithm::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BruteForce => "bruteforce",
            Algorithm::HeldKarp => "heldkarp",
        }
    }

    /// Largest problem the algorithm accepts, if it has a limit.
    pub fn max_points(&self) -> Option<usize> {
        match self {
            Algorithm::BruteForce => None,
            Algorithm::HeldKarp => Some(MAX_HELD_KARP_POINTS),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::BruteForce => write!(f, "Bruteforce"),
            Algorithm::HeldKarp => write!(f, "Held-Karp"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "bruteforce" => Ok(Algorithm::BruteForce),
            "heldkarp" => Ok(Algorithm::HeldKarp),
            _ => Err(UnknownAlgorithmError(value.to_owned())),
        }
    }
}
