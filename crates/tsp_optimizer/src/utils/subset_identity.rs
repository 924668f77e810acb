//! Collision-free integer keys for subsets of `{0, .., size - 1}`.
//!
//! Two schemes are available:
//! - [`BitmaskIdentity`]: one bit per element. Cheap, limited to 64 elements.
//! - [`PrimeProductIdentity`]: element `k` maps to the `k`-th prime and a subset
//!   to the product of its primes, injective by unique factorization. The
//!   product grows very fast, so the universe is capped at what fits in a `u128`.

use std::{fmt::Debug, hash::Hash};

use thiserror::Error;

use super::primes::first_primes;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubsetError {
    #[error("subset identity overflowed while multiplying {members} member primes")]
    IdentityOverflow { members: usize },

    #[error("universe of {size} elements is too large, at most {max} are supported")]
    UniverseTooLarge { size: usize, max: usize },

    #[error("element {element} is outside of the universe of {size} elements")]
    OutOfUniverse { element: usize, size: usize },
}

pub trait SubsetIdentity: Sized + Send + Sync {
    type Key: Copy + Eq + Hash + Debug + Send + Sync;

    /// Creates the identity for subsets of `{0, .., size - 1}`.
    ///
    /// Fails if some subset of the universe would not have a representable key,
    /// afterwards every key operation is infallible.
    fn for_universe(size: usize) -> Result<Self, SubsetError>;

    /// Largest supported universe.
    fn max_universe() -> usize;

    fn universe(&self) -> usize;

    fn empty(&self) -> Self::Key;

    /// Key of `subset`. Every member must be inside the universe.
    fn identity(&self, subset: &[usize]) -> Self::Key;

    /// Key of `key`'s subset without `element`, which must be a member.
    fn without(&self, key: Self::Key, element: usize) -> Self::Key;
}

#[derive(Debug, Clone)]
pub struct BitmaskIdentity {
    size: usize,
}

impl SubsetIdentity for BitmaskIdentity {
    type Key = u64;

    fn for_universe(size: usize) -> Result<Self, SubsetError> {
        if size > Self::max_universe() {
            return Err(SubsetError::UniverseTooLarge {
                size,
                max: Self::max_universe(),
            });
        }

        Ok(Self { size })
    }

    fn max_universe() -> usize {
        u64::BITS as usize
    }

    fn universe(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn empty(&self) -> u64 {
        0
    }

    #[inline(always)]
    fn identity(&self, subset: &[usize]) -> u64 {
        subset.iter().fold(0, |mask, &element| {
            debug_assert!(element < self.size);
            mask | (1 << element)
        })
    }

    #[inline(always)]
    fn without(&self, key: u64, element: usize) -> u64 {
        key & !(1 << element)
    }
}

#[derive(Debug, Clone)]
pub struct PrimeProductIdentity {
    primes: Vec<u128>,
}

/// Product of the primes assigned to the members of `subset`.
///
/// `primes[k]` is the prime of element `k`; the empty subset maps to `1`.
pub fn prime_product_identity(subset: &[usize], primes: &[u128]) -> Result<u128, SubsetError> {
    subset.iter().try_fold(1u128, |product, &element| {
        let prime = primes.get(element).ok_or(SubsetError::OutOfUniverse {
            element,
            size: primes.len(),
        })?;

        product
            .checked_mul(*prime)
            .ok_or(SubsetError::IdentityOverflow {
                members: subset.len(),
            })
    })
}

impl PrimeProductIdentity {
    pub fn primes(&self) -> &[u128] {
        &self.primes
    }
}

impl SubsetIdentity for PrimeProductIdentity {
    type Key = u128;

    fn for_universe(size: usize) -> Result<Self, SubsetError> {
        let primes = first_primes(size)
            .into_iter()
            .map(|prime| prime as u128)
            .collect::<Vec<_>>();

        // The full universe has the largest product, if it fits every subset does.
        let universe = (0..size).collect::<Vec<_>>();
        prime_product_identity(&universe, &primes)?;

        Ok(Self { primes })
    }

    fn max_universe() -> usize {
        // 2 * 3 * 5 * ... * 101 still fits in a u128, multiplying by 103 does not.
        26
    }

    fn universe(&self) -> usize {
        self.primes.len()
    }

    #[inline(always)]
    fn empty(&self) -> u128 {
        1
    }

    #[inline(always)]
    fn identity(&self, subset: &[usize]) -> u128 {
        subset
            .iter()
            .fold(1, |product, &element| product * self.primes[element])
    }

    #[inline(always)]
    fn without(&self, key: u128, element: usize) -> u128 {
        key / self.primes[element]
    }
}
