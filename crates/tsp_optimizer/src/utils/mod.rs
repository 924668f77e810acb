pub mod newtype_index;
pub mod power_set;
pub mod primes;
pub mod subset_identity;
pub mod time;
