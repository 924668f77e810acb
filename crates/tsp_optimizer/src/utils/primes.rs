/// Returns all primes in `[2, upper_bound]` in ascending order (sieve of Eratosthenes).
pub fn primes_to(upper_bound: usize) -> Vec<usize> {
    if upper_bound < 2 {
        return Vec::new();
    }

    let mut is_composite = vec![false; upper_bound + 1];
    let mut candidate = 2;
    while candidate * candidate <= upper_bound {
        if !is_composite[candidate] {
            for multiple in (candidate * candidate..=upper_bound).step_by(candidate) {
                is_composite[multiple] = true;
            }
        }
        candidate += 1;
    }

    (2..=upper_bound)
        .filter(|&number| !is_composite[number])
        .collect()
}

/// Returns the `count` smallest primes.
///
/// The sieve bound starts at `100 * count`, which is always enough, and grows
/// if it ever is not.
pub fn first_primes(count: usize) -> Vec<usize> {
    let mut upper_bound = count.max(1) * 100;
    loop {
        let mut primes = primes_to(upper_bound);
        if primes.len() >= count {
            primes.truncate(count);
            return primes;
        }
        upper_bound *= 2;
    }
}
